//! Session state, role-derived capabilities and account operations.

mod accounts;
mod permissions;
mod session;

pub use accounts::Registration;
pub use permissions::Capabilities;
pub use session::Session;
