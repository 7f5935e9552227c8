//! Data models for the portal.

mod incident;
mod news;
mod supe;
mod user;

pub use incident::{Comment, Incident, IncidentDraft, Vote};
pub use news::{News, NewsCategory, NewsDraft};
pub use supe::{Achievement, Controversy, Supe, SupePatch, SupeStatus};
pub use user::{Role, User};
