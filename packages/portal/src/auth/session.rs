//! Session value type.

use crate::models::{Role, User};

/// The signed-in identity, if any.
///
/// A `Session` is an immutable value: `restore`, `login` and `logout` on
/// [`Portal`](crate::Portal) return a new one instead of mutating shared state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    user: Option<User>,
}

impl Session {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn authenticated(user: User) -> Self {
        Self { user: Some(user) }
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn role(&self) -> Option<Role> {
        self.user.as_ref().map(|u| u.role)
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }
}
