//! # Permission evaluator
//!
//! [`Capabilities`] is derived from a [`Session`] by a pure function and never
//! cached beyond the session value it came from. The truth table:
//!
//! | Capability | Anonymous | Citizen | Supe | Admin |
//! |------------|-----------|---------|------|-------|
//! | `is_citizen` | — | ✓ | — | — |
//! | `is_supe` | — | — | ✓ | — |
//! | `is_admin` | — | — | — | ✓ |
//! | `can_like_content` | — | ✓ | ✓ | ✓ |
//! | `can_comment` | — | ✓ | ✓ | ✓ |
//! | `can_post_incident` | — | ✓ | ✓ | ✓ |
//! | `can_manage_content` | — | — | — | ✓ |
//!
//! No capability depends on who owns a resource; moderation is centralized in
//! the admin role.

use super::Session;
use crate::models::Role;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Capabilities {
    pub is_admin: bool,
    pub is_supe: bool,
    pub is_citizen: bool,
    pub can_like_content: bool,
    pub can_comment: bool,
    pub can_post_incident: bool,
    pub can_manage_content: bool,
}

impl Capabilities {
    pub fn of(session: &Session) -> Self {
        let role = session.role();
        let signed_in = session.is_authenticated();
        let is_admin = role == Some(Role::Admin);
        Self {
            is_admin,
            is_supe: role == Some(Role::Supe),
            is_citizen: role == Some(Role::Citizen),
            can_like_content: signed_in,
            can_comment: signed_in,
            can_post_incident: signed_in,
            can_manage_content: is_admin,
        }
    }
}

impl Session {
    pub fn capabilities(&self) -> Capabilities {
        Capabilities::of(self)
    }
}
