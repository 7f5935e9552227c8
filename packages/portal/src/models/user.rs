//! # User model
//!
//! A [`User`] is both a catalog entry (seed users and registered users) and the
//! identity held by a [`Session`](crate::auth::Session). The JSON layout uses
//! camelCase keys (`createdAt`) and lowercase roles so that blobs persisted by
//! earlier versions of the site stay readable.
//!
//! The [`Role`] is fixed at registration; nothing in the portal changes it.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use store::Record;

/// Role chosen at registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Citizen,
    Supe,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Citizen => "citizen",
            Role::Supe => "supe",
            Role::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A portal account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub username: String,
    pub email: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

impl Record for User {
    fn id(&self) -> &str {
        &self.id
    }
}
