//! # Incident reports, votes and comments
//!
//! An [`Incident`] is reported by a signed-in, non-admin user and then moderated
//! by admins. Its state machine is small:
//!
//! - `verified` only ever moves from `false` to `true`.
//! - `likes` / `dislikes` hold user ids. A user appears in at most one of the
//!   two; casting a vote moves them to the chosen side (see [`Incident::cast_vote`]).
//! - `comments` is append-only.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use store::Record;

/// One side of an incident vote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Vote {
    Like,
    Dislike,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Incident {
    pub id: String,
    pub title: String,
    pub description: String,
    pub location: String,
    pub timestamp: DateTime<Utc>,
    /// Username of the reporter.
    pub reported_by: String,
    pub verified: bool,
    #[serde(default)]
    pub likes: Vec<String>,
    #[serde(default)]
    pub dislikes: Vec<String>,
    #[serde(default)]
    pub comments: Vec<Comment>,
}

impl Incident {
    /// Move `user_id` to the `vote` side.
    ///
    /// Voting the same way twice keeps the vote; there is no un-vote.
    pub fn cast_vote(&mut self, user_id: &str, vote: Vote) {
        self.likes.retain(|id| id != user_id);
        self.dislikes.retain(|id| id != user_id);
        match vote {
            Vote::Like => self.likes.push(user_id.to_string()),
            Vote::Dislike => self.dislikes.push(user_id.to_string()),
        }
    }

    pub fn has_voted(&self, user_id: &str, vote: Vote) -> bool {
        let side = match vote {
            Vote::Like => &self.likes,
            Vote::Dislike => &self.dislikes,
        };
        side.iter().any(|id| id == user_id)
    }
}

impl Record for Incident {
    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: String,
    pub content: String,
    pub user_id: String,
    pub username: String,
    pub created_at: DateTime<Utc>,
}

/// Fields a reporter supplies for a new incident.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IncidentDraft {
    pub title: String,
    pub description: String,
    pub location: String,
}
