//! # Supe profiles and admin overrides
//!
//! [`Supe`] profiles come from the seed catalog. Admin edits never rewrite the
//! catalog; they accumulate in a [`SupePatch`] per supe id, stored in the
//! supe-overrides collection and applied on every read.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use store::Record;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Supe {
    pub id: String,
    pub name: String,
    pub image: String,
    pub powers: Vec<String>,
    pub affiliation: String,
    pub status: SupeStatus,
    pub rating: f64,
    #[serde(default)]
    pub controversies: Vec<Controversy>,
    #[serde(default)]
    pub achievements: Vec<Achievement>,
}

impl Supe {
    /// Case-insensitive match on the name or any power.
    pub fn matches(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        self.name.to_lowercase().contains(&query)
            || self
                .powers
                .iter()
                .any(|power| power.to_lowercase().contains(&query))
    }
}

impl Record for Supe {
    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupeStatus {
    pub last_location: String,
    pub current_activity: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Controversy {
    pub id: String,
    pub title: String,
    pub description: String,
    pub date: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Achievement {
    pub id: String,
    pub title: String,
    pub description: String,
    pub date: DateTime<Utc>,
}

/// Partial supe edit. Only the fields that are `Some` are applied.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupePatch {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub powers: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub affiliation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<SupeStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub controversies: Option<Vec<Controversy>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub achievements: Option<Vec<Achievement>>,
}

impl SupePatch {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    pub fn with_rating(mut self, rating: f64) -> Self {
        self.rating = Some(rating);
        self
    }

    /// Split a comma-separated list ("Flight, Laser eyes") into powers.
    pub fn with_powers_csv(mut self, powers: &str) -> Self {
        self.powers = Some(
            powers
                .split(',')
                .map(str::trim)
                .filter(|p| !p.is_empty())
                .map(str::to_string)
                .collect(),
        );
        self
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::new(self.id.clone())
    }

    /// Fold a newer patch into this one; fields set in `newer` win.
    pub fn merge(&mut self, newer: SupePatch) {
        fn take<T>(slot: &mut Option<T>, newer: Option<T>) {
            if newer.is_some() {
                *slot = newer;
            }
        }
        take(&mut self.name, newer.name);
        take(&mut self.image, newer.image);
        take(&mut self.powers, newer.powers);
        take(&mut self.affiliation, newer.affiliation);
        take(&mut self.status, newer.status);
        take(&mut self.rating, newer.rating);
        take(&mut self.controversies, newer.controversies);
        take(&mut self.achievements, newer.achievements);
    }

    pub fn apply(&self, supe: &mut Supe) {
        fn put<T: Clone>(target: &mut T, value: &Option<T>) {
            if let Some(value) = value {
                *target = value.clone();
            }
        }
        put(&mut supe.name, &self.name);
        put(&mut supe.image, &self.image);
        put(&mut supe.powers, &self.powers);
        put(&mut supe.affiliation, &self.affiliation);
        put(&mut supe.status, &self.status);
        put(&mut supe.rating, &self.rating);
        put(&mut supe.controversies, &self.controversies);
        put(&mut supe.achievements, &self.achievements);
    }
}

impl Record for SupePatch {
    fn id(&self) -> &str {
        &self.id
    }
}
