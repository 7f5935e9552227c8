//! # Seed catalog — the read-only base layer
//!
//! The catalog bundled at `data/seed.json` supplies the supes, news, incidents
//! and users every portal starts with. It is never written back: user-generated
//! records live in the overlay collections and are merged on read with
//! [`merge_by_id`].

use std::path::Path;

use serde::{Deserialize, Serialize};
use store::Record;

use crate::error::PortalError;
use crate::models::{Incident, News, Supe, User};

const BUNDLED: &str = include_str!("../data/seed.json");

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SeedCatalog {
    #[serde(default)]
    pub supes: Vec<Supe>,
    #[serde(default)]
    pub news: Vec<News>,
    #[serde(default)]
    pub incidents: Vec<Incident>,
    #[serde(default)]
    pub users: Vec<User>,
}

impl SeedCatalog {
    /// The catalog compiled into the crate.
    pub fn bundled() -> Result<Self, PortalError> {
        Self::from_json(BUNDLED)
    }

    pub fn from_json(raw: &str) -> Result<Self, PortalError> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn from_path(path: &Path) -> Result<Self, PortalError> {
        let raw = std::fs::read_to_string(path).map_err(|source| PortalError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&raw)
    }

    pub fn supe(&self, id: &str) -> Option<&Supe> {
        self.supes.iter().find(|s| s.id == id)
    }

    pub fn news_item(&self, id: &str) -> Option<&News> {
        self.news.iter().find(|n| n.id == id)
    }

    pub fn incident(&self, id: &str) -> Option<&Incident> {
        self.incidents.iter().find(|i| i.id == id)
    }
}

/// Seed records in seed order, each replaced by the overlay record with the
/// same id, followed by overlay-only records in overlay order.
pub fn merge_by_id<T: Record>(seed: Vec<T>, overlay: Vec<T>) -> Vec<T> {
    let mut overlay: Vec<Option<T>> = overlay.into_iter().map(Some).collect();
    let mut merged: Vec<T> = seed
        .into_iter()
        .map(|base| {
            overlay
                .iter_mut()
                .find(|o| o.as_ref().is_some_and(|o| o.id() == base.id()))
                .and_then(Option::take)
                .unwrap_or(base)
        })
        .collect();
    merged.extend(overlay.into_iter().flatten());
    merged
}
