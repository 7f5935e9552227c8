//! # Portal configuration — `supewatch.toml`
//!
//! Defines the TOML configuration read at startup (filename:
//! [`PortalConfig::filename`] = `"supewatch.toml"`). Every section is optional;
//! a missing or empty file is equivalent to [`PortalConfig::default`].
//!
//! ## Structure
//!
//! ```toml
//! [storage]
//! namespace = "tab-1"                # prefix for localStorage keys (web only)
//! data_dir = "/var/lib/supewatch"    # FileStore base (native only)
//!
//! [storage.keys]
//! session = "supewatch_user"
//! users = "supewatch_users"
//! incidents = "incidents"
//! news = "news"
//! supes = "supewatch_supes"
//!
//! [seed]
//! path = "seed.json"                 # replaces the bundled catalog
//! ```
//!
//! ## Environment overrides
//!
//! [`PortalConfig::from_env`] loads a `.env` file with `dotenvy` and then applies
//! `SUPEWATCH_DATA_DIR`, `SUPEWATCH_NAMESPACE` and `SUPEWATCH_SEED_PATH`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::PortalError;

/// Top-level configuration stored in `supewatch.toml`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PortalConfig {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub seed: SeedConfig,
}

/// Where and under which keys the overlay lives.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
    #[serde(default)]
    pub keys: StorageKeys,
}

/// Durable storage keys, one per entity kind plus the session record.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageKeys {
    pub session: String,
    pub users: String,
    pub incidents: String,
    pub news: String,
    pub supes: String,
}

impl Default for StorageKeys {
    fn default() -> Self {
        Self {
            session: "supewatch_user".to_string(),
            users: "supewatch_users".to_string(),
            incidents: "incidents".to_string(),
            news: "news".to_string(),
            supes: "supewatch_supes".to_string(),
        }
    }
}

/// Seed catalog source.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SeedConfig {
    /// JSON catalog to load instead of the bundled one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

impl PortalConfig {
    /// The well-known filename for the config file.
    pub fn filename() -> &'static str {
        "supewatch.toml"
    }

    /// Parse from TOML string.
    pub fn from_toml(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    /// Serialize to TOML string.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Read a config file; a missing file yields the default config.
    pub fn load(path: &Path) -> Result<Self, PortalError> {
        match std::fs::read_to_string(path) {
            Ok(raw) => Ok(Self::from_toml(&raw)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(source) => Err(PortalError::Io {
                path: path.display().to_string(),
                source,
            }),
        }
    }

    /// Default config with `SUPEWATCH_*` overrides from the environment
    /// (and `.env`, if present).
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::default().with_overrides(|name| std::env::var(name).ok())
    }

    /// Apply `SUPEWATCH_*` overrides resolved through `lookup`.
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let lookup = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        if let Some(dir) = lookup("SUPEWATCH_DATA_DIR") {
            self.storage.data_dir = Some(PathBuf::from(dir));
        }
        if let Some(ns) = lookup("SUPEWATCH_NAMESPACE") {
            self.storage.namespace = Some(ns);
        }
        if let Some(path) = lookup("SUPEWATCH_SEED_PATH") {
            self.seed.path = Some(PathBuf::from(path));
        }
        self
    }
}
