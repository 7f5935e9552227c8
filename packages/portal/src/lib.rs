//! # Portal crate — SupeWatch authorization and moderation core
//!
//! This crate holds everything the SupeWatch site does besides rendering: the
//! session lifecycle, the role-derived permission checks, and the mutations
//! that citizens, supes and admins apply to incidents, news and supe profiles.
//! All state lives in a [`store::KeyValueStore`]; the static seed catalog is
//! merged with the stored overlay on every read.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`auth`] | [`Session`] values, [`Capabilities`], login / logout / register / restore |
//! | [`content`] | Incident, news and supe queries and mutators |
//! | [`models`] | Serializable entity types (`User`, `Supe`, `News`, `Incident`, ...) |
//! | [`seed`] | Bundled read-only catalog and the seed/overlay merge |
//! | [`config`] | `supewatch.toml` and `SUPEWATCH_*` environment overrides |
//! | [`clock`] | Platform-aware `now()` and time-ordered ids |
//! | `logging` | `tracing-subscriber` setup (native only) |
//!
//! ## Mutation contract
//!
//! Every mutator takes the caller's [`Session`] explicitly. When the session
//! lacks the required capability, or the target id does not exist, the call
//! is ignored and returns `Ok(None)`. Errors are reserved for malformed stored
//! data.

pub mod auth;
pub mod clock;
pub mod config;
pub mod content;
pub mod error;
#[cfg(not(target_arch = "wasm32"))]
pub mod logging;
pub mod models;
pub mod seed;

mod platform;
pub use platform::open_portal;

pub use auth::{Capabilities, Registration, Session};
pub use config::{PortalConfig, StorageKeys};
pub use error::PortalError;
pub use models::{
    Comment, Incident, IncidentDraft, News, NewsCategory, NewsDraft, Role, Supe, SupePatch, User,
    Vote,
};
pub use seed::SeedCatalog;

use store::{Collection, Document, KeyValueStore};

/// The SupeWatch portal over a key-value store.
pub struct Portal<S: KeyValueStore> {
    store: S,
    keys: StorageKeys,
    seed: SeedCatalog,
}

impl<S: KeyValueStore> Portal<S> {
    pub fn new(store: S, seed: SeedCatalog, keys: StorageKeys) -> Self {
        Self { store, keys, seed }
    }

    /// Portal with the bundled catalog and the default storage keys.
    pub fn with_bundled_seed(store: S) -> Result<Self, PortalError> {
        Ok(Self::new(store, SeedCatalog::bundled()?, StorageKeys::default()))
    }

    /// Portal using the keys and seed source named in `config`.
    pub fn from_config(store: S, config: &PortalConfig) -> Result<Self, PortalError> {
        let seed = match &config.seed.path {
            Some(path) => SeedCatalog::from_path(path)?,
            None => SeedCatalog::bundled()?,
        };
        Ok(Self::new(store, seed, config.storage.keys.clone()))
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn seed(&self) -> &SeedCatalog {
        &self.seed
    }

    pub fn keys(&self) -> &StorageKeys {
        &self.keys
    }

    fn session_record(&self) -> Document<'_, S, User> {
        Document::new(&self.store, &self.keys.session)
    }

    fn registered_users(&self) -> Collection<'_, S, User> {
        Collection::new(&self.store, &self.keys.users)
    }

    fn incident_overlay(&self) -> Collection<'_, S, Incident> {
        Collection::new(&self.store, &self.keys.incidents)
    }

    fn news_overlay(&self) -> Collection<'_, S, News> {
        Collection::new(&self.store, &self.keys.news)
    }

    fn supe_overrides(&self) -> Collection<'_, S, SupePatch> {
        Collection::new(&self.store, &self.keys.supes)
    }
}
