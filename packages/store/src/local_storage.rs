//! # Browser `localStorage` key-value store
//!
//! [`LocalStorageStore`] is the [`KeyValueStore`] implementation used on the
//! **web platform**. Every key maps to one `localStorage` entry holding the
//! JSON blob verbatim, which keeps the data readable from the browser's dev
//! tools and compatible with blobs written by earlier versions of the site.
//!
//! ## Namespacing
//!
//! When a namespace is provided, keys are stored as `"<namespace>:<key>"`, so
//! several portals (or test runs) can share one origin without clobbering each
//! other. Without a namespace the bare key is used.
//!
//! ## Error handling
//!
//! `localStorage` can be missing (privacy modes) or full (quota). A missing
//! storage object reads as empty; a `getItem` call the browser rejects is a
//! [`StoreError::Io`]. Writes log and drop.

use crate::error::StoreError;
use crate::kv::KeyValueStore;
use web_sys::Storage;

/// `window.localStorage`-backed KeyValueStore for the web platform.
#[derive(Clone, Debug, Default)]
pub struct LocalStorageStore {
    namespace: Option<String>,
}

impl LocalStorageStore {
    /// Create an unscoped store using bare keys.
    pub fn new() -> Self {
        Self::with_namespace(None)
    }

    /// Create a store whose keys are prefixed with `"<namespace>:"`.
    pub fn with_namespace(namespace: Option<&str>) -> Self {
        Self {
            namespace: namespace.map(str::to_string),
        }
    }

    fn scoped(&self, key: &str) -> String {
        match &self.namespace {
            Some(ns) => format!("{ns}:{key}"),
            None => key.to_string(),
        }
    }

    fn storage() -> Option<Storage> {
        web_sys::window()?.local_storage().ok()?
    }
}

impl KeyValueStore for LocalStorageStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let Some(storage) = Self::storage() else {
            return Ok(None);
        };
        storage
            .get_item(&self.scoped(key))
            .map_err(|e| StoreError::Io {
                key: key.to_string(),
                source: std::io::Error::other(format!("{e:?}")),
            })
    }

    async fn set(&self, key: &str, value: String) {
        let Some(storage) = Self::storage() else {
            tracing::warn!("localStorage unavailable, dropping write to {key}");
            return;
        };
        if storage.set_item(&self.scoped(key), &value).is_err() {
            tracing::warn!("localStorage rejected write to {key}");
        }
    }

    async fn remove(&self, key: &str) {
        if let Some(storage) = Self::storage() {
            let _ = storage.remove_item(&self.scoped(key));
        }
    }
}
