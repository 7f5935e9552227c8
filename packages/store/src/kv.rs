//! # Key-value store — the persistence seam under every collection
//!
//! [`KeyValueStore`] is the one trait the rest of the workspace writes against.
//! A store maps string keys to string blobs (always JSON in practice) and
//! exposes three async operations: `get`, `set` and `remove`.
//!
//! ## Backends
//!
//! | Type | Where | Notes |
//! |------|-------|-------|
//! | [`crate::MemoryStore`] | tests, fallback | Shared `HashMap` behind a `Mutex`; clones see the same data. |
//! | [`crate::FileStore`] | desktop / mobile | One file per key under a base directory. |
//! | `LocalStorageStore` | web (`wasm32` + `web` feature) | `window.localStorage`, optionally namespaced. |
//!
//! ## Error handling
//!
//! `get` returns `Ok(None)` only when the key holds nothing. A value that
//! exists but cannot be read is a [`StoreError::Io`], so read-modify-write
//! cycles abort instead of overwriting data they never saw. Writes that cannot
//! be persisted are dropped after a `warn!`. Decoding the blob is the caller's
//! concern (see [`crate::Collection`]).

use std::future::Future;

use crate::error::StoreError;

/// Async trait for string-keyed blob storage.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> impl Future<Output = Result<Option<String>, StoreError>>;
    fn set(&self, key: &str, value: String) -> impl Future<Output = ()>;
    fn remove(&self, key: &str) -> impl Future<Output = ()>;
}
