//! # Collections — whole-blob JSON persistence over a key-value store
//!
//! Each mutable entity kind lives under a single key as a JSON array. A
//! [`Collection`] wraps that key and turns every change into the same
//! read-modify-write cycle: load the full array, transform it in memory, write
//! the full array back. There are no partial writes and no cross-key
//! transactions; two writers racing on one key resolve as last-writer-wins.
//!
//! ## Operations
//!
//! | Method | Description |
//! |--------|-------------|
//! | [`load`](Collection::load) | Decodes the array; a missing key is an empty collection, an unreadable one an error. |
//! | [`save`](Collection::save) | Replaces the array. |
//! | [`find`](Collection::find) | Looks up one record by id. |
//! | [`append`](Collection::append) | Pushes a record to the end. |
//! | [`update`](Collection::update) | Applies a transform to the record with the given id; no write when absent. |
//! | [`update_or_insert`](Collection::update_or_insert) | Like `update`, but adopts a fallback record (e.g. a seed entry) when the id is not stored yet. |
//!
//! [`Document`] is the single-object counterpart used for values such as the
//! persisted session identity.

use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::StoreError;
use crate::kv::KeyValueStore;

/// A stored record addressable by a string id.
pub trait Record {
    fn id(&self) -> &str;
}

/// A JSON array of records stored under one key.
pub struct Collection<'a, S, T> {
    store: &'a S,
    key: &'a str,
    _record: PhantomData<T>,
}

impl<'a, S, T> Collection<'a, S, T>
where
    S: KeyValueStore,
    T: Record + Clone + Serialize + DeserializeOwned,
{
    pub fn new(store: &'a S, key: &'a str) -> Self {
        Self {
            store,
            key,
            _record: PhantomData,
        }
    }

    pub async fn load(&self) -> Result<Vec<T>, StoreError> {
        let Some(raw) = self.store.get(self.key).await? else {
            return Ok(Vec::new());
        };
        serde_json::from_str(&raw).map_err(|source| StoreError::Decode {
            key: self.key.to_string(),
            source,
        })
    }

    pub async fn save(&self, items: &[T]) -> Result<(), StoreError> {
        let raw = serde_json::to_string(items).map_err(|source| StoreError::Encode {
            key: self.key.to_string(),
            source,
        })?;
        self.store.set(self.key, raw).await;
        Ok(())
    }

    pub async fn find(&self, id: &str) -> Result<Option<T>, StoreError> {
        Ok(self.load().await?.into_iter().find(|item| item.id() == id))
    }

    pub async fn append(&self, item: T) -> Result<T, StoreError> {
        let mut items = self.load().await?;
        items.push(item.clone());
        self.save(&items).await?;
        Ok(item)
    }

    /// Apply `transform` to the record with `id` and persist the collection.
    ///
    /// Returns the updated record, or `None` (without writing) when no record
    /// has that id.
    pub async fn update<F>(&self, id: &str, transform: F) -> Result<Option<T>, StoreError>
    where
        F: FnOnce(&mut T),
    {
        self.update_or_insert(id, None, transform).await
    }

    /// Like [`update`](Self::update), but when `id` is not stored yet the
    /// `fallback` record is transformed and appended instead.
    pub async fn update_or_insert<F>(
        &self,
        id: &str,
        fallback: Option<T>,
        transform: F,
    ) -> Result<Option<T>, StoreError>
    where
        F: FnOnce(&mut T),
    {
        let mut items = self.load().await?;
        let updated = match items.iter_mut().find(|item| item.id() == id) {
            Some(item) => {
                transform(item);
                item.clone()
            }
            None => {
                let Some(mut item) = fallback else {
                    return Ok(None);
                };
                transform(&mut item);
                items.push(item.clone());
                item
            }
        };
        self.save(&items).await?;
        Ok(Some(updated))
    }
}

/// A single JSON object stored under one key.
pub struct Document<'a, S, T> {
    store: &'a S,
    key: &'a str,
    _value: PhantomData<T>,
}

impl<'a, S, T> Document<'a, S, T>
where
    S: KeyValueStore,
    T: Serialize + DeserializeOwned,
{
    pub fn new(store: &'a S, key: &'a str) -> Self {
        Self {
            store,
            key,
            _value: PhantomData,
        }
    }

    pub async fn read(&self) -> Result<Option<T>, StoreError> {
        let Some(raw) = self.store.get(self.key).await? else {
            return Ok(None);
        };
        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|source| StoreError::Decode {
                key: self.key.to_string(),
                source,
            })
    }

    pub async fn write(&self, value: &T) -> Result<(), StoreError> {
        let raw = serde_json::to_string(value).map_err(|source| StoreError::Encode {
            key: self.key.to_string(),
            source,
        })?;
        self.store.set(self.key, raw).await;
        Ok(())
    }

    pub async fn clear(&self) {
        self.store.remove(self.key).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryStore;
    use serde::Deserialize;

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    struct Item {
        id: String,
        count: u32,
    }

    impl Record for Item {
        fn id(&self) -> &str {
            &self.id
        }
    }

    fn item(id: &str, count: u32) -> Item {
        Item {
            id: id.to_string(),
            count,
        }
    }

    #[tokio::test]
    async fn test_missing_key_is_empty() {
        let store = MemoryStore::new();
        let items: Collection<_, Item> = Collection::new(&store, "items");
        assert!(items.load().await.unwrap().is_empty());
        assert!(items.find("a").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_append_and_update() {
        let store = MemoryStore::new();
        let items = Collection::new(&store, "items");

        items.append(item("a", 1)).await.unwrap();
        items.append(item("b", 1)).await.unwrap();

        let updated = items.update("b", |i: &mut Item| i.count += 1).await.unwrap();
        assert_eq!(updated, Some(item("b", 2)));

        let all = items.load().await.unwrap();
        assert_eq!(all, vec![item("a", 1), item("b", 2)]);
    }

    #[tokio::test]
    async fn test_update_unknown_id_does_not_write() {
        let store = MemoryStore::new();
        let items: Collection<_, Item> = Collection::new(&store, "items");

        let updated = items.update("ghost", |i| i.count += 1).await.unwrap();
        assert!(updated.is_none());
        assert!(store.get("items").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_or_insert_adopts_fallback_once() {
        let store = MemoryStore::new();
        let items = Collection::new(&store, "items");

        let first = items
            .update_or_insert("seed", Some(item("seed", 10)), |i: &mut Item| i.count += 1)
            .await
            .unwrap();
        assert_eq!(first, Some(item("seed", 11)));

        // Second call finds the stored copy and ignores the fallback
        let second = items
            .update_or_insert("seed", Some(item("seed", 10)), |i: &mut Item| i.count += 1)
            .await
            .unwrap();
        assert_eq!(second, Some(item("seed", 12)));
        assert_eq!(items.load().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_malformed_blob_is_decode_error() {
        let store = MemoryStore::new();
        store.set("items", "{not json".to_string()).await;

        let items: Collection<_, Item> = Collection::new(&store, "items");
        let err = items.load().await.unwrap_err();
        assert!(matches!(err, StoreError::Decode { ref key, .. } if key == "items"));
    }

    #[tokio::test]
    async fn test_document_read_write_clear() {
        let store = MemoryStore::new();
        let doc: Document<_, Item> = Document::new(&store, "current");

        assert!(doc.read().await.unwrap().is_none());
        doc.write(&item("me", 0)).await.unwrap();
        assert_eq!(doc.read().await.unwrap(), Some(item("me", 0)));

        doc.clear().await;
        assert!(doc.read().await.unwrap().is_none());
    }
}
