//! # Read-Through Cache
//!
//! Resources are cached in the key-value store under a key derived from
//! their endpoint (`swapi-people`, `swapi-people-1`). Entries never expire:
//! reference data does not change, and a hit always skips the network.
//!
//! Only the read path is strict. Failing to write an entry back is logged
//! and ignored, since the caller already has the data it asked for.

use crate::primitives::{CACHE_KEY_PREFIX, FAVORITES_KEY};
use crate::storage::KeyValueStore;
use crate::{Endpoint, FetchError, HolocronError};
use serde_json::Value;

/// Deterministic store key for an endpoint.
#[must_use]
pub fn cache_key(endpoint: &Endpoint) -> String {
    match endpoint.id {
        Some(id) => format!("{}-{}-{}", CACHE_KEY_PREFIX, endpoint.category, id),
        None => format!("{}-{}", CACHE_KEY_PREFIX, endpoint.category),
    }
}

/// Read-through cache over a borrowed store.
#[derive(Debug)]
pub struct CacheLayer<'a, S: KeyValueStore + ?Sized> {
    store: &'a mut S,
}

impl<'a, S: KeyValueStore + ?Sized> CacheLayer<'a, S> {
    pub fn new(store: &'a mut S) -> Self {
        Self { store }
    }

    /// Look up a cached resource without fetching.
    ///
    /// Unreadable or corrupt entries count as a miss.
    pub fn lookup(&self, endpoint: &Endpoint) -> Option<Value> {
        let key = cache_key(endpoint);
        let raw = match self.store.get(&key) {
            Ok(raw) => raw?,
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "cache read failed, treating as miss");
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => {
                tracing::debug!(key = %key, "cache hit");
                Some(value)
            }
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "corrupt cache entry, refetching");
                None
            }
        }
    }

    /// Return the cached resource, or fetch, store and return it.
    ///
    /// `fetch` runs at most once, and only on a miss. Its error is returned
    /// untouched and nothing is written. A `null` body is returned but not
    /// stored, so the next read asks the network again.
    pub fn get<F>(&mut self, endpoint: &Endpoint, fetch: F) -> Result<Value, FetchError>
    where
        F: FnOnce() -> Result<Value, FetchError>,
    {
        if let Some(value) = self.lookup(endpoint) {
            return Ok(value);
        }

        let value = fetch()?;
        if value.is_null() {
            tracing::debug!(key = %cache_key(endpoint), "null response, not cached");
        } else {
            self.store_best_effort(endpoint, &value);
        }
        Ok(value)
    }

    fn store_best_effort(&mut self, endpoint: &Endpoint, value: &Value) {
        let key = cache_key(endpoint);
        let serialized = match serde_json::to_string(value) {
            Ok(s) => s,
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "could not serialize cache entry");
                return;
            }
        };
        match self.store.set(&key, &serialized) {
            Ok(()) => tracing::info!(key = %key, "saved to cache"),
            Err(e) => tracing::warn!(key = %key, error = %e, "cache write failed, continuing"),
        }
    }

    /// Keys of all cache entries, in ascending order.
    pub fn entries(&self) -> Result<Vec<String>, HolocronError> {
        let prefix = format!("{}-", CACHE_KEY_PREFIX);
        let mut keys = self.store.keys_with_prefix(&prefix)?;
        keys.retain(|k| k != FAVORITES_KEY);
        Ok(keys)
    }

    /// Remove every cache entry, leaving favorites alone.
    ///
    /// Returns the number of entries removed.
    pub fn clear(&mut self) -> Result<usize, HolocronError> {
        let keys = self.entries()?;
        for key in &keys {
            self.store.remove(key)?;
        }
        tracing::info!(removed = keys.len(), "cache cleared");
        Ok(keys.len())
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use crate::{Category, ResourceId};
    use serde_json::json;
    use std::cell::Cell;

    /// Store whose writes always fail.
    #[derive(Default)]
    struct ReadOnlyStore {
        inner: MemoryStore,
    }

    impl KeyValueStore for ReadOnlyStore {
        fn get(&self, key: &str) -> Result<Option<String>, HolocronError> {
            self.inner.get(key)
        }
        fn set(&mut self, _key: &str, _value: &str) -> Result<(), HolocronError> {
            Err(HolocronError::Storage("quota exceeded".to_string()))
        }
        fn remove(&mut self, key: &str) -> Result<(), HolocronError> {
            self.inner.remove(key)
        }
        fn keys_with_prefix(&self, prefix: &str) -> Result<Vec<String>, HolocronError> {
            self.inner.keys_with_prefix(prefix)
        }
    }

    /// Store whose reads always fail.
    #[derive(Default)]
    struct UnreadableStore {
        inner: MemoryStore,
    }

    impl KeyValueStore for UnreadableStore {
        fn get(&self, _key: &str) -> Result<Option<String>, HolocronError> {
            Err(HolocronError::Storage("disk unavailable".to_string()))
        }
        fn set(&mut self, key: &str, value: &str) -> Result<(), HolocronError> {
            self.inner.set(key, value)
        }
        fn remove(&mut self, key: &str) -> Result<(), HolocronError> {
            self.inner.remove(key)
        }
        fn keys_with_prefix(&self, prefix: &str) -> Result<Vec<String>, HolocronError> {
            self.inner.keys_with_prefix(prefix)
        }
    }

    fn luke() -> Endpoint {
        Endpoint::item(Category::People, ResourceId::new(1).unwrap())
    }

    #[test]
    fn keys_are_deterministic() {
        assert_eq!(cache_key(&Endpoint::collection(Category::People)), "swapi-people");
        assert_eq!(cache_key(&luke()), "swapi-people-1");
    }

    #[test]
    fn miss_fetches_and_stores() {
        let mut store = MemoryStore::new();
        let calls = Cell::new(0);

        let value = CacheLayer::new(&mut store)
            .get(&luke(), || {
                calls.set(calls.get() + 1);
                Ok(json!({"name": "Luke Skywalker"}))
            })
            .unwrap();

        assert_eq!(value["name"], "Luke Skywalker");
        assert_eq!(calls.get(), 1);
        assert!(store.get("swapi-people-1").unwrap().is_some());
    }

    #[test]
    fn hit_skips_fetch() {
        let mut store = MemoryStore::new();
        store
            .set("swapi-people-1", r#"{"name":"Luke Skywalker"}"#)
            .unwrap();

        let value = CacheLayer::new(&mut store)
            .get(&luke(), || panic!("fetch must not run on a hit"))
            .unwrap();
        assert_eq!(value, json!({"name": "Luke Skywalker"}));
    }

    #[test]
    fn fetch_error_writes_nothing() {
        let mut store = MemoryStore::new();
        let result = CacheLayer::new(&mut store).get(&luke(), || {
            Err(FetchError::Status {
                status: 404,
                status_text: "Not Found".to_string(),
            })
        });

        assert!(matches!(result, Err(FetchError::Status { status: 404, .. })));
        assert!(store.is_empty());
    }

    #[test]
    fn write_failure_still_returns_data() {
        let mut store = ReadOnlyStore::default();
        let value = CacheLayer::new(&mut store)
            .get(&luke(), || Ok(json!({"name": "Luke"})))
            .unwrap();
        assert_eq!(value["name"], "Luke");
        assert!(store.inner.is_empty());
    }

    #[test]
    fn corrupt_entry_is_refetched_and_repaired() {
        let mut store = MemoryStore::new();
        store.set("swapi-people-1", "{not json").unwrap();

        let value = CacheLayer::new(&mut store)
            .get(&luke(), || Ok(json!({"name": "Luke"})))
            .unwrap();

        assert_eq!(value["name"], "Luke");
        assert_eq!(
            store.get("swapi-people-1").unwrap().as_deref(),
            Some(r#"{"name":"Luke"}"#)
        );
    }

    #[test]
    fn clear_keeps_favorites() {
        let mut store = MemoryStore::new();
        store.set("swapi-people", "{}").unwrap();
        store.set("swapi-people-1", "{}").unwrap();
        store.set(FAVORITES_KEY, "[]").unwrap();

        let mut cache = CacheLayer::new(&mut store);
        assert_eq!(cache.entries().unwrap().len(), 2);
        assert_eq!(cache.clear().unwrap(), 2);
        assert!(cache.entries().unwrap().is_empty());

        assert_eq!(store.get(FAVORITES_KEY).unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn read_failure_counts_as_miss() {
        let mut store = UnreadableStore::default();
        store.inner.set("swapi-people-1", r#"{"name":"Stale"}"#).unwrap();
        let calls = Cell::new(0);

        let mut cache = CacheLayer::new(&mut store);
        assert_eq!(cache.lookup(&luke()), None);
        let value = cache
            .get(&luke(), || {
                calls.set(calls.get() + 1);
                Ok(json!({"name": "Luke"}))
            })
            .unwrap();

        assert_eq!(value["name"], "Luke");
        assert_eq!(calls.get(), 1);
        assert_eq!(
            store.inner.get("swapi-people-1").unwrap().as_deref(),
            Some(r#"{"name":"Luke"}"#)
        );
    }

    #[test]
    fn null_body_is_not_cached() {
        let mut store = MemoryStore::new();
        let calls = Cell::new(0);
        let fetch = || {
            calls.set(calls.get() + 1);
            Ok(Value::Null)
        };

        let mut cache = CacheLayer::new(&mut store);
        assert_eq!(cache.get(&luke(), fetch).unwrap(), Value::Null);
        assert_eq!(cache.get(&luke(), fetch).unwrap(), Value::Null);

        assert_eq!(calls.get(), 2);
        assert!(store.is_empty());
    }
}
