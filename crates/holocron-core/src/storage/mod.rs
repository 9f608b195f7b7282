//! # Key-Value Storage
//!
//! The persistent string-keyed store behind the cache and the favorites.
//!
//! Two backends are provided:
//! - `MemoryStore`: `BTreeMap`-backed, volatile (tests, ephemeral runs)
//! - `RedbStore`: disk-backed via redb, survives restarts

mod memory;
mod redb_store;

pub use memory::MemoryStore;
pub use redb_store::RedbStore;

use crate::HolocronError;

/// A string-keyed store of string values.
///
/// Writes take `&mut self`: a store is owned by exactly one `AppContext`,
/// and sharing across threads is the caller's business.
pub trait KeyValueStore {
    /// Read the value stored under `key`, if any.
    fn get(&self, key: &str) -> Result<Option<String>, HolocronError>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: &str) -> Result<(), HolocronError>;

    /// Delete `key`. Deleting a missing key is not an error.
    fn remove(&mut self, key: &str) -> Result<(), HolocronError>;

    /// All keys starting with `prefix`, in ascending order.
    fn keys_with_prefix(&self, prefix: &str) -> Result<Vec<String>, HolocronError>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get(&self, key: &str) -> Result<Option<String>, HolocronError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), HolocronError> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<(), HolocronError> {
        (**self).remove(key)
    }

    fn keys_with_prefix(&self, prefix: &str) -> Result<Vec<String>, HolocronError> {
        (**self).keys_with_prefix(prefix)
    }
}
