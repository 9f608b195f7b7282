//! # redb-backed Store
//!
//! A disk-backed key-value store using the redb embedded database.
//!
//! Plays the role browser local storage plays for a web page: values
//! survive restarts and are scoped to one database file. Every write is its
//! own ACID transaction, so a crash never leaves a half-written favorites
//! collection behind.
//!
//! redb holds an exclusive lock on the file; a second process opening the
//! same database fails instead of racing the first.

use super::KeyValueStore;
use crate::HolocronError;
use redb::{Database, ReadableDatabase, TableDefinition};
use std::fmt::Display;
use std::path::Path;

/// Table for all entries: key string -> value string
const ENTRIES: TableDefinition<&str, &str> = TableDefinition::new("entries");

fn storage_err(e: impl Display) -> HolocronError {
    HolocronError::Storage(e.to_string())
}

/// A disk-backed store using redb.
pub struct RedbStore {
    db: Database,
}

impl std::fmt::Debug for RedbStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedbStore").finish_non_exhaustive()
    }
}

impl RedbStore {
    /// Open or create a store at the given path.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, HolocronError> {
        let db = Database::create(path.as_ref()).map_err(storage_err)?;

        // Create the table up front so read transactions never miss it
        {
            let write_txn = db.begin_write().map_err(storage_err)?;
            let _ = write_txn.open_table(ENTRIES).map_err(storage_err)?;
            write_txn.commit().map_err(storage_err)?;
        }

        Ok(Self { db })
    }

    /// Compact the database file, releasing pages freed by removals.
    pub fn compact(&mut self) -> Result<(), HolocronError> {
        self.db.compact().map_err(storage_err)?;
        Ok(())
    }
}

impl KeyValueStore for RedbStore {
    fn get(&self, key: &str) -> Result<Option<String>, HolocronError> {
        let read_txn = self.db.begin_read().map_err(storage_err)?;
        let table = read_txn.open_table(ENTRIES).map_err(storage_err)?;
        let value = table
            .get(key)
            .map_err(storage_err)?
            .map(|guard| guard.value().to_string());
        Ok(value)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), HolocronError> {
        let write_txn = self.db.begin_write().map_err(storage_err)?;
        {
            let mut table = write_txn.open_table(ENTRIES).map_err(storage_err)?;
            table.insert(key, value).map_err(storage_err)?;
        }
        write_txn.commit().map_err(storage_err)
    }

    fn remove(&mut self, key: &str) -> Result<(), HolocronError> {
        let write_txn = self.db.begin_write().map_err(storage_err)?;
        {
            let mut table = write_txn.open_table(ENTRIES).map_err(storage_err)?;
            table.remove(key).map_err(storage_err)?;
        }
        write_txn.commit().map_err(storage_err)
    }

    fn keys_with_prefix(&self, prefix: &str) -> Result<Vec<String>, HolocronError> {
        let read_txn = self.db.begin_read().map_err(storage_err)?;
        let table = read_txn.open_table(ENTRIES).map_err(storage_err)?;

        let mut keys = Vec::new();
        for entry in table.range(prefix..).map_err(storage_err)? {
            let (key, _) = entry.map_err(storage_err)?;
            let key = key.value();
            if !key.starts_with(prefix) {
                break;
            }
            keys.push(key.to_string());
        }
        Ok(keys)
    }
}

// =============================================================================
// TESTS
// =============================================================================
