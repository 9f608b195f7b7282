//! # Favorites Store
//!
//! The favorites collection lives under one fixed key as a JSON array of
//! `{category, id, name}` records, in insertion order. Every mutation reads
//! the whole collection and rewrites it in full; there are no partial
//! updates.
//!
//! Invariant: at most one record per `(category, id)`.

use crate::primitives::FAVORITES_KEY;
use crate::storage::KeyValueStore;
use crate::{Category, FavoriteRecord, HolocronError, ResourceId};

/// Favorites view over a borrowed store.
#[derive(Debug)]
pub struct FavoritesStore<'a, S: KeyValueStore + ?Sized> {
    store: &'a mut S,
}

impl<'a, S: KeyValueStore + ?Sized> FavoritesStore<'a, S> {
    pub fn new(store: &'a mut S) -> Self {
        Self { store }
    }

    /// The whole collection, empty if nothing was ever stored.
    pub fn list(&self) -> Result<Vec<FavoriteRecord>, HolocronError> {
        match self.store.get(FAVORITES_KEY)? {
            Some(raw) => serde_json::from_str(&raw)
                .map_err(|e| HolocronError::Deserialization(format!("favorites: {}", e))),
            None => Ok(Vec::new()),
        }
    }

    pub fn is_favorite(&self, category: Category, id: ResourceId) -> Result<bool, HolocronError> {
        Ok(self.list()?.iter().any(|r| r.matches(category, id)))
    }

    /// Append a record unless one already exists for `(category, id)`.
    pub fn add(
        &mut self,
        category: Category,
        id: ResourceId,
        name: &str,
    ) -> Result<(), HolocronError> {
        let mut records = self.list()?;
        if records.iter().any(|r| r.matches(category, id)) {
            return Ok(());
        }
        records.push(FavoriteRecord::new(category, id, name));
        self.write(&records)?;
        tracing::info!(category = %category, id = %id, "favorite added");
        Ok(())
    }

    /// Remove any record for `(category, id)`.
    pub fn remove(&mut self, category: Category, id: ResourceId) -> Result<(), HolocronError> {
        let mut records = self.list()?;
        records.retain(|r| !r.matches(category, id));
        self.write(&records)?;
        tracing::info!(category = %category, id = %id, "favorite removed");
        Ok(())
    }

    /// Flip the favorite state. Returns `true` if the entity is now a favorite.
    pub fn toggle(
        &mut self,
        category: Category,
        id: ResourceId,
        name: &str,
    ) -> Result<bool, HolocronError> {
        if self.is_favorite(category, id)? {
            self.remove(category, id)?;
            Ok(false)
        } else {
            self.add(category, id, name)?;
            Ok(true)
        }
    }

    fn write(&mut self, records: &[FavoriteRecord]) -> Result<(), HolocronError> {
        let raw = serde_json::to_string(records)
            .map_err(|e| HolocronError::Serialization(e.to_string()))?;
        self.store.set(FAVORITES_KEY, &raw)
    }
}

// =============================================================================
// TESTS
// =============================================================================
