//! In-process shoe store

use std::sync::RwLock;

use crate::shoe::{Shoe, ShoeFields, ShoeId};

use super::collection::Collection;
use super::errors::{StoreError, StoreResult};
use super::{ShoeStore, StoreFuture};

/// Volatile store backed by a locked in-memory collection.
///
/// Used for `memory://` connections and throughout the tests.
#[derive(Debug, Default)]
pub struct MemoryShoeStore {
    collection: RwLock<Collection>,
}

impl MemoryShoeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored shoes
    pub fn len(&self) -> StoreResult<usize> {
        Ok(self.read()?.len())
    }

    pub fn is_empty(&self) -> StoreResult<bool> {
        Ok(self.len()? == 0)
    }

    fn read(&self) -> StoreResult<std::sync::RwLockReadGuard<'_, Collection>> {
        self.collection.read().map_err(|_| StoreError::LockPoisoned)
    }

    fn write(&self) -> StoreResult<std::sync::RwLockWriteGuard<'_, Collection>> {
        self.collection.write().map_err(|_| StoreError::LockPoisoned)
    }
}

impl ShoeStore for MemoryShoeStore {
    fn find_all(&self) -> StoreFuture<'_, Vec<Shoe>> {
        Box::pin(async move { Ok(self.read()?.all()) })
    }

    fn find_by_id(&self, id: ShoeId) -> StoreFuture<'_, Option<Shoe>> {
        Box::pin(async move { Ok(self.read()?.get(&id)) })
    }

    fn insert(&self, fields: ShoeFields) -> StoreFuture<'_, Shoe> {
        Box::pin(async move {
            let mut collection = self.write()?;
            let shoe = collection.prepare(fields);
            collection.put(shoe.clone());
            Ok(shoe)
        })
    }

    fn save(&self, shoe: Shoe) -> StoreFuture<'_, Shoe> {
        Box::pin(async move {
            let mut collection = self.write()?;
            let saved = collection.prepare_save(shoe)?;
            collection.put(saved.clone());
            Ok(saved)
        })
    }

    fn delete<'a>(&'a self, shoe: &'a Shoe) -> StoreFuture<'a, ()> {
        Box::pin(async move {
            self.write()?.remove(&shoe.id)?;
            Ok(())
        })
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
