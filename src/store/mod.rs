//! # Shoe Persistence Backend
//!
//! A single document collection keyed by `ShoeId`. Handlers only see the
//! `ShoeStore` trait; the concrete backend is picked from the connection
//! string at startup.
//!
//! | Connection string  | Backend            |
//! |--------------------|--------------------|
//! | `memory://`        | `MemoryShoeStore`  |
//! | `file://<path>`    | `FileShoeStore`    |

mod checksum;
mod collection;
mod errors;
mod file;
mod memory;
mod record;

use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;
use std::sync::Arc;

use crate::shoe::{Shoe, ShoeFields, ShoeId};

pub use errors::{StoreError, StoreResult};
pub use file::FileShoeStore;
pub use memory::MemoryShoeStore;

/// Boxed future returned by store operations
pub type StoreFuture<'a, T> = Pin<Box<dyn Future<Output = StoreResult<T>> + Send + 'a>>;

/// Document collection contract consumed by the resource handlers
pub trait ShoeStore: Send + Sync {
    /// Every stored shoe in storage order
    fn find_all(&self) -> StoreFuture<'_, Vec<Shoe>>;

    /// `Ok(None)` when no shoe has this id
    fn find_by_id(&self, id: ShoeId) -> StoreFuture<'_, Option<Shoe>>;

    /// Store a new shoe under a fresh id with both timestamps set to now
    fn insert(&self, fields: ShoeFields) -> StoreFuture<'_, Shoe>;

    /// Persist a mutated shoe, refreshing `updated_at`
    fn save(&self, shoe: Shoe) -> StoreFuture<'_, Shoe>;

    fn delete<'a>(&'a self, shoe: &'a Shoe) -> StoreFuture<'a, ()>;

    /// Short backend label for logs
    fn backend_name(&self) -> &'static str;
}

/// Where the collection lives, parsed from a connection string
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreLocation {
    Memory,
    File(PathBuf),
}

impl StoreLocation {
    pub fn parse(connection_string: &str) -> StoreResult<Self> {
        let trimmed = connection_string.trim();
        if trimmed == "memory://" || trimmed == "memory" {
            return Ok(StoreLocation::Memory);
        }
        match trimmed.strip_prefix("file://") {
            Some(path) if !path.is_empty() => Ok(StoreLocation::File(PathBuf::from(path))),
            _ => Err(StoreError::UnsupportedConnection(connection_string.to_string())),
        }
    }
}

/// Open the backend named by `connection_string`
pub fn open_store(connection_string: &str) -> StoreResult<Arc<dyn ShoeStore>> {
    match StoreLocation::parse(connection_string)? {
        StoreLocation::Memory => Ok(Arc::new(MemoryShoeStore::new())),
        StoreLocation::File(path) => Ok(Arc::new(FileShoeStore::open(path)?)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_memory() {
        assert_eq!(StoreLocation::parse("memory://").unwrap(), StoreLocation::Memory);
        assert_eq!(StoreLocation::parse(" memory ").unwrap(), StoreLocation::Memory);
    }

    #[test]
    fn test_parse_file() {
        assert_eq!(
            StoreLocation::parse("file:///var/lib/shoebox/shoes.log").unwrap(),
            StoreLocation::File(PathBuf::from("/var/lib/shoebox/shoes.log"))
        );
        assert_eq!(
            StoreLocation::parse("file://data/shoes.log").unwrap(),
            StoreLocation::File(PathBuf::from("data/shoes.log"))
        );
    }

    #[test]
    fn test_parse_rejects_unknown_schemes() {
        for bad in ["", "file://", "mongodb://localhost:27017/shoes", "postgres://x"] {
            assert!(
                matches!(StoreLocation::parse(bad), Err(StoreError::UnsupportedConnection(_))),
                "{:?} should be rejected",
                bad
            );
        }
    }

    #[test]
    fn test_open_store_picks_backend() {
        assert_eq!(open_store("memory://").unwrap().backend_name(), "memory");

        let dir = TempDir::new().unwrap();
        let conn = format!("file://{}", dir.path().join("shoes.log").display());
        assert_eq!(open_store(&conn).unwrap().backend_name(), "file");
    }
}
