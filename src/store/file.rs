//! Append-only file-backed shoe store
//!
//! Every mutation appends one full-document record (or a tombstone) to a
//! single log file and syncs it before the call returns. On open the log is
//! replayed into memory; the latest record for an id wins and a tombstone
//! removes it. Any checksum or framing failure aborts the open.
//!
//! File I/O runs on the blocking pool, never on a runtime worker.

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use tracing::{debug, error, info};

use crate::shoe::{Shoe, ShoeFields, ShoeId};

use super::collection::Collection;
use super::errors::{StoreError, StoreResult};
use super::record::{LogRecord, RecordKind};
use super::{ShoeStore, StoreFuture};

struct LogState {
    file: File,
    /// Length of the log up to the last fully synced record
    offset: u64,
    /// Set when a failed write could not be rolled back; refuses further writes
    torn: bool,
    collection: Collection,
}

impl LogState {
    fn append(&mut self, record: &LogRecord) -> StoreResult<()> {
        if self.torn {
            return Err(StoreError::corruption(
                self.offset,
                "log tail holds a partial record; refusing further writes",
            ));
        }

        let bytes = record.serialize();
        let written = self
            .file
            .write_all(&bytes)
            .and_then(|_| self.file.flush())
            .and_then(|_| self.file.sync_data());

        if let Err(e) = written {
            self.rollback();
            return Err(StoreError::io(
                format!("failed to append record for {}", record.id),
                e,
            ));
        }

        debug!(id = %record.id, offset = self.offset, len = bytes.len(), "record appended");
        self.offset += bytes.len() as u64;
        Ok(())
    }

    /// Cut the log back to the last good record after a failed write
    fn rollback(&mut self) {
        let restored = self
            .file
            .set_len(self.offset)
            .and_then(|_| self.file.sync_data());

        if let Err(e) = restored {
            error!(offset = self.offset, error = %e, "failed to roll back torn log tail");
            self.torn = true;
        }
    }

    fn insert(&mut self, fields: ShoeFields) -> StoreResult<Shoe> {
        let shoe = self.collection.prepare(fields);
        self.append(&LogRecord::put(&shoe)?)?;
        self.collection.put(shoe.clone());
        Ok(shoe)
    }

    fn save(&mut self, shoe: Shoe) -> StoreResult<Shoe> {
        let saved = self.collection.prepare_save(shoe)?;
        self.append(&LogRecord::put(&saved)?)?;
        self.collection.put(saved.clone());
        Ok(saved)
    }

    fn delete(&mut self, id: ShoeId) -> StoreResult<()> {
        if self.collection.get(&id).is_none() {
            return Err(StoreError::Missing(id));
        }
        self.append(&LogRecord::tombstone(id))?;
        self.collection.remove(&id)?;
        Ok(())
    }
}

/// Durable store over a single document log file
pub struct FileShoeStore {
    path: PathBuf,
    state: Arc<Mutex<LogState>>,
}

impl FileShoeStore {
    /// Open or create the log at `path`, creating parent directories.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| {
                StoreError::io(
                    format!("failed to create store directory {}", parent.display()),
                    e,
                )
            })?;
        }

        let file = OpenOptions::new()
            .create(true)
            .read(true)
            .append(true)
            .open(&path)
            .map_err(|e| StoreError::io(format!("failed to open {}", path.display()), e))?;

        let data = fs::read(&path)
            .map_err(|e| StoreError::io(format!("failed to read {}", path.display()), e))?;
        let collection = Self::replay(&data)?;

        info!(
            path = %path.display(),
            documents = collection.len(),
            bytes = data.len(),
            "document log replayed"
        );

        Ok(Self {
            path,
            state: Arc::new(Mutex::new(LogState {
                file,
                offset: data.len() as u64,
                torn: false,
                collection,
            })),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn replay(data: &[u8]) -> StoreResult<Collection> {
        let mut collection = Collection::new();
        let mut cursor = 0usize;

        while cursor < data.len() {
            let (record, consumed) = LogRecord::deserialize(&data[cursor..], cursor as u64)?;
            match record.kind {
                RecordKind::Put => {
                    let shoe = record.document().map_err(|e| {
                        StoreError::corruption(cursor as u64, format!("undecodable document: {}", e))
                    })?;
                    if shoe.id != record.id {
                        return Err(StoreError::corruption(
                            cursor as u64,
                            format!("record id {} disagrees with document id {}", record.id, shoe.id),
                        ));
                    }
                    collection.put(shoe);
                }
                RecordKind::Tombstone => {
                    // Deleting an already-absent id is harmless during replay
                    let _ = collection.remove(&record.id);
                }
            }
            cursor += consumed;
        }

        Ok(collection)
    }

    /// Run `op` under the log lock on the blocking pool
    fn run<T, F>(&self, op: F) -> StoreFuture<'_, T>
    where
        T: Send + 'static,
        F: FnOnce(&mut LogState) -> StoreResult<T> + Send + 'static,
    {
        let state = Arc::clone(&self.state);
        Box::pin(async move {
            tokio::task::spawn_blocking(move || {
                let mut guard = state.lock().map_err(|_| StoreError::LockPoisoned)?;
                op(&mut guard)
            })
            .await
            .map_err(|e| StoreError::Task(e.to_string()))?
        })
    }
}

impl ShoeStore for FileShoeStore {
    fn find_all(&self) -> StoreFuture<'_, Vec<Shoe>> {
        self.run(|state| Ok(state.collection.all()))
    }

    fn find_by_id(&self, id: ShoeId) -> StoreFuture<'_, Option<Shoe>> {
        self.run(move |state| Ok(state.collection.get(&id)))
    }

    fn insert(&self, fields: ShoeFields) -> StoreFuture<'_, Shoe> {
        self.run(move |state| state.insert(fields))
    }

    fn save(&self, shoe: Shoe) -> StoreFuture<'_, Shoe> {
        self.run(move |state| state.save(shoe))
    }

    fn delete<'a>(&'a self, shoe: &'a Shoe) -> StoreFuture<'a, ()> {
        let id = shoe.id;
        self.run(move |state| state.delete(id))
    }

    fn backend_name(&self) -> &'static str {
        "file"
    }
}
