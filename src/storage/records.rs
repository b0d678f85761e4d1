//! Record store
//!
//! Keeps every signup as one element of a pretty-printed JSON array in a
//! single file. The file is rewritten in full on each append.

use log::{info, warn};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

use crate::error::StorageError;
use crate::storage::filesystem::{ensure_parent_dir, write_atomic};
use crate::storage::models::UserRecord;

/// File-backed, append-only collection of [`UserRecord`]s.
///
/// Appends made through the same store are serialized by an internal lock,
/// so concurrent signups in one process never lose each other's records.
/// Nothing guards against a second process writing the same file.
#[derive(Debug)]
pub struct RecordStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl RecordStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads every stored record in signup order.
    ///
    /// A missing, unreadable or corrupt document reads as an empty collection.
    pub async fn load(&self) -> Vec<UserRecord> {
        if let Err(e) = ensure_parent_dir(&self.path).await {
            warn!("Record directory unavailable: {}", e);
            return Vec::new();
        }

        match self.read_document().await {
            Ok(records) => records,
            Err(e) => {
                warn!("Failed to read records: {}", e);
                Vec::new()
            }
        }
    }

    /// Missing and corrupt documents are empty; any other read failure is
    /// an error, so an append never overwrites a document it could not read.
    async fn read_document(&self) -> Result<Vec<UserRecord>, StorageError> {
        let contents = match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(StorageError::io(&self.path, e)),
        };

        match serde_json::from_str(&contents) {
            Ok(records) => Ok(records),
            Err(e) => {
                warn!(
                    "Ignoring unparseable record document {}: {}",
                    self.path.display(),
                    e
                );
                Ok(Vec::new())
            }
        }
    }

    /// Appends `record` after every existing one and persists the collection.
    ///
    /// Returns the number of stored records after the append.
    pub async fn append(&self, record: UserRecord) -> Result<usize, StorageError> {
        let _guard = self.write_lock.lock().await;

        ensure_parent_dir(&self.path).await?;

        let mut records = self.read_document().await?;
        records.push(record);

        let encoded = serde_json::to_string_pretty(&records)?;
        write_atomic(&self.path, encoded.as_bytes()).await?;

        info!(
            "Appended record to {} ({} total)",
            self.path.display(),
            records.len()
        );

        Ok(records.len())
    }
}
