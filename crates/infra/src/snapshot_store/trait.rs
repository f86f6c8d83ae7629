//! Snapshot store trait and its error type.
//!
//! A store only moves whole snapshots: it never validates records. Consistency
//! checks happen when the session is restored from what the store returns.

use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;

use stockledger_inventory::InventorySnapshot;

/// Failure to read or write stored snapshots.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The file could not be read, written or renamed.
    #[error("i/o error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file exists but does not hold the expected records.
    #[error("failed to decode {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to encode snapshot: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("snapshot store lock poisoned")]
    LockPoisoned,
}

/// Load/save boundary for session snapshots.
pub trait SnapshotStore {
    /// Load the last saved snapshot; `None` when nothing was ever saved.
    fn load(&self) -> Result<Option<InventorySnapshot>, StoreError>;

    /// Replace the stored snapshot.
    fn save(&self, snapshot: &InventorySnapshot) -> Result<(), StoreError>;
}

impl<S> SnapshotStore for Arc<S>
where
    S: SnapshotStore + ?Sized,
{
    fn load(&self) -> Result<Option<InventorySnapshot>, StoreError> {
        (**self).load()
    }

    fn save(&self, snapshot: &InventorySnapshot) -> Result<(), StoreError> {
        (**self).save(snapshot)
    }
}
