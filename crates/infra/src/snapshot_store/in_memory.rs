//! In-memory snapshot store.
//!
//! Useful for tests and for wiring a session without touching the file system.

use std::sync::RwLock;

use stockledger_inventory::InventorySnapshot;

use super::r#trait::{SnapshotStore, StoreError};

/// In-memory snapshot store.
///
/// Intended for tests/dev.
#[derive(Debug, Default)]
pub struct InMemorySnapshotStore {
    inner: RwLock<Option<InventorySnapshot>>,
}

impl InMemorySnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_snapshot(snapshot: InventorySnapshot) -> Self {
        Self {
            inner: RwLock::new(Some(snapshot)),
        }
    }
}

impl SnapshotStore for InMemorySnapshotStore {
    fn load(&self) -> Result<Option<InventorySnapshot>, StoreError> {
        let guard = self.inner.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(guard.clone())
    }

    fn save(&self, snapshot: &InventorySnapshot) -> Result<(), StoreError> {
        let mut guard = self.inner.write().map_err(|_| StoreError::LockPoisoned)?;
        *guard = Some(snapshot.clone());
        Ok(())
    }
}
