//! Durable snapshot storage boundary.
//!
//! The domain hands over plain records (`InventorySnapshot`); stores decide
//! where they live. Sessions are loaded once at start-up and saved once at
//! the end of a command.

pub mod in_memory;
pub mod json_file;
pub mod r#trait;

pub use in_memory::InMemorySnapshotStore;
pub use json_file::JsonFileStore;
pub use r#trait::{SnapshotStore, StoreError};
