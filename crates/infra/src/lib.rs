//! Infrastructure layer: configuration, snapshot storage, session bootstrap, CSV export.

pub mod bootstrap;
pub mod config;
pub mod export;
pub mod snapshot_store;

pub use bootstrap::{BootstrapError, OpenedSession, close_session, open_session};
pub use config::{AppConfig, ConfigError, LoadErrorPolicy};
pub use export::{ExportError, ExportedFiles, export_all};
pub use snapshot_store::{InMemorySnapshotStore, JsonFileStore, SnapshotStore, StoreError};
