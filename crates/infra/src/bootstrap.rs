//! Session lifecycle: open from a store at start-up, save at the end.

use thiserror::Error;
use tracing::{error, info, warn};

use stockledger_inventory::{InventorySession, RestoreAnomaly};

use crate::config::{AppConfig, LoadErrorPolicy};
use crate::snapshot_store::{SnapshotStore, StoreError};

/// A session ready for use, with whatever the restore found.
#[derive(Debug)]
pub struct OpenedSession {
    pub session: InventorySession,
    pub anomalies: Vec<RestoreAnomaly>,
    /// True when the session started empty because loading failed.
    pub recovered_from_error: bool,
}

#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("saved data has {} anomalies and strict_load is enabled", .0.len())]
    Anomalies(Vec<RestoreAnomaly>),
}

/// Load the saved snapshot and restore a session from it.
///
/// Nothing saved yet gives an empty session. A load failure either aborts or
/// continues with an empty session, per [`AppConfig::on_load_error`].
pub fn open_session<S>(store: &S, config: &AppConfig) -> Result<OpenedSession, BootstrapError>
where
    S: SnapshotStore + ?Sized,
{
    match store.load() {
        Ok(Some(snapshot)) => {
            let (session, anomalies) = InventorySession::restore(snapshot);
            if config.strict_load && !anomalies.is_empty() {
                return Err(BootstrapError::Anomalies(anomalies));
            }
            if !anomalies.is_empty() {
                warn!(count = anomalies.len(), "session opened with anomalies");
            }
            Ok(OpenedSession {
                session,
                anomalies,
                recovered_from_error: false,
            })
        }
        Ok(None) => {
            info!("no saved data; starting with an empty session");
            Ok(OpenedSession {
                session: InventorySession::new(),
                anomalies: Vec::new(),
                recovered_from_error: false,
            })
        }
        Err(e) => match config.on_load_error {
            LoadErrorPolicy::Abort => {
                error!(error = %e, "failed to load saved data");
                Err(e.into())
            }
            LoadErrorPolicy::StartEmpty => {
                error!(error = %e, "failed to load saved data; continuing with an empty session");
                Ok(OpenedSession {
                    session: InventorySession::new(),
                    anomalies: Vec::new(),
                    recovered_from_error: true,
                })
            }
        },
    }
}

/// Save the session's snapshot.
pub fn close_session<S>(store: &S, session: &InventorySession) -> Result<(), StoreError>
where
    S: SnapshotStore + ?Sized,
{
    store.save(&session.snapshot()).inspect_err(|e| {
        error!(error = %e, "failed to save session");
    })
}
