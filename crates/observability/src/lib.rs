//! Tracing and logging (shared setup).

/// Initialize process-wide observability (tracing/logging).
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init(config: &LoggingConfig) {
    tracing::init(config);
}

/// Tracing subscriber installation.
pub mod tracing;

/// Logging configuration.
pub mod logging;

pub use logging::{LogFormat, LoggingConfig};
