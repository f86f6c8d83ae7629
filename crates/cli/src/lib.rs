//! `stockledger` command-line front end.
//!
//! Each invocation opens the session from the configured store, runs one
//! command and saves the session only when a mutating command succeeded.

pub mod args;
pub mod commands;

use std::io::Write;

use anyhow::Context as _;
use chrono::{Local, NaiveDate};

use stockledger_infra::{AppConfig, ConfigError, JsonFileStore, OpenedSession, close_session, open_session};

pub use args::{Cli, Command, MovementCommand, OutputFormat, ProductCommand};
pub use commands::{CommandError, Context, execute};

/// Load configuration, then apply command-line overrides.
pub fn resolve_config(cli: &Cli) -> Result<AppConfig, ConfigError> {
    let mut config = AppConfig::load(cli.config.as_deref())?;
    if let Some(dir) = &cli.data_dir {
        config.data_dir = dir.clone();
    }
    Ok(config)
}

pub fn run<W: Write>(cli: &Cli, config: &AppConfig, out: &mut W) -> anyhow::Result<()> {
    run_on(cli, config, Local::now().date_naive(), out)
}

/// [`run`] with a fixed date for movements recorded without `--date`.
pub fn run_on<W: Write>(cli: &Cli, config: &AppConfig, today: NaiveDate, out: &mut W) -> anyhow::Result<()> {
    let store = JsonFileStore::from_config(config);
    let mut opened = open_session(&store, config).context("failed to open inventory session")?;
    if let Some(notice) = open_notice(&opened) {
        eprintln!("{notice}");
    }

    let ctx = Context {
        format: cli.format,
        today,
        export_dir: &config.export_dir,
    };
    if let Err(e) = execute(&cli.command, &mut opened.session, &ctx, out) {
        if let CommandError::Domain(rejected) = &e {
            tracing::info!(kind = rejected.kind(), "request rejected; nothing saved");
        }
        return Err(e.into());
    }

    if cli.command.is_mutating() {
        close_session(&store, &opened.session).context("failed to save inventory session")?;
        tracing::debug!(movements = opened.session.ledger().len(), "session saved");
    }
    Ok(())
}

/// One-line notice for a session that did not open cleanly.
///
/// Goes to stderr so stdout stays parseable in JSON mode.
pub fn open_notice(opened: &OpenedSession) -> Option<String> {
    if opened.recovered_from_error {
        return Some("warning: saved data could not be loaded; starting with an empty inventory".to_string());
    }
    match opened.anomalies.len() {
        0 => None,
        n => Some(format!(
            "warning: saved data restored with {n} anomalies (first: {})",
            opened.anomalies[0]
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stockledger_core::ProductCode;
    use stockledger_inventory::{InventorySession, RestoreAnomaly};

    fn opened(anomalies: Vec<RestoreAnomaly>, recovered_from_error: bool) -> OpenedSession {
        OpenedSession {
            session: InventorySession::new(),
            anomalies,
            recovered_from_error,
        }
    }

    #[test]
    fn clean_open_has_no_notice() {
        assert_eq!(open_notice(&opened(Vec::new(), false)), None);
    }

    #[test]
    fn anomalies_and_recovery_are_announced() {
        let anomaly = RestoreAnomaly::DuplicateProduct {
            code: ProductCode::parse("A").unwrap(),
        };
        let notice = open_notice(&opened(vec![anomaly.clone(), anomaly], false)).unwrap();
        assert!(notice.starts_with("warning: saved data restored with 2 anomalies"), "{notice}");

        let notice = open_notice(&opened(Vec::new(), true)).unwrap();
        assert!(notice.contains("empty inventory"), "{notice}");
    }
}
