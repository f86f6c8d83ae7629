//! Configuration loading and representation.
//!
//! Resolution order: explicit path, then `STOCKLEDGER_CONFIG`, then
//! `stockledger.toml` in the working directory, then built-in defaults.
//! `STOCKLEDGER_DATA_DIR` overrides `data_dir` afterwards.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use stockledger_observability::LoggingConfig;

/// Environment variable naming a config file.
pub const CONFIG_ENV: &str = "STOCKLEDGER_CONFIG";
/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV: &str = "STOCKLEDGER_DATA_DIR";
/// Config file picked up from the working directory when present.
pub const DEFAULT_CONFIG_FILE: &str = "stockledger.toml";

/// What to do when saved data exists but cannot be loaded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LoadErrorPolicy {
    /// Stop: the saved data must be fixed first.
    #[default]
    Abort,
    /// Log the failure and continue with an empty in-memory session.
    StartEmpty,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    pub products_file: String,
    pub movements_file: String,
    pub export_dir: PathBuf,
    pub on_load_error: LoadErrorPolicy,
    /// Refuse to open a snapshot that restores with anomalies.
    pub strict_load: bool,
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            products_file: "products.json".to_string(),
            movements_file: "movements.json".to_string(),
            export_dir: PathBuf::from("reports"),
            on_load_error: LoadErrorPolicy::default(),
            strict_load: false,
            logging: LoggingConfig::default(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

impl AppConfig {
    pub fn from_toml_str(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    /// Resolve configuration from the process environment.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let env_config = std::env::var_os(CONFIG_ENV).map(PathBuf::from);
        let env_data_dir = std::env::var_os(DATA_DIR_ENV).map(PathBuf::from);
        Self::load_with(explicit, env_config, env_data_dir, Path::new(DEFAULT_CONFIG_FILE))
    }

    /// Resolution with the environment passed in explicitly.
    ///
    /// An explicit or env-named file must exist; the fallback file is optional.
    pub fn load_with(
        explicit: Option<&Path>,
        env_config: Option<PathBuf>,
        env_data_dir: Option<PathBuf>,
        fallback: &Path,
    ) -> Result<Self, ConfigError> {
        let mut config = match explicit.map(Path::to_path_buf).or(env_config) {
            Some(path) => Self::from_file(&path)?,
            None if fallback.is_file() => Self::from_file(fallback)?,
            None => {
                tracing::debug!("no config file found; using defaults");
                Self::default()
            }
        };

        if let Some(dir) = env_data_dir {
            config.data_dir = dir;
        }
        Ok(config)
    }

    fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "config loaded");
        Ok(config)
    }

    pub fn products_path(&self) -> PathBuf {
        self.data_dir.join(&self.products_file)
    }

    pub fn movements_path(&self) -> PathBuf {
        self.data_dir.join(&self.movements_file)
    }
}
