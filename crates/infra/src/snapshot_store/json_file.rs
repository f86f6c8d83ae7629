//! JSON file snapshot store.
//!
//! Default layout on disk (file names come from the config):
//! - `<data_dir>/products.json`: array of product records;
//! - `<data_dir>/movements.json`: array of movements in ledger order.
//!
//! Each file is replaced atomically on save.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;

use stockledger_inventory::{InventorySnapshot, Movement};
use stockledger_products::ProductRecord;

use super::r#trait::{SnapshotStore, StoreError};
use crate::config::AppConfig;

/// Snapshot store backed by two pretty-printed JSON files.
///
/// Products and movements live in separate arrays. A missing file loads as
/// an empty collection; when both are missing nothing was saved yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonFileStore {
    products_path: PathBuf,
    movements_path: PathBuf,
}

impl JsonFileStore {
    pub fn new(products_path: impl Into<PathBuf>, movements_path: impl Into<PathBuf>) -> Self {
        Self {
            products_path: products_path.into(),
            movements_path: movements_path.into(),
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.products_path(), config.movements_path())
    }

    pub fn products_path(&self) -> &Path {
        &self.products_path
    }

    pub fn movements_path(&self) -> &Path {
        &self.movements_path
    }
}

impl SnapshotStore for JsonFileStore {
    fn load(&self) -> Result<Option<InventorySnapshot>, StoreError> {
        let products: Option<Vec<ProductRecord>> = read_json(&self.products_path)?;
        let movements: Option<Vec<Movement>> = read_json(&self.movements_path)?;

        if products.is_none() && movements.is_none() {
            return Ok(None);
        }

        let snapshot = InventorySnapshot {
            products: products.unwrap_or_default(),
            movements: movements.unwrap_or_default(),
        };
        tracing::info!(
            products = snapshot.products.len(),
            movements = snapshot.movements.len(),
            "snapshot loaded"
        );
        Ok(Some(snapshot))
    }

    fn save(&self, snapshot: &InventorySnapshot) -> Result<(), StoreError> {
        write_json(&self.products_path, &snapshot.products)?;
        write_json(&self.movements_path, &snapshot.movements)?;
        tracing::info!(
            products = snapshot.products.len(),
            movements = snapshot.movements.len(),
            "snapshot saved"
        );
        Ok(())
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, StoreError> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(StoreError::Io {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    serde_json::from_str(&contents)
        .map(Some)
        .map_err(|source| StoreError::Decode {
            path: path.to_path_buf(),
            source,
        })
}

/// Write to a sibling temp file, then rename over the target.
fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), StoreError> {
    let io_err = |source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_err)?;
    }

    let mut bytes = serde_json::to_vec_pretty(value)?;
    bytes.push(b'\n');

    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);

    fs::write(&tmp, &bytes).map_err(io_err)?;
    fs::rename(&tmp, path).map_err(io_err)
}
