//! CSV export of the catalog, the ledger and the inventory listing.

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;

use stockledger_core::{DomainError, round_money};
use stockledger_inventory::{InventoryLine, InventorySession, Movement};
use stockledger_products::Product;

pub const INVENTORY_FILE: &str = "inventory.csv";
pub const MOVEMENTS_FILE: &str = "movements.csv";
pub const PRODUCTS_FILE: &str = "products.csv";

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("i/o error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// Paths written by [`export_all`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedFiles {
    pub inventory: PathBuf,
    pub movements: PathBuf,
    pub products: PathBuf,
}

/// Flat inventory row; money is rounded for display.
#[derive(Debug, Serialize)]
struct InventoryRow<'a> {
    code: &'a str,
    name: &'a str,
    category: &'a str,
    unit_price: String,
    min_threshold: u32,
    current_stock: i64,
    stock_value: String,
    status: &'static str,
}

impl<'a> From<&'a InventoryLine> for InventoryRow<'a> {
    fn from(line: &'a InventoryLine) -> Self {
        Self {
            code: line.code.as_str(),
            name: &line.name,
            category: &line.category,
            unit_price: round_money(line.unit_price).to_string(),
            min_threshold: line.min_threshold,
            current_stock: line.current_stock,
            stock_value: round_money(line.stock_value).to_string(),
            status: line.status.as_str(),
        }
    }
}

pub fn write_inventory_csv<W: Write>(writer: W, lines: &[InventoryLine]) -> Result<(), ExportError> {
    let mut csv = csv::Writer::from_writer(writer);
    for line in lines {
        csv.serialize(InventoryRow::from(line))?;
    }
    csv.flush().map_err(csv::Error::from)?;
    Ok(())
}

pub fn write_movements_csv<'m, W, I>(writer: W, movements: I) -> Result<(), ExportError>
where
    W: Write,
    I: IntoIterator<Item = &'m Movement>,
{
    let mut csv = csv::Writer::from_writer(writer);
    for movement in movements {
        csv.serialize(movement)?;
    }
    csv.flush().map_err(csv::Error::from)?;
    Ok(())
}

pub fn write_products_csv<W: Write>(writer: W, products: &[Product]) -> Result<(), ExportError> {
    let mut csv = csv::Writer::from_writer(writer);
    for product in products {
        csv.serialize(product.to_record())?;
    }
    csv.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// Write all three CSV files into `dir`, creating it if needed.
pub fn export_all(session: &InventorySession, dir: &Path) -> Result<ExportedFiles, ExportError> {
    std::fs::create_dir_all(dir).map_err(|source| ExportError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    let files = ExportedFiles {
        inventory: dir.join(INVENTORY_FILE),
        movements: dir.join(MOVEMENTS_FILE),
        products: dir.join(PRODUCTS_FILE),
    };

    let lines = session.inventory_lines()?;
    write_inventory_csv(create(&files.inventory)?, &lines)?;
    write_movements_csv(create(&files.movements)?, session.ledger().all())?;
    write_products_csv(create(&files.products)?, session.catalog().products())?;

    tracing::info!(dir = %dir.display(), "csv export written");
    Ok(files)
}

fn create(path: &Path) -> Result<File, ExportError> {
    File::create(path).map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })
}
