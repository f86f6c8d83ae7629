//! Plain-record snapshot of a session, for persistence collaborators.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use stockledger_core::ProductCode;
use stockledger_products::ProductRecord;

use crate::movement::Movement;

/// Catalog and ledger as plain serde records.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventorySnapshot {
    #[serde(default)]
    pub products: Vec<ProductRecord>,
    #[serde(default)]
    pub movements: Vec<Movement>,
}

/// Inconsistency found while restoring a snapshot.
///
/// Restoring never fails on these; they are logged and handed back so the
/// caller can decide whether to keep working.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RestoreAnomaly {
    #[error("product {code} appears more than once; later record ignored")]
    DuplicateProduct { code: ProductCode },

    #[error("product {code}: {problem}")]
    InvalidProduct { code: ProductCode, problem: String },

    #[error("movement #{index} references unknown product {code}")]
    UnknownProduct { index: usize, code: ProductCode },

    #[error("movement #{index} for {code} has zero quantity")]
    ZeroQuantity { index: usize, code: ProductCode },

    #[error("movement #{index} drives stock of {code} negative ({stock})")]
    NegativeStock {
        index: usize,
        code: ProductCode,
        stock: i64,
    },
}
