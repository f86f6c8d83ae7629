//! Shortage detection: products whose derived stock sits below their minimum.
//!
//! The same predicate drives the `SHORTAGE` flag of the inventory listing.

use serde::{Deserialize, Serialize};

use stockledger_core::ProductCode;

use crate::stock::StockCalculator;

/// True when `current_stock` is strictly below `min_threshold`.
///
/// Stock equal to the minimum is not a shortage.
pub fn is_below_minimum(current_stock: i64, min_threshold: u32) -> bool {
    current_stock < i64::from(min_threshold)
}

/// A product whose derived stock is below its minimum threshold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shortage {
    pub code: ProductCode,
    pub name: String,
    pub current_stock: i64,
    pub min_threshold: u32,
}

impl Shortage {
    /// Units needed to get back to the minimum threshold.
    pub fn deficit(&self) -> i64 {
        i64::from(self.min_threshold) - self.current_stock
    }
}

/// Compares derived stock to catalog minimums. Recomputed on every call.
#[derive(Debug, Clone, Copy)]
pub struct ShortageDetector<'a> {
    calculator: StockCalculator<'a>,
}

impl<'a> ShortageDetector<'a> {
    pub fn new(calculator: StockCalculator<'a>) -> Self {
        Self { calculator }
    }

    /// Products with `current_stock < min_threshold`, in catalog order.
    pub fn find_shortages(&self) -> Vec<Shortage> {
        self.calculator
            .catalog()
            .products()
            .iter()
            .filter_map(|product| {
                let current_stock = self.calculator.current_stock(product.code().as_str());
                is_below_minimum(current_stock, product.min_threshold()).then(|| Shortage {
                    code: product.code().clone(),
                    name: product.name().to_string(),
                    current_stock,
                    min_threshold: product.min_threshold(),
                })
            })
            .collect()
    }
}
