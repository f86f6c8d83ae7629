//! Stock calculator: derived stock and valuation.
//!
//! Stock is never stored. It is recomputed from the ledger on every query by
//! a linear scan, which keeps the calculator a pure function of
//! `(catalog, ledger)` and gives the movement validator the exact same
//! formula to check outbound movements against.

use rust_decimal::Decimal;

use stockledger_core::{DomainError, DomainResult, code, extend_price, round_money};
use stockledger_products::{Catalog, Product};

use crate::ledger::MovementLedger;

/// Read-only view computing derived stock over a catalog and ledger.
#[derive(Debug, Clone, Copy)]
pub struct StockCalculator<'a> {
    catalog: &'a Catalog,
    ledger: &'a MovementLedger,
}

impl<'a> StockCalculator<'a> {
    pub fn new(catalog: &'a Catalog, ledger: &'a MovementLedger) -> Self {
        Self { catalog, ledger }
    }

    pub fn catalog(&self) -> &'a Catalog {
        self.catalog
    }

    /// Inbound minus outbound quantities for `raw_code` (case-normalized).
    ///
    /// Zero for a product without movements.
    pub fn current_stock(&self, raw_code: &str) -> i64 {
        let code = code::normalize(raw_code);
        self.ledger
            .all()
            .filter(|m| m.product_code.as_str() == code)
            .map(|m| m.signed_quantity())
            .sum()
    }

    /// Unrounded `current_stock * unit_price` for one product.
    pub fn stock_value(&self, product: &Product) -> DomainResult<Decimal> {
        let stock = self.current_stock(product.code().as_str());
        extend_price(stock, product.unit_price()).ok_or_else(|| {
            DomainError::invariant(format!("stock value of {} overflows", product.code()))
        })
    }

    /// Total value of all catalog products, rounded half-up to 2 places.
    ///
    /// Per-product values are summed unrounded; rounding is applied once to
    /// the aggregate.
    pub fn total_inventory_value(&self) -> DomainResult<Decimal> {
        let mut total = Decimal::ZERO;
        for product in self.catalog.products() {
            let value = self.stock_value(product)?;
            total = total
                .checked_add(value)
                .ok_or_else(|| DomainError::invariant("total inventory value overflows"))?;
        }
        Ok(round_money(total))
    }
}
