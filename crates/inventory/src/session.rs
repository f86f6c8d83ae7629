//! Inventory session: the single owner of catalog and ledger state.
//!
//! A session is created empty or restored from a snapshot at start-up,
//! mutated only through its methods, and exported with [`InventorySession::snapshot`]
//! before it is dropped. There is exactly one writer; the validate-then-append
//! sequence in [`InventorySession::record_movement`] relies on that.

use std::collections::HashMap;

use rust_decimal::Decimal;
use tracing::{debug, warn};

use stockledger_core::{DomainError, DomainResult, ProductCode};
use stockledger_products::{Catalog, Product, RegisterProduct};

use crate::ledger::MovementLedger;
use crate::listing::{self, InventoryLine, InventoryReport};
use crate::movement::{Movement, RecordMovement};
use crate::shortage::{Shortage, ShortageDetector};
use crate::snapshot::{InventorySnapshot, RestoreAnomaly};
use crate::stock::StockCalculator;
use crate::validator::MovementValidator;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InventorySession {
    catalog: Catalog,
    ledger: MovementLedger,
}

impl InventorySession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn ledger(&self) -> &MovementLedger {
        &self.ledger
    }

    pub fn calculator(&self) -> StockCalculator<'_> {
        StockCalculator::new(&self.catalog, &self.ledger)
    }

    pub fn validator(&self) -> MovementValidator<'_> {
        MovementValidator::new(&self.catalog, &self.ledger)
    }

    pub fn shortage_detector(&self) -> ShortageDetector<'_> {
        ShortageDetector::new(self.calculator())
    }

    pub fn register_product(&mut self, cmd: RegisterProduct) -> DomainResult<ProductCode> {
        self.catalog.register(cmd)
    }

    pub fn product(&self, raw_code: &str) -> Option<&Product> {
        self.catalog.get(raw_code)
    }

    /// Check a movement without recording it.
    pub fn validate_movement(&self, raw_code: &str, direction: &str, quantity: i64) -> DomainResult<()> {
        self.validator().validate(raw_code, direction, quantity)
    }

    /// Validate and append a movement. Nothing is appended on failure.
    pub fn record_movement(&mut self, request: &RecordMovement) -> DomainResult<Movement> {
        let movement = self.validator().admit(request)?;
        debug!(
            code = %movement.product_code,
            direction = %movement.direction,
            quantity = movement.quantity,
            "movement recorded"
        );
        self.ledger.append(movement.clone());
        Ok(movement)
    }

    pub fn current_stock(&self, raw_code: &str) -> i64 {
        self.calculator().current_stock(raw_code)
    }

    pub fn total_inventory_value(&self) -> DomainResult<Decimal> {
        self.calculator().total_inventory_value()
    }

    pub fn find_shortages(&self) -> Vec<Shortage> {
        self.shortage_detector().find_shortages()
    }

    pub fn inventory_lines(&self) -> DomainResult<Vec<InventoryLine>> {
        listing::inventory_lines(&self.calculator())
    }

    pub fn inventory_report(&self) -> DomainResult<InventoryReport> {
        listing::inventory_report(&self.calculator())
    }

    /// Export catalog and ledger as plain records.
    pub fn snapshot(&self) -> InventorySnapshot {
        InventorySnapshot {
            products: self.catalog.products().iter().map(Product::to_record).collect(),
            movements: self.ledger.all().cloned().collect(),
        }
    }

    /// Rebuild a session from a trusted snapshot.
    ///
    /// Records are taken as-is, except that a repeated product code keeps its
    /// first record. Referential, quantity and non-negative-stock checks are
    /// re-run and every inconsistency is logged and returned.
    pub fn restore(snapshot: InventorySnapshot) -> (Self, Vec<RestoreAnomaly>) {
        let mut session = Self::new();
        let mut anomalies = Vec::new();

        for record in snapshot.products {
            let product = Product::from_record(record);
            for problem in product.attribute_problems() {
                anomalies.push(RestoreAnomaly::InvalidProduct {
                    code: product.code().clone(),
                    problem,
                });
            }
            let code = product.code().clone();
            if let Err(DomainError::DuplicateCode(_)) = session.catalog.insert(product) {
                anomalies.push(RestoreAnomaly::DuplicateProduct { code });
            }
        }

        let mut balances: HashMap<ProductCode, i64> = HashMap::new();
        for (index, movement) in snapshot.movements.into_iter().enumerate() {
            let code = movement.product_code.clone();
            if !session.catalog.contains(code.as_str()) {
                anomalies.push(RestoreAnomaly::UnknownProduct {
                    index,
                    code: code.clone(),
                });
            }
            if movement.quantity == 0 {
                anomalies.push(RestoreAnomaly::ZeroQuantity {
                    index,
                    code: code.clone(),
                });
            }

            let balance = balances.entry(code.clone()).or_insert(0);
            let before = *balance;
            *balance += movement.signed_quantity();
            if *balance < 0 && before >= 0 {
                anomalies.push(RestoreAnomaly::NegativeStock {
                    index,
                    code,
                    stock: *balance,
                });
            }

            session.ledger.append(movement);
        }

        for anomaly in &anomalies {
            warn!(%anomaly, "snapshot anomaly");
        }
        debug!(
            products = session.catalog.len(),
            movements = session.ledger.len(),
            anomalies = anomalies.len(),
            "session restored"
        );

        (session, anomalies)
    }
}
