//! Per-product inventory listing for reporting collaborators.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use stockledger_core::{DomainResult, ProductCode};

use crate::shortage::is_below_minimum;
use crate::stock::StockCalculator;

/// Stock status flag of a listing line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum StockStatus {
    Ok,
    Shortage,
}

impl StockStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            StockStatus::Ok => "OK",
            StockStatus::Shortage => "SHORTAGE",
        }
    }
}

impl core::fmt::Display for StockStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.pad(self.as_str())
    }
}

/// One product with its derived stock and value.
///
/// `stock_value` is unrounded; rounding it is a display concern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryLine {
    pub code: ProductCode,
    pub name: String,
    pub category: String,
    pub unit_price: Decimal,
    pub min_threshold: u32,
    pub current_stock: i64,
    pub stock_value: Decimal,
    pub status: StockStatus,
}

/// Full listing plus the rounded grand total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryReport {
    pub lines: Vec<InventoryLine>,
    pub total_value: Decimal,
    /// Units on hand summed over every line.
    pub total_units: i64,
}

impl InventoryReport {
    /// Lines flagged as shortage, in catalog order.
    pub fn shortages(&self) -> impl Iterator<Item = &InventoryLine> + '_ {
        self.lines.iter().filter(|l| l.status == StockStatus::Shortage)
    }

    pub fn shortage_count(&self) -> usize {
        self.shortages().count()
    }
}

/// Build listing lines for every catalog product, in catalog order.
pub fn inventory_lines(calculator: &StockCalculator<'_>) -> DomainResult<Vec<InventoryLine>> {
    calculator
        .catalog()
        .products()
        .iter()
        .map(|product| {
            let current_stock = calculator.current_stock(product.code().as_str());
            let status = if is_below_minimum(current_stock, product.min_threshold()) {
                StockStatus::Shortage
            } else {
                StockStatus::Ok
            };
            Ok(InventoryLine {
                code: product.code().clone(),
                name: product.name().to_string(),
                category: product.category().to_string(),
                unit_price: product.unit_price(),
                min_threshold: product.min_threshold(),
                current_stock,
                stock_value: calculator.stock_value(product)?,
                status,
            })
        })
        .collect()
}

/// Build the listing and its total in one pass over the catalog.
pub fn inventory_report(calculator: &StockCalculator<'_>) -> DomainResult<InventoryReport> {
    let lines = inventory_lines(calculator)?;
    let total_units = lines.iter().map(|l| l.current_stock).sum();
    Ok(InventoryReport {
        lines,
        total_value: calculator.total_inventory_value()?,
        total_units,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::MovementLedger;
    use crate::movement::{Direction, Movement};
    use chrono::NaiveDate;
    use stockledger_products::{Catalog, RegisterProduct};

    fn setup() -> (Catalog, MovementLedger) {
        let mut catalog = Catalog::new();
        catalog
            .register(RegisterProduct::new("NB1", "Notebook", "Informatics", 5, "3500.00".parse().unwrap()))
            .unwrap();
        catalog
            .register(RegisterProduct::new("MS1", "Mouse", "Informatics", 2, "49.90".parse().unwrap()))
            .unwrap();

        let mut ledger = MovementLedger::new();
        for (code, quantity) in [("NB1", 15), ("MS1", 1)] {
            ledger.append(Movement {
                product_code: ProductCode::parse(code).unwrap(),
                direction: Direction::Inbound,
                quantity,
                date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
                reason: "purchase".to_string(),
            });
        }
        (catalog, ledger)
    }

    #[test]
    fn lines_carry_value_and_status() {
        let (catalog, ledger) = setup();
        let lines = inventory_lines(&StockCalculator::new(&catalog, &ledger)).unwrap();

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].code.as_str(), "NB1");
        assert_eq!(lines[0].current_stock, 15);
        assert_eq!(lines[0].stock_value, "52500.00".parse::<Decimal>().unwrap());
        assert_eq!(lines[0].status, StockStatus::Ok);

        assert_eq!(lines[1].current_stock, 1);
        assert_eq!(lines[1].status, StockStatus::Shortage);
    }

    #[test]
    fn report_totals_and_counts_shortages() {
        let (catalog, ledger) = setup();
        let report = inventory_report(&StockCalculator::new(&catalog, &ledger)).unwrap();
        assert_eq!(report.total_value.to_string(), "52549.90");
        assert_eq!(report.shortage_count(), 1);
    }

    #[test]
    fn report_sums_units_on_hand() {
        let (catalog, mut ledger) = setup();
        ledger.append(Movement {
            product_code: ProductCode::parse("NB1").unwrap(),
            direction: Direction::Outbound,
            quantity: 4,
            date: NaiveDate::from_ymd_opt(2024, 1, 16).unwrap(),
            reason: "sale".to_string(),
        });

        let report = inventory_report(&StockCalculator::new(&catalog, &ledger)).unwrap();
        assert_eq!(report.total_units, 12);
        let short: Vec<&str> = report.shortages().map(|l| l.code.as_str()).collect();
        assert_eq!(short, ["MS1"]);
    }

    #[test]
    fn empty_catalog_reports_zero_units() {
        let catalog = Catalog::new();
        let ledger = MovementLedger::new();
        let report = inventory_report(&StockCalculator::new(&catalog, &ledger)).unwrap();
        assert_eq!(report.total_units, 0);
        assert_eq!(report.total_value.to_string(), "0.00");
    }

    #[test]
    fn status_serializes_as_flag() {
        assert_eq!(serde_json::to_string(&StockStatus::Ok).unwrap(), "\"OK\"");
        assert_eq!(serde_json::to_string(&StockStatus::Shortage).unwrap(), "\"SHORTAGE\"");
        assert_eq!(StockStatus::Shortage.to_string(), "SHORTAGE");
    }
}
