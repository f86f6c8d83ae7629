//! Movement validator: the single gate in front of the ledger.
//!
//! Checks run in a fixed order: stateless checks on the request first
//! (direction, quantity, then date for full requests), then product existence,
//! then stock sufficiency for outbound movements only.

use stockledger_core::{DomainError, DomainResult, code};
use stockledger_products::{Catalog, Product};

use crate::ledger::MovementLedger;
use crate::movement::{Direction, Movement, RecordMovement, parse_date};
use crate::stock::StockCalculator;

/// Read-only validator over the current catalog and ledger.
#[derive(Debug, Clone, Copy)]
pub struct MovementValidator<'a> {
    calculator: StockCalculator<'a>,
}

impl<'a> MovementValidator<'a> {
    pub fn new(catalog: &'a Catalog, ledger: &'a MovementLedger) -> Self {
        Self {
            calculator: StockCalculator::new(catalog, ledger),
        }
    }

    /// Check whether a movement could be admitted right now.
    pub fn validate(&self, raw_code: &str, direction: &str, quantity: i64) -> DomainResult<()> {
        let (direction, quantity) = check_shape(direction, quantity)?;
        let product = self.check_product(raw_code)?;
        self.check_stock(product, direction, quantity)
    }

    /// Validate a full request and build the movement to append.
    pub fn admit(&self, request: &RecordMovement) -> DomainResult<Movement> {
        let (direction, quantity) = check_shape(&request.direction, request.quantity)?;
        let date = parse_date(&request.date)?;
        let product = self.check_product(&request.product_code)?;
        self.check_stock(product, direction, quantity)?;

        Ok(Movement {
            product_code: product.code().clone(),
            direction,
            quantity,
            date,
            reason: request.reason.trim().to_string(),
        })
    }

    fn check_product(&self, raw_code: &str) -> DomainResult<&'a Product> {
        self.calculator
            .catalog()
            .get(raw_code)
            .ok_or_else(|| DomainError::UnknownProduct(code::normalize(raw_code)))
    }

    fn check_stock(&self, product: &Product, direction: Direction, quantity: u32) -> DomainResult<()> {
        if direction == Direction::Inbound {
            return Ok(());
        }

        let available = self.calculator.current_stock(product.code().as_str());
        let requested = i64::from(quantity);
        if requested > available {
            return Err(DomainError::InsufficientStock {
                code: product.code().to_string(),
                requested,
                available,
            });
        }
        Ok(())
    }
}

/// Stateless checks: direction, then quantity.
fn check_shape(direction: &str, quantity: i64) -> DomainResult<(Direction, u32)> {
    let direction: Direction = direction.parse()?;

    if quantity <= 0 {
        return Err(DomainError::NonPositiveQuantity(quantity));
    }
    let quantity = u32::try_from(quantity)
        .map_err(|_| DomainError::malformed(format!("quantity {quantity} is too large")))?;

    Ok((direction, quantity))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use stockledger_products::RegisterProduct;

    fn catalog() -> Catalog {
        let mut catalog = Catalog::new();
        catalog
            .register(RegisterProduct::new("A", "Apple", "Fruit", 0, Decimal::new(5, 0)))
            .unwrap();
        catalog
    }

    fn stocked(quantity: i64) -> (Catalog, MovementLedger) {
        let catalog = catalog();
        let mut ledger = MovementLedger::new();
        let movement = MovementValidator::new(&catalog, &ledger)
            .admit(&RecordMovement::new("A", "inbound", quantity, "2024-01-15", "purchase"))
            .unwrap();
        ledger.append(movement);
        (catalog, ledger)
    }

    #[test]
    fn outbound_on_empty_ledger_is_insufficient() {
        let catalog = catalog();
        let ledger = MovementLedger::new();
        let err = MovementValidator::new(&catalog, &ledger)
            .validate("A", "outbound", 1)
            .unwrap_err();
        assert_eq!(
            err,
            DomainError::InsufficientStock {
                code: "A".to_string(),
                requested: 1,
                available: 0,
            }
        );
        assert!(ledger.is_empty());
    }

    #[test]
    fn outbound_up_to_available_stock_is_accepted() {
        let (catalog, ledger) = stocked(3);
        let validator = MovementValidator::new(&catalog, &ledger);
        assert!(validator.validate("a", "OUT", 3).is_ok());
        assert!(matches!(
            validator.validate("A", "out", 4),
            Err(DomainError::InsufficientStock { available: 3, .. })
        ));
    }

    #[test]
    fn unknown_product_is_rejected() {
        let catalog = catalog();
        let ledger = MovementLedger::new();
        let err = MovementValidator::new(&catalog, &ledger)
            .validate("nope", "inbound", 1)
            .unwrap_err();
        assert_eq!(err, DomainError::UnknownProduct("NOPE".to_string()));
    }

    #[test]
    fn non_positive_quantity_is_rejected() {
        let catalog = catalog();
        let ledger = MovementLedger::new();
        let validator = MovementValidator::new(&catalog, &ledger);
        assert_eq!(validator.validate("A", "inbound", 0), Err(DomainError::NonPositiveQuantity(0)));
        assert_eq!(validator.validate("A", "inbound", -2), Err(DomainError::NonPositiveQuantity(-2)));
    }

    #[test]
    fn stateless_checks_run_before_product_lookup() {
        let catalog = catalog();
        let ledger = MovementLedger::new();
        let validator = MovementValidator::new(&catalog, &ledger);

        // Unknown product + bad direction: direction wins.
        assert!(matches!(
            validator.validate("nope", "sideways", 1),
            Err(DomainError::InvalidDirection(_))
        ));
        // Unknown product + bad quantity: quantity wins.
        assert!(matches!(
            validator.validate("nope", "outbound", 0),
            Err(DomainError::NonPositiveQuantity(0))
        ));
        // Unknown product + outbound: existence wins over sufficiency.
        assert!(matches!(
            validator.validate("nope", "outbound", 1),
            Err(DomainError::UnknownProduct(_))
        ));
    }

    #[test]
    fn oversized_quantity_is_malformed() {
        let catalog = catalog();
        let ledger = MovementLedger::new();
        let err = MovementValidator::new(&catalog, &ledger)
            .validate("A", "inbound", i64::from(u32::MAX) + 1)
            .unwrap_err();
        assert!(matches!(err, DomainError::MalformedInput(_)));
    }

    #[test]
    fn admit_builds_normalized_movement() {
        let catalog = catalog();
        let ledger = MovementLedger::new();
        let movement = MovementValidator::new(&catalog, &ledger)
            .admit(&RecordMovement::new(" a ", "In", 4, "2024-01-15", "  purchase "))
            .unwrap();
        assert_eq!(movement.product_code.as_str(), "A");
        assert_eq!(movement.direction, Direction::Inbound);
        assert_eq!(movement.quantity, 4);
        assert_eq!(movement.date.to_string(), "2024-01-15");
        assert_eq!(movement.reason, "purchase");
    }

    #[test]
    fn admit_checks_date_before_product() {
        let catalog = catalog();
        let ledger = MovementLedger::new();
        let err = MovementValidator::new(&catalog, &ledger)
            .admit(&RecordMovement::new("nope", "inbound", 1, "yesterday", ""))
            .unwrap_err();
        assert!(matches!(err, DomainError::MalformedInput(_)));
    }
}
