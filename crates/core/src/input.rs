//! Parsers for raw user input at the interactive boundary.
//!
//! Parse failures map to [`DomainError::MalformedInput`]; values that parse
//! but are out of range map to [`DomainError::Validation`].

use core::str::FromStr;

use rust_decimal::Decimal;

use crate::error::{DomainError, DomainResult};

/// Parse a movement quantity. Sign is checked later by the movement validator.
pub fn parse_quantity(raw: &str) -> DomainResult<i64> {
    raw.trim()
        .parse::<i64>()
        .map_err(|e| DomainError::malformed(format!("quantity {raw:?}: {e}")))
}

/// Parse a minimum stock threshold (non-negative integer).
pub fn parse_threshold(raw: &str) -> DomainResult<u32> {
    let value = raw
        .trim()
        .parse::<i64>()
        .map_err(|e| DomainError::malformed(format!("minimum threshold {raw:?}: {e}")))?;
    if value < 0 {
        return Err(DomainError::validation("minimum threshold cannot be negative"));
    }
    u32::try_from(value)
        .map_err(|_| DomainError::malformed(format!("minimum threshold {raw:?} is too large")))
}

/// Parse a unit price (non-negative decimal, `.` as the separator).
pub fn parse_price(raw: &str) -> DomainResult<Decimal> {
    let price = Decimal::from_str(raw.trim())
        .map_err(|e| DomainError::malformed(format!("price {raw:?}: {e}")))?;
    if price.is_sign_negative() && !price.is_zero() {
        return Err(DomainError::validation("unit price cannot be negative"));
    }
    Ok(price)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quantity_accepts_signed_integers() {
        assert_eq!(parse_quantity(" 12 ").unwrap(), 12);
        assert_eq!(parse_quantity("-3").unwrap(), -3);
        assert!(matches!(parse_quantity("ten"), Err(DomainError::MalformedInput(_))));
        assert!(matches!(parse_quantity("1.5"), Err(DomainError::MalformedInput(_))));
    }

    #[test]
    fn threshold_rejects_negative_and_garbage() {
        assert_eq!(parse_threshold("5").unwrap(), 5);
        assert!(matches!(parse_threshold("-1"), Err(DomainError::Validation(_))));
        assert!(matches!(parse_threshold("five"), Err(DomainError::MalformedInput(_))));
        assert!(matches!(parse_threshold("99999999999"), Err(DomainError::MalformedInput(_))));
    }

    #[test]
    fn price_parses_decimals() {
        assert_eq!(parse_price("3500.00").unwrap(), Decimal::new(350000, 2));
        assert_eq!(parse_price("0").unwrap(), Decimal::ZERO);
        assert!(matches!(parse_price("-0.01"), Err(DomainError::Validation(_))));
        assert!(matches!(parse_price("R$ 10"), Err(DomainError::MalformedInput(_))));
    }
}
