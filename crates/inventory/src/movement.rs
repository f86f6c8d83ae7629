use core::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use stockledger_core::{DomainError, DomainResult, ProductCode, ValueObject};

/// Date format accepted for movements (ISO-8601 calendar date).
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Direction of a stock movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Inbound,
    Outbound,
}

impl Direction {
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Inbound => "inbound",
            Direction::Outbound => "outbound",
        }
    }
}

impl ValueObject for Direction {}

impl core::fmt::Display for Direction {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "inbound" | "in" => Ok(Direction::Inbound),
            "outbound" | "out" => Ok(Direction::Outbound),
            _ => Err(DomainError::InvalidDirection(s.to_string())),
        }
    }
}

/// A stock movement: an immutable ledger fact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movement {
    pub product_code: ProductCode,
    pub direction: Direction,
    pub quantity: u32,
    pub date: NaiveDate,
    #[serde(default)]
    pub reason: String,
}

impl Movement {
    /// Quantity with the sign of its direction (`+` inbound, `-` outbound).
    pub fn signed_quantity(&self) -> i64 {
        match self.direction {
            Direction::Inbound => i64::from(self.quantity),
            Direction::Outbound => -i64::from(self.quantity),
        }
    }
}

/// Command: RecordMovement.
///
/// Raw request as typed by the user; the movement validator turns it into a
/// [`Movement`] or rejects it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordMovement {
    pub product_code: String,
    pub direction: String,
    pub quantity: i64,
    pub date: String,
    pub reason: String,
}

impl RecordMovement {
    pub fn new(
        product_code: impl Into<String>,
        direction: impl Into<String>,
        quantity: i64,
        date: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            product_code: product_code.into(),
            direction: direction.into(),
            quantity,
            date: date.into(),
            reason: reason.into(),
        }
    }
}

/// Parse a movement date (`YYYY-MM-DD`).
pub fn parse_date(raw: &str) -> DomainResult<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT)
        .map_err(|e| DomainError::malformed(format!("date {raw:?} (expected YYYY-MM-DD): {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_parses_case_insensitively() {
        assert_eq!("INBOUND".parse::<Direction>().unwrap(), Direction::Inbound);
        assert_eq!(" in ".parse::<Direction>().unwrap(), Direction::Inbound);
        assert_eq!("Out".parse::<Direction>().unwrap(), Direction::Outbound);
        assert_eq!(
            "sideways".parse::<Direction>().unwrap_err(),
            DomainError::InvalidDirection("sideways".to_string())
        );
    }

    #[test]
    fn signed_quantity_follows_direction() {
        let mut movement = Movement {
            product_code: ProductCode::parse("A").unwrap(),
            direction: Direction::Inbound,
            quantity: 7,
            date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            reason: "purchase".to_string(),
        };
        assert_eq!(movement.signed_quantity(), 7);
        movement.direction = Direction::Outbound;
        assert_eq!(movement.signed_quantity(), -7);
    }

    #[test]
    fn movement_serializes_with_iso_date() {
        let movement = Movement {
            product_code: ProductCode::parse("prod001").unwrap(),
            direction: Direction::Outbound,
            quantity: 2,
            date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            reason: "sale".to_string(),
        };
        let json = serde_json::to_value(&movement).unwrap();
        assert_eq!(json["product_code"], "PROD001");
        assert_eq!(json["direction"], "outbound");
        assert_eq!(json["date"], "2024-01-15");
    }

    #[test]
    fn parse_date_requires_iso_format() {
        assert_eq!(
            parse_date("2024-01-15").unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
        );
        assert!(matches!(parse_date("15/01/2024"), Err(DomainError::MalformedInput(_))));
        assert!(matches!(parse_date("2024-02-30"), Err(DomainError::MalformedInput(_))));
    }
}
