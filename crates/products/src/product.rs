use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use stockledger_core::{DomainError, DomainResult, Entity, ProductCode};

/// A catalog product: static attributes keyed by code.
///
/// Immutable once registered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    code: ProductCode,
    name: String,
    category: String,
    min_threshold: u32,
    unit_price: Decimal,
}

impl Product {
    pub fn code(&self) -> &ProductCode {
        &self.code
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    /// Stock level below which the product is reported as a shortage.
    pub fn min_threshold(&self) -> u32 {
        self.min_threshold
    }

    pub fn unit_price(&self) -> Decimal {
        self.unit_price
    }

    /// Build a product from a stored record without re-validating attributes.
    pub fn from_record(record: ProductRecord) -> Self {
        Self {
            code: record.code,
            name: record.name,
            category: record.category,
            min_threshold: record.min_threshold,
            unit_price: record.unit_price,
        }
    }

    pub fn to_record(&self) -> ProductRecord {
        ProductRecord {
            code: self.code.clone(),
            name: self.name.clone(),
            category: self.category.clone(),
            min_threshold: self.min_threshold,
            unit_price: self.unit_price,
        }
    }

    /// Attribute problems a trusted record may carry (empty name, negative price).
    pub fn attribute_problems(&self) -> Vec<String> {
        let mut problems = Vec::new();
        if self.name.trim().is_empty() {
            problems.push("name is empty".to_string());
        }
        if self.unit_price.is_sign_negative() && !self.unit_price.is_zero() {
            problems.push(format!("unit price {} is negative", self.unit_price));
        }
        problems
    }
}

impl Entity for Product {
    type Id = ProductCode;

    fn id(&self) -> &Self::Id {
        &self.code
    }
}

/// Plain product record used for snapshots and exports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub code: ProductCode,
    pub name: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub min_threshold: u32,
    pub unit_price: Decimal,
}

/// Command: RegisterProduct.
///
/// Carries the raw code as typed by the user; normalization happens on
/// registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterProduct {
    pub code: String,
    pub name: String,
    pub category: String,
    pub min_threshold: u32,
    pub unit_price: Decimal,
}

impl RegisterProduct {
    pub fn new(
        code: impl Into<String>,
        name: impl Into<String>,
        category: impl Into<String>,
        min_threshold: u32,
        unit_price: Decimal,
    ) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            category: category.into(),
            min_threshold,
            unit_price,
        }
    }

    /// Validate the command and build the product it describes.
    pub(crate) fn into_product(self) -> DomainResult<Product> {
        let code = ProductCode::parse(&self.code)?;

        if self.name.trim().is_empty() {
            return Err(DomainError::validation("name cannot be empty"));
        }

        if self.unit_price.is_sign_negative() && !self.unit_price.is_zero() {
            return Err(DomainError::validation("unit price cannot be negative"));
        }

        Ok(Product {
            code,
            name: self.name.trim().to_string(),
            category: self.category.trim().to_string(),
            min_threshold: self.min_threshold,
            unit_price: self.unit_price,
        })
    }
}
