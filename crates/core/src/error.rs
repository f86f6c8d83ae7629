//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Every variant is recoverable by the user: the operation that returned it
/// performed no mutation, so the caller can report the message and retry.
/// Infrastructure concerns (files, configuration) belong elsewhere.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A product with this code is already registered.
    #[error("product {0} is already registered")]
    DuplicateCode(String),

    /// No product with this code exists in the catalog.
    #[error("unknown product: {0}")]
    UnknownProduct(String),

    /// The movement direction is neither inbound nor outbound.
    #[error("invalid direction: {0:?} (expected inbound or outbound)")]
    InvalidDirection(String),

    /// Movement quantities must be strictly positive.
    #[error("quantity must be positive (got {0})")]
    NonPositiveQuantity(i64),

    /// An outbound movement would drive derived stock below zero.
    #[error("insufficient stock for {code}: requested {requested}, available {available}")]
    InsufficientStock {
        code: String,
        requested: i64,
        available: i64,
    },

    /// Raw input could not be parsed (non-numeric quantity, bad date, ...).
    #[error("malformed input: {0}")]
    MalformedInput(String),

    /// A well-formed value failed validation (e.g. empty name).
    #[error("validation failed: {0}")]
    Validation(String),

    /// A product code failed normalization.
    #[error("invalid product code: {0}")]
    InvalidCode(String),

    /// A domain invariant was violated.
    #[error("invariant violated: {0}")]
    InvariantViolation(String),
}

impl DomainError {
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedInput(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invalid_code(msg: impl Into<String>) -> Self {
        Self::InvalidCode(msg.into())
    }

    pub fn invariant(msg: impl Into<String>) -> Self {
        Self::InvariantViolation(msg.into())
    }

    /// Stable machine-readable tag, used by structured output.
    pub fn kind(&self) -> &'static str {
        match self {
            DomainError::DuplicateCode(_) => "duplicate_code",
            DomainError::UnknownProduct(_) => "unknown_product",
            DomainError::InvalidDirection(_) => "invalid_direction",
            DomainError::NonPositiveQuantity(_) => "non_positive_quantity",
            DomainError::InsufficientStock { .. } => "insufficient_stock",
            DomainError::MalformedInput(_) => "malformed_input",
            DomainError::Validation(_) => "validation_error",
            DomainError::InvalidCode(_) => "invalid_code",
            DomainError::InvariantViolation(_) => "invariant_violation",
        }
    }
}
