//! `stockledger-core`: domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns):
//! the error taxonomy, product codes, money rounding and input parsers.

pub mod code;
pub mod entity;
pub mod error;
pub mod input;
pub mod money;
pub mod value_object;

pub use code::ProductCode;
pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use money::{MONEY_SCALE, extend_price, round_money};
pub use value_object::ValueObject;
