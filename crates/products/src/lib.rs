//! Products domain module.
//!
//! This crate contains the product catalog, implemented purely as
//! deterministic domain logic (no IO, no storage).

pub mod catalog;
pub mod product;

pub use catalog::Catalog;
pub use product::{Product, ProductRecord, RegisterProduct};
