//! Product catalog: code-keyed registry with deterministic iteration order.

use std::collections::HashMap;

use stockledger_core::{DomainError, DomainResult, Entity, ProductCode, code};

use crate::product::{Product, RegisterProduct};

/// Registered products, iterated in registration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    products: Vec<Product>,
    index: HashMap<ProductCode, usize>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new product.
    ///
    /// Fails with [`DomainError::DuplicateCode`] when the normalized code is
    /// already present. Nothing is inserted on failure.
    pub fn register(&mut self, cmd: RegisterProduct) -> DomainResult<ProductCode> {
        let product = cmd.into_product()?;
        let code = product.code().clone();
        self.insert(product)?;
        tracing::debug!(code = %code, "product registered");
        Ok(code)
    }

    /// Insert an already-built product (snapshot restore).
    ///
    /// Only the uniqueness of the code is enforced.
    pub fn insert(&mut self, product: Product) -> DomainResult<()> {
        if self.index.contains_key(product.id()) {
            return Err(DomainError::DuplicateCode(product.id().to_string()));
        }
        self.index.insert(product.id().clone(), self.products.len());
        self.products.push(product);
        Ok(())
    }

    /// Case-normalized lookup.
    pub fn get(&self, raw_code: &str) -> Option<&Product> {
        let code = code::normalize(raw_code);
        self.index.get(code.as_str()).map(|&i| &self.products[i])
    }

    pub fn contains(&self, raw_code: &str) -> bool {
        self.get(raw_code).is_some()
    }

    /// All `(code, product)` pairs in registration order.
    pub fn all(&self) -> impl Iterator<Item = (&ProductCode, &Product)> + '_ {
        self.products.iter().map(|p| (p.code(), p))
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}
