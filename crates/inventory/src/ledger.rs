//! Append-only movement ledger.

use stockledger_core::code;

use crate::movement::Movement;

/// Append-only sequence of movements in insertion order.
///
/// The ledger is pure storage: it performs no validation. Callers admit
/// movements through the movement validator before appending.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MovementLedger {
    movements: Vec<Movement>,
}

impl MovementLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, movement: Movement) {
        self.movements.push(movement);
    }

    /// All movements in append order. Each call starts a fresh pass.
    pub fn all(&self) -> impl Iterator<Item = &Movement> + '_ {
        self.movements.iter()
    }

    /// Movements for one product (case-normalized), in append order.
    pub fn for_product(&self, raw_code: &str) -> impl Iterator<Item = &Movement> + '_ {
        let code = code::normalize(raw_code);
        self.movements
            .iter()
            .filter(move |m| m.product_code.as_str() == code)
    }

    pub fn len(&self) -> usize {
        self.movements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movements.is_empty()
    }
}
