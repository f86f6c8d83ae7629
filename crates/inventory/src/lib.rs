//! Inventory domain module.
//!
//! This crate contains the stock-ledger engine: movements, the append-only
//! ledger, derived stock and valuation, the movement validator, shortage
//! detection and the session that owns all of it. Everything here is
//! deterministic domain logic (no IO, no storage).

pub mod ledger;
pub mod listing;
pub mod movement;
pub mod session;
pub mod shortage;
pub mod snapshot;
pub mod stock;
pub mod validator;

pub use ledger::MovementLedger;
pub use listing::{InventoryLine, InventoryReport, StockStatus};
pub use movement::{DATE_FORMAT, Direction, Movement, RecordMovement, parse_date};
pub use session::InventorySession;
pub use shortage::{Shortage, ShortageDetector, is_below_minimum};
pub use snapshot::{InventorySnapshot, RestoreAnomaly};
pub use stock::StockCalculator;
pub use validator::MovementValidator;
