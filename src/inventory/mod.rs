//! Changer Inventory Module
//!
//! The in-memory model of a media changer built from `mtx status` output.
//!
//! ## Structure
//! - `types`: Volume, Slot and Inventory definitions
//! - `parser`: status report parsing
//! - `lookup`: read-only queries
//! - `validator`: placement invariant checks
//! - `serializer`: JSON and CSV export

pub mod types;
pub mod parser;
pub mod lookup;
pub mod validator;
pub mod serializer;

// Re-export public types for convenience
pub use types::{
    sorted_slots,
    Inventory,
    Slot,
    SlotKind,
    Volume,
    CLEANING_MEDIA_PREFIX,
};
