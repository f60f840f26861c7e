//! RustMTX Library
//!
//! A Rust library for SCSI media changers driven through the `mtx` program,
//! keeping an in-memory inventory of drives, storage slots, import/export
//! slots and the volumes in them consistent with every robot move.

pub mod changer;
pub mod config;
pub mod display;
pub mod error;
pub mod inventory;
pub mod logger;

// Re-export key types for easier use
pub use changer::{CommandExecutor, Library, ProcessExecutor};
pub use config::ChangerConfig;
pub use error::{Result, RustMtxError};
pub use inventory::{Inventory, Slot, SlotKind, Volume};
