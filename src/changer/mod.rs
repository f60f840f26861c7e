//! Media Changer Module
//!
//! The library handle, its move operations and the command executor
//! used to drive the physical changer.

pub mod core;
pub mod executor;
pub mod move_operations;

#[cfg(test)]
pub(crate) mod testing;

pub use self::core::{Library, DEFAULT_COMMAND};
pub use self::executor::{CommandExecutor, ProcessExecutor};
