//! Core type definitions for Money-Editor
//!
//! Address wrappers, the money encoding, process descriptors and error types.

mod address;
mod error;
mod process_info;
mod value;

// Re-export all public types
pub use address::{parse_hex_u64, Address, MAX_USER_ADDRESS};
pub use error::{MemoryError, MemoryResult};
pub use process_info::{names_equal, ModuleInfo, ProcessInfo};
pub use value::{MoneyValue, CENTS_PER_UNIT, MAX_ENCODABLE_AMOUNT};

// Common type aliases
pub type ProcessId = u32;
