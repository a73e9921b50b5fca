//! Core module containing fundamental types for Money-Editor
//!
//! Address handling, the fixed-point money encoding, process information,
//! and error types shared by every other layer.

pub mod types;

// Re-export commonly used types for convenience
pub use types::{Address, MemoryError, MemoryResult, ModuleInfo, MoneyValue, ProcessInfo};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(not(target_pointer_width = "64"))]
compile_error!("Money-Editor requires 64-bit architecture");
