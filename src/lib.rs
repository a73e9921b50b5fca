//! Money-Editor library
//!
//! Attaches to a running game by process name, follows a pointer chain from
//! one of its modules to a money value, and overwrites that value with a
//! verified write. Amounts are stored in the target as 4-byte integer cents.

pub mod config;
pub mod core;
pub mod editor;
#[cfg(target_os = "linux")]
pub mod linux;
pub mod memory;
pub mod pointer;
pub mod process;
#[cfg(windows)]
pub mod windows;

// Re-export main types from core module
pub use crate::core::types::{
    parse_hex_u64, Address, MemoryError, MemoryResult, ModuleInfo, MoneyValue, ProcessId,
    ProcessInfo, CENTS_PER_UNIT, MAX_ENCODABLE_AMOUNT, MAX_USER_ADDRESS,
};
pub use crate::core::VERSION;
pub use editor::{AppliedValue, AttachState, MoneyEditor, TargetConfig};
pub use memory::{MockTarget, ProcessMemory, VerifiedWriter};
pub use pointer::{PointerChain, PointerResolver};
pub use process::{ProcessAttacher, ProcessHandle, SystemAttacher};
