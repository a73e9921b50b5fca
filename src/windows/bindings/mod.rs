//! Windows API bindings
//!
//! Low-level FFI wrappers around kernel32, PSAPI and ToolHelp32.

pub mod kernel32;
pub mod psapi;
pub mod toolhelp;
