//! Windows process backend
//!
//! Safe wrappers around the Win32 process and memory APIs. All unsafe FFI
//! calls are contained within this module.

pub mod bindings;
pub mod session;
pub mod token;
pub mod types;
pub mod utils;

pub use bindings::toolhelp::enumerate_processes;
pub use session::{ProcessAccess, ProcessSession};
pub use token::is_elevated;
pub use types::Handle;
pub use utils::ErrorCode;
