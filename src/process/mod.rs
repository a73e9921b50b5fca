//! Process discovery and attachment
//!
//! Selects the platform backend at compile time and exposes it through
//! [`ProcessHandle`] and the [`ProcessAttacher`] seam.

pub mod attacher;
pub mod enumerator;
pub mod handle;
pub mod privileges;

#[cfg(not(any(windows, target_os = "linux")))]
pub(crate) mod unsupported;

#[cfg(target_os = "linux")]
pub(crate) use crate::linux as platform;
#[cfg(not(any(windows, target_os = "linux")))]
pub(crate) use unsupported as platform;
#[cfg(windows)]
pub(crate) use crate::windows as platform;

pub use attacher::{ProcessAttacher, SystemAttacher};
pub use enumerator::{enumerate_processes, find_process_by_name, find_processes_by_name};
pub use handle::ProcessHandle;
pub use privileges::is_elevated;
