//! Attachment seam between the editor and the operating system

use crate::core::types::MemoryResult;
use crate::memory::ProcessMemory;
use crate::process::ProcessHandle;

/// Opens read/write sessions on processes by name
///
/// [`SystemAttacher`] talks to the operating system; tests substitute
/// [`MockTarget`](crate::memory::MockTarget).
pub trait ProcessAttacher {
    /// Session type handed out on a successful attach
    type Process: ProcessMemory;

    /// Find a running process called `process_name` and open it for reading
    /// and writing
    fn attach(&self, process_name: &str) -> MemoryResult<Self::Process>;
}

/// Attaches to real processes through the platform backend
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemAttacher;

impl ProcessAttacher for SystemAttacher {
    type Process = ProcessHandle;

    fn attach(&self, process_name: &str) -> MemoryResult<ProcessHandle> {
        ProcessHandle::attach(process_name)
    }
}
