//! Read/write session on a Windows process

use crate::core::types::{Address, MemoryResult, ModuleInfo, ProcessId};
use crate::windows::bindings::{kernel32, psapi};
use crate::windows::types::Handle;
use tracing::{debug, trace};

/// Access rights requested when opening a target
#[derive(Debug, Clone, Copy)]
pub struct ProcessAccess {
    value: u32,
}

impl ProcessAccess {
    /// Query information access
    pub const QUERY_INFORMATION: Self = Self { value: 0x0400 };
    /// Read memory access
    pub const VM_READ: Self = Self { value: 0x0010 };
    /// Write memory access
    pub const VM_WRITE: Self = Self { value: 0x0020 };
    /// Memory operation access, required by WriteProcessMemory
    pub const VM_OPERATION: Self = Self { value: 0x0008 };

    /// Combine access rights
    pub fn combine(rights: &[Self]) -> Self {
        let mut value = 0;
        for right in rights {
            value |= right.value;
        }
        Self { value }
    }

    /// Rights needed to read, write and watch a target
    pub fn read_write() -> Self {
        Self::combine(&[
            Self::QUERY_INFORMATION,
            Self::VM_READ,
            Self::VM_WRITE,
            Self::VM_OPERATION,
        ])
    }

    /// Get raw value
    pub fn value(&self) -> u32 {
        self.value
    }
}

/// An open process handle with read/write access
///
/// The handle is closed when the session is dropped.
pub struct ProcessSession {
    handle: Handle,
    pid: ProcessId,
}

impl ProcessSession {
    /// Open `pid` for reading and writing
    pub fn open(pid: ProcessId) -> MemoryResult<Self> {
        let raw = kernel32::open_process(pid, ProcessAccess::read_write().value())?;
        debug!(pid, "opened process handle");
        Ok(ProcessSession {
            handle: Handle::new(raw),
            pid,
        })
    }

    /// Process id of the session
    pub fn pid(&self) -> ProcessId {
        self.pid
    }

    pub fn read(&self, address: Address, buffer: &mut [u8]) -> MemoryResult<usize> {
        trace!(pid = self.pid, %address, len = buffer.len(), "ReadProcessMemory");
        unsafe { kernel32::read_process_memory(self.handle.raw(), address, buffer) }
    }

    pub fn write(&self, address: Address, data: &[u8]) -> MemoryResult<usize> {
        trace!(pid = self.pid, %address, len = data.len(), "WriteProcessMemory");
        unsafe { kernel32::write_process_memory(self.handle.raw(), address, data) }
    }

    /// List the modules loaded into the process
    pub fn modules(&self) -> MemoryResult<Vec<ModuleInfo>> {
        unsafe {
            let handles = psapi::enum_process_modules(self.handle.raw())?;
            let mut modules = Vec::with_capacity(handles.len());
            for module in handles {
                match psapi::module_info(self.handle.raw(), module) {
                    Ok(info) => modules.push(info),
                    Err(e) => trace!(error = %e, "skipping unreadable module"),
                }
            }
            Ok(modules)
        }
    }

    pub fn is_alive(&self) -> bool {
        unsafe { kernel32::is_process_running(self.handle.raw()) }
    }
}

impl std::fmt::Debug for ProcessSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProcessSession")
            .field("pid", &self.pid)
            .finish()
    }
}
