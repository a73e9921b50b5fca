//! Attached process with an open read/write session

use crate::core::types::{Address, MemoryError, MemoryResult, ModuleInfo, ProcessId, ProcessInfo};
use crate::memory::ProcessMemory;
use crate::process::{enumerator, platform};
use std::fmt;
use tracing::{debug, info};

/// A process opened for reading and writing
///
/// The underlying OS handle (or `/proc/<pid>/mem` file) is released when the
/// value is dropped.
pub struct ProcessHandle {
    info: ProcessInfo,
    session: platform::ProcessSession,
}

impl ProcessHandle {
    /// Find the first running process named `process_name` and open it
    pub fn attach(process_name: &str) -> MemoryResult<Self> {
        let info = enumerator::find_process_by_name(process_name)?;
        Self::open_info(info)
    }

    /// Open a process whose pid is already known
    pub fn open(pid: ProcessId, name: &str) -> MemoryResult<Self> {
        Self::open_info(ProcessInfo::new(pid, name.to_string()))
    }

    fn open_info(info: ProcessInfo) -> MemoryResult<Self> {
        let session = platform::ProcessSession::open(info.pid)?;
        info!(pid = info.pid, name = %info.name, "attached to process");
        Ok(ProcessHandle { info, session })
    }

    /// Get the process ID
    pub fn pid(&self) -> ProcessId {
        self.session.pid()
    }

    /// Process name as reported by the system
    pub fn name(&self) -> &str {
        &self.info.name
    }

    /// Process information captured at attach time
    pub fn info(&self) -> &ProcessInfo {
        &self.info
    }

    /// Modules currently loaded into the process
    pub fn modules(&self) -> MemoryResult<Vec<ModuleInfo>> {
        self.session.modules()
    }
}

impl ProcessMemory for ProcessHandle {
    fn read_memory(&self, address: Address, buffer: &mut [u8]) -> MemoryResult<usize> {
        self.session.read(address, buffer)
    }

    fn write_memory(&self, address: Address, data: &[u8]) -> MemoryResult<usize> {
        self.session.write(address, data)
    }

    fn module_base_address(&self, module_name: &str) -> MemoryResult<Address> {
        let module = self
            .modules()?
            .into_iter()
            .find(|m| m.name_matches(module_name))
            .ok_or_else(|| MemoryError::ModuleNotFound(module_name.to_string()))?;
        debug!(module = %module.name, base = %module.base_address, "located module");
        Ok(module.base_address)
    }

    fn is_alive(&self) -> bool {
        self.session.is_alive()
    }
}

impl fmt::Debug for ProcessHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProcessHandle")
            .field("pid", &self.info.pid)
            .field("name", &self.info.name)
            .finish()
    }
}
