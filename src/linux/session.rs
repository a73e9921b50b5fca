//! Read/write session on a Linux process through `/proc/<pid>/mem`

use crate::core::types::{Address, MemoryError, MemoryResult, ModuleInfo, ProcessId};
use crate::linux::procfs;
use std::fs::{File, OpenOptions};
use std::os::unix::fs::FileExt;
use tracing::{debug, trace};

/// An open `/proc/<pid>/mem` file
///
/// The file is closed when the session is dropped.
#[derive(Debug)]
pub struct ProcessSession {
    mem: File,
    pid: ProcessId,
}

impl ProcessSession {
    /// Open `pid` for reading and writing
    pub fn open(pid: ProcessId) -> MemoryResult<Self> {
        let path = format!("/proc/{}/mem", pid);
        let mem = OpenOptions::new()
            .read(true)
            .write(true)
            .open(&path)
            .map_err(|e| procfs::map_proc_error(pid, e))?;
        debug!(pid, "opened {}", path);
        Ok(ProcessSession { mem, pid })
    }

    /// Process id of the session
    pub fn pid(&self) -> ProcessId {
        self.pid
    }

    pub fn read(&self, address: Address, buffer: &mut [u8]) -> MemoryResult<usize> {
        trace!(pid = self.pid, %address, len = buffer.len(), "pread");
        self.mem
            .read_at(buffer, address.as_u64())
            .map_err(|e| MemoryError::read_failed(address, e.to_string()))
    }

    pub fn write(&self, address: Address, data: &[u8]) -> MemoryResult<usize> {
        trace!(pid = self.pid, %address, len = data.len(), "pwrite");
        self.mem
            .write_at(data, address.as_u64())
            .map_err(|e| MemoryError::write_failed(address, e.to_string()))
    }

    /// List the modules mapped into the process
    pub fn modules(&self) -> MemoryResult<Vec<ModuleInfo>> {
        procfs::modules(self.pid)
    }

    pub fn is_alive(&self) -> bool {
        procfs::is_running(self.pid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_missing_process() {
        let err = ProcessSession::open(u32::MAX).unwrap_err();
        assert!(matches!(err, MemoryError::ProcessNotFound(_)));
    }

    #[test]
    fn test_self_session_reads_own_memory() {
        let value: u64 = 0x1122_3344_5566_7788;
        let address = Address::new(&value as *const u64 as u64);

        let session = match ProcessSession::open(std::process::id()) {
            Ok(session) => session,
            Err(_) => return,
        };
        assert!(session.is_alive());

        let mut buffer = [0u8; 8];
        assert_eq!(session.read(address, &mut buffer).unwrap(), 8);
        assert_eq!(u64::from_ne_bytes(buffer), value);
    }

    #[test]
    fn test_read_unmapped_fails() {
        let session = match ProcessSession::open(std::process::id()) {
            Ok(session) => session,
            Err(_) => return,
        };
        let mut buffer = [0u8; 4];
        let err = session.read(Address::new(0x10), &mut buffer).unwrap_err();
        assert!(matches!(err, MemoryError::ReadFailed { .. }));
    }
}
