//! Fallback backend for platforms without process memory support

use crate::core::types::{Address, MemoryError, MemoryResult, ModuleInfo, ProcessId, ProcessInfo};

fn unsupported() -> MemoryError {
    MemoryError::UnsupportedOperation(format!(
        "process memory access is not supported on {}",
        std::env::consts::OS
    ))
}

pub fn enumerate_processes() -> MemoryResult<Vec<ProcessInfo>> {
    Err(unsupported())
}

pub fn is_elevated() -> bool {
    false
}

#[derive(Debug)]
pub struct ProcessSession {
    pid: ProcessId,
}

impl ProcessSession {
    pub fn open(_pid: ProcessId) -> MemoryResult<Self> {
        Err(unsupported())
    }

    pub fn pid(&self) -> ProcessId {
        self.pid
    }

    pub fn read(&self, _address: Address, _buffer: &mut [u8]) -> MemoryResult<usize> {
        Err(unsupported())
    }

    pub fn write(&self, _address: Address, _data: &[u8]) -> MemoryResult<usize> {
        Err(unsupported())
    }

    pub fn modules(&self) -> MemoryResult<Vec<ModuleInfo>> {
        Err(unsupported())
    }

    pub fn is_alive(&self) -> bool {
        false
    }
}
