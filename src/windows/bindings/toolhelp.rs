//! ToolHelp32 process snapshot

use crate::core::types::{MemoryError, MemoryResult, ProcessInfo};
use crate::windows::types::Handle;
use crate::windows::utils::{wide_to_string, ErrorCode};
use std::mem;
use winapi::shared::minwindef::FALSE;
use winapi::um::handleapi::INVALID_HANDLE_VALUE;
use winapi::um::tlhelp32::{
    CreateToolhelp32Snapshot, Process32FirstW, Process32NextW, PROCESSENTRY32W,
    TH32CS_SNAPPROCESS,
};

/// Iterator over a snapshot of the running processes
pub struct ProcessSnapshot {
    snapshot: Handle,
    first_called: bool,
}

impl ProcessSnapshot {
    /// Take a new process snapshot
    pub fn new() -> MemoryResult<Self> {
        let raw = unsafe { CreateToolhelp32Snapshot(TH32CS_SNAPPROCESS, 0) };
        if raw.is_null() || raw == INVALID_HANDLE_VALUE {
            return Err(MemoryError::UnsupportedOperation(format!(
                "CreateToolhelp32Snapshot failed: {}",
                ErrorCode::last_error()
            )));
        }
        Ok(ProcessSnapshot {
            snapshot: Handle::new(raw),
            first_called: false,
        })
    }
}

impl Iterator for ProcessSnapshot {
    type Item = ProcessInfo;

    fn next(&mut self) -> Option<Self::Item> {
        unsafe {
            let mut entry: PROCESSENTRY32W = mem::zeroed();
            entry.dwSize = mem::size_of::<PROCESSENTRY32W>() as u32;

            let success = if !self.first_called {
                self.first_called = true;
                Process32FirstW(self.snapshot.raw(), &mut entry)
            } else {
                Process32NextW(self.snapshot.raw(), &mut entry)
            };

            if success == FALSE {
                return None;
            }

            Some(ProcessInfo::new(
                entry.th32ProcessID,
                wide_to_string(&entry.szExeFile),
            ))
        }
    }
}

/// Enumerate all running processes
pub fn enumerate_processes() -> MemoryResult<Vec<ProcessInfo>> {
    Ok(ProcessSnapshot::new()?.collect())
}
