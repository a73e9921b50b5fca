//! Kernel32.dll bindings for process and memory operations

use crate::core::types::{Address, MemoryError, MemoryResult, ProcessId};
use crate::windows::utils::ErrorCode;
use winapi::shared::minwindef::{DWORD, FALSE, LPCVOID, LPVOID};
use winapi::um::handleapi::CloseHandle;
use winapi::um::memoryapi::{ReadProcessMemory, WriteProcessMemory};
use winapi::um::processthreadsapi::{GetExitCodeProcess, OpenProcess};
use winapi::um::winnt::HANDLE;

/// Exit code reported by GetExitCodeProcess while the process runs
const STILL_ACTIVE: DWORD = 259;

/// Safe wrapper for OpenProcess
///
/// Access denial maps to `InsufficientPrivileges`; an unknown pid maps to
/// `ProcessNotFound`.
pub fn open_process(pid: ProcessId, desired_access: u32) -> MemoryResult<HANDLE> {
    let handle = unsafe { OpenProcess(desired_access, FALSE, pid) };
    if !handle.is_null() {
        return Ok(handle);
    }

    match ErrorCode::last_error() {
        ErrorCode::AccessDenied => Err(MemoryError::InsufficientPrivileges(format!(
            "OpenProcess denied for PID {} (run as administrator)",
            pid
        ))),
        ErrorCode::InvalidParameter => {
            Err(MemoryError::ProcessNotFound(format!("PID: {}", pid)))
        }
        code => Err(MemoryError::InvalidHandle(format!(
            "OpenProcess failed for PID {}: {}",
            pid, code
        ))),
    }
}

/// Safe wrapper for CloseHandle
///
/// # Safety
/// The handle must be a valid Windows handle that is not used afterwards
pub unsafe fn close_handle(handle: HANDLE) -> MemoryResult<()> {
    if handle.is_null() {
        return Ok(());
    }

    if CloseHandle(handle) == FALSE {
        Err(MemoryError::InvalidHandle(format!(
            "CloseHandle failed: {}",
            ErrorCode::last_error()
        )))
    } else {
        Ok(())
    }
}

/// Safe wrapper for ReadProcessMemory
///
/// # Safety
/// The handle must be a valid process handle with PROCESS_VM_READ access
pub unsafe fn read_process_memory(
    handle: HANDLE,
    address: Address,
    buffer: &mut [u8],
) -> MemoryResult<usize> {
    let mut bytes_read = 0;

    let result = ReadProcessMemory(
        handle,
        address.as_u64() as LPCVOID,
        buffer.as_mut_ptr() as LPVOID,
        buffer.len(),
        &mut bytes_read,
    );

    if result == FALSE {
        Err(MemoryError::read_failed(
            address,
            format!("ReadProcessMemory failed: {}", ErrorCode::last_error()),
        ))
    } else {
        Ok(bytes_read)
    }
}

/// Safe wrapper for WriteProcessMemory
///
/// # Safety
/// The handle must be a valid process handle with PROCESS_VM_WRITE and
/// PROCESS_VM_OPERATION access
pub unsafe fn write_process_memory(
    handle: HANDLE,
    address: Address,
    data: &[u8],
) -> MemoryResult<usize> {
    let mut bytes_written = 0;

    let result = WriteProcessMemory(
        handle,
        address.as_u64() as LPVOID,
        data.as_ptr() as LPCVOID,
        data.len(),
        &mut bytes_written,
    );

    if result == FALSE {
        Err(MemoryError::write_failed(
            address,
            format!("WriteProcessMemory failed: {}", ErrorCode::last_error()),
        ))
    } else {
        Ok(bytes_written)
    }
}

/// Whether the process behind `handle` has not exited yet
///
/// # Safety
/// The handle must be a valid process handle with query access
pub unsafe fn is_process_running(handle: HANDLE) -> bool {
    let mut exit_code: DWORD = 0;
    if GetExitCodeProcess(handle, &mut exit_code) == FALSE {
        return false;
    }
    exit_code == STILL_ACTIVE
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ptr;
    use winapi::um::winnt::PROCESS_QUERY_LIMITED_INFORMATION;

    #[test]
    #[cfg_attr(miri, ignore = "FFI not supported in Miri")]
    fn test_null_handle_operations() {
        unsafe {
            assert!(close_handle(ptr::null_mut()).is_ok());

            let mut buffer = vec![0u8; 4];
            assert!(read_process_memory(ptr::null_mut(), Address::new(0x1000), &mut buffer).is_err());

            let data = vec![0u8; 4];
            assert!(write_process_memory(ptr::null_mut(), Address::new(0x1000), &data).is_err());

            assert!(!is_process_running(ptr::null_mut()));
        }
    }

    #[test]
    #[cfg_attr(miri, ignore = "FFI not supported in Miri")]
    fn test_open_invalid_process() {
        let result = open_process(0, PROCESS_QUERY_LIMITED_INFORMATION);
        assert!(result.is_err());
    }

    #[test]
    #[cfg_attr(miri, ignore = "FFI not supported in Miri")]
    fn test_current_process_is_running() {
        let handle = open_process(std::process::id(), PROCESS_QUERY_LIMITED_INFORMATION);
        if let Ok(handle) = handle {
            unsafe {
                assert!(is_process_running(handle));
                assert!(close_handle(handle).is_ok());
            }
        }
    }
}
