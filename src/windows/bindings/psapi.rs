//! PSAPI.dll bindings for module enumeration

use crate::core::types::{Address, MemoryError, MemoryResult, ModuleInfo};
use crate::windows::utils::{wide_to_string, ErrorCode};
use std::path::PathBuf;
use winapi::shared::minwindef::{DWORD, FALSE, HMODULE, MAX_PATH};
use winapi::um::psapi::{
    EnumProcessModules, GetModuleBaseNameW, GetModuleFileNameExW, GetModuleInformation,
    MODULEINFO,
};
use winapi::um::winnt::HANDLE;

/// Safe wrapper for EnumProcessModules
///
/// Grows the buffer until every module handle fits.
///
/// # Safety
/// The handle must be a valid process handle with query and read access
pub unsafe fn enum_process_modules(handle: HANDLE) -> MemoryResult<Vec<HMODULE>> {
    let mut modules: Vec<HMODULE> = vec![std::ptr::null_mut(); 1024];

    loop {
        let mut bytes_needed: DWORD = 0;
        let capacity = (modules.len() * std::mem::size_of::<HMODULE>()) as DWORD;

        let result = EnumProcessModules(handle, modules.as_mut_ptr(), capacity, &mut bytes_needed);
        if result == FALSE {
            return Err(MemoryError::ModuleNotFound(format!(
                "EnumProcessModules failed: {}",
                ErrorCode::last_error()
            )));
        }

        let count = bytes_needed as usize / std::mem::size_of::<HMODULE>();
        if count <= modules.len() {
            modules.truncate(count);
            return Ok(modules);
        }
        modules.resize(count, std::ptr::null_mut());
    }
}

/// Describe one module: base name, file path, base address and image size
///
/// # Safety
/// The handle must be a valid process handle and `module` one of its modules
pub unsafe fn module_info(handle: HANDLE, module: HMODULE) -> MemoryResult<ModuleInfo> {
    let mut base_name = [0u16; MAX_PATH];
    let name_len = GetModuleBaseNameW(handle, module, base_name.as_mut_ptr(), MAX_PATH as DWORD);
    if name_len == 0 {
        return Err(MemoryError::ModuleNotFound(format!(
            "GetModuleBaseNameW failed: {}",
            ErrorCode::last_error()
        )));
    }
    let name = wide_to_string(&base_name[..name_len as usize]);

    let mut file_path = [0u16; MAX_PATH];
    let path_len = GetModuleFileNameExW(handle, module, file_path.as_mut_ptr(), MAX_PATH as DWORD);

    let mut info: MODULEINFO = std::mem::zeroed();
    let result = GetModuleInformation(
        handle,
        module,
        &mut info,
        std::mem::size_of::<MODULEINFO>() as DWORD,
    );
    if result == FALSE {
        return Err(MemoryError::ModuleNotFound(format!(
            "GetModuleInformation failed for {}: {}",
            name,
            ErrorCode::last_error()
        )));
    }

    let mut module_info = ModuleInfo::new(
        name,
        Address::new(info.lpBaseOfDll as u64),
        u64::from(info.SizeOfImage),
    );
    if path_len > 0 {
        module_info.path = PathBuf::from(wide_to_string(&file_path[..path_len as usize]));
    }
    Ok(module_info)
}
