//! `/proc` parsing for process and module discovery

use crate::core::types::{Address, MemoryError, MemoryResult, ModuleInfo, ProcessId, ProcessInfo};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

fn proc_dir(pid: ProcessId) -> PathBuf {
    Path::new("/proc").join(pid.to_string())
}

/// Map an I/O error raised while touching `/proc/<pid>` to the crate taxonomy
pub fn map_proc_error(pid: ProcessId, err: io::Error) -> MemoryError {
    match err.kind() {
        io::ErrorKind::NotFound => MemoryError::ProcessNotFound(format!("PID: {}", pid)),
        io::ErrorKind::PermissionDenied => MemoryError::InsufficientPrivileges(format!(
            "access to PID {} denied (needs root or CAP_SYS_PTRACE): {}",
            pid, err
        )),
        _ => MemoryError::IoError(err),
    }
}

/// Enumerate all running processes
///
/// Processes that vanish or cannot be inspected while the listing is taken
/// are skipped.
pub fn enumerate_processes() -> MemoryResult<Vec<ProcessInfo>> {
    let mut processes = Vec::new();

    for entry in fs::read_dir("/proc")? {
        let entry = match entry {
            Ok(entry) => entry,
            Err(_) => continue,
        };
        let pid = match entry.file_name().to_str().and_then(|s| s.parse::<ProcessId>().ok()) {
            Some(pid) => pid,
            None => continue,
        };

        let dir = entry.path();
        let comm = match fs::read_to_string(dir.join("comm")) {
            Ok(comm) => comm.trim_end().to_string(),
            Err(_) => continue,
        };
        let exe = fs::read_link(dir.join("exe")).ok();

        processes.push(ProcessInfo::new(pid, comm).with_path(exe));
    }

    Ok(processes)
}

/// Collapse the file-backed mappings of a `/proc/<pid>/maps` listing into
/// one module per file, based at its lowest mapping
pub fn parse_maps(content: &str) -> Vec<ModuleInfo> {
    let mut modules: Vec<ModuleInfo> = Vec::new();

    for line in content.lines() {
        // address perms offset dev inode pathname
        let range = match line.split_whitespace().next() {
            Some(range) => range,
            None => continue,
        };
        let path = match line.find('/') {
            Some(idx) => line[idx..].trim_end(),
            None => continue,
        };
        let path = path.strip_suffix(" (deleted)").unwrap_or(path);

        let (start, end) = match range.split_once('-') {
            Some((start, end)) => match (
                u64::from_str_radix(start, 16),
                u64::from_str_radix(end, 16),
            ) {
                (Ok(start), Ok(end)) if end > start => (start, end),
                _ => continue,
            },
            None => continue,
        };

        let path = PathBuf::from(path);
        if let Some(existing) = modules.iter_mut().find(|m| m.path == path) {
            let existing_end = existing.end_address().as_u64().max(end);
            let base = existing.base_address.as_u64().min(start);
            existing.base_address = Address::new(base);
            existing.size = existing_end - base;
            continue;
        }

        let name = match path.file_name() {
            Some(name) => name.to_string_lossy().into_owned(),
            None => continue,
        };
        let mut module = ModuleInfo::new(name, Address::new(start), end - start);
        module.path = path;
        modules.push(module);
    }

    modules
}

/// List the modules mapped into `pid`
pub fn modules(pid: ProcessId) -> MemoryResult<Vec<ModuleInfo>> {
    let content =
        fs::read_to_string(proc_dir(pid).join("maps")).map_err(|e| map_proc_error(pid, e))?;
    Ok(parse_maps(&content))
}

/// Whether `pid` still exists and has not become a zombie
pub fn is_running(pid: ProcessId) -> bool {
    let stat = match fs::read_to_string(proc_dir(pid).join("stat")) {
        Ok(stat) => stat,
        Err(_) => return false,
    };
    // The command name may contain spaces and parentheses
    let state = stat
        .rfind(')')
        .and_then(|idx| stat[idx + 1..].split_whitespace().next());
    !matches!(state, Some("Z") | Some("X") | None)
}

/// Whether the current process runs with an effective uid of root
pub fn is_elevated() -> bool {
    fs::read_to_string("/proc/self/status")
        .ok()
        .and_then(|status| {
            status
                .lines()
                .find(|line| line.starts_with("Uid:"))
                .and_then(|line| line.split_whitespace().nth(2).map(|euid| euid == "0"))
        })
        .unwrap_or(false)
}
