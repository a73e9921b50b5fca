//! Process enumeration and lookup by name

use crate::core::types::{MemoryError, MemoryResult, ProcessInfo};
use crate::process::platform;
use tracing::debug;

/// Enumerate all running processes
pub fn enumerate_processes() -> MemoryResult<Vec<ProcessInfo>> {
    platform::enumerate_processes()
}

/// Every running process whose name matches `name`
///
/// Windows compares case-insensitively; elsewhere the comparison is exact.
/// A match on the executable's file name counts as well as one on the
/// reported process name.
pub fn find_processes_by_name(name: &str) -> MemoryResult<Vec<ProcessInfo>> {
    Ok(enumerate_processes()?
        .into_iter()
        .filter(|p| p.name_matches(name))
        .collect())
}

/// The first running process whose name matches `name`
pub fn find_process_by_name(name: &str) -> MemoryResult<ProcessInfo> {
    let mut matches = find_processes_by_name(name)?.into_iter();
    let first = matches
        .next()
        .ok_or_else(|| MemoryError::ProcessNotFound(name.to_string()))?;

    let others: Vec<_> = matches.map(|p| p.pid).collect();
    if !others.is_empty() {
        debug!(
            name,
            chosen = first.pid,
            ?others,
            "multiple processes match, using the first"
        );
    }
    Ok(first)
}
