//! Process and module descriptors produced by the platform enumerators

use super::{Address, ProcessId};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Information about a running process
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessInfo {
    pub pid: ProcessId,
    pub name: String,
    pub path: Option<PathBuf>,
}

impl ProcessInfo {
    /// Creates a new ProcessInfo with minimal information
    pub fn new(pid: ProcessId, name: String) -> Self {
        ProcessInfo {
            pid,
            name,
            path: None,
        }
    }

    /// Attaches the executable path
    pub fn with_path(mut self, path: Option<PathBuf>) -> Self {
        self.path = path;
        self
    }

    /// Whether this process answers to `name` under the platform's case policy
    ///
    /// The executable file name counts as well as the reported process name,
    /// since Linux truncates `comm` to 15 bytes.
    pub fn name_matches(&self, name: &str) -> bool {
        if names_equal(&self.name, name) {
            return true;
        }
        self.path
            .as_ref()
            .and_then(|p| p.file_name())
            .and_then(|f| f.to_str())
            .is_some_and(|file_name| names_equal(file_name, name))
    }
}

/// Information about a loaded module in a process
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModuleInfo {
    pub name: String,
    pub path: PathBuf,
    pub base_address: Address,
    pub size: u64,
}

impl ModuleInfo {
    /// Creates a new ModuleInfo
    pub fn new(name: String, base_address: Address, size: u64) -> Self {
        ModuleInfo {
            name,
            path: PathBuf::new(),
            base_address,
            size,
        }
    }

    /// Gets the end address of the module (exclusive)
    pub fn end_address(&self) -> Address {
        Address::new(self.base_address.as_u64().saturating_add(self.size))
    }

    /// Whether this module answers to `name` under the platform's case policy
    pub fn name_matches(&self, name: &str) -> bool {
        names_equal(&self.name, name)
    }
}

/// Compares process or module names: case-insensitive on Windows, exact elsewhere
pub fn names_equal(a: &str, b: &str) -> bool {
    if cfg!(windows) {
        a.eq_ignore_ascii_case(b)
    } else {
        a == b
    }
}
