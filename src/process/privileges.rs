//! Elevation check for the current process

use crate::process::platform;

/// Whether this process runs with administrator (Windows) or root (Linux)
/// rights
///
/// Attaching to another user's process usually needs them; callers use this
/// to warn up front rather than fail later on attach.
pub fn is_elevated() -> bool {
    platform::is_elevated()
}
