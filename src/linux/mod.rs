//! Linux process backend built on procfs

pub mod procfs;
pub mod session;

pub use procfs::{enumerate_processes, is_elevated};
pub use session::ProcessSession;
