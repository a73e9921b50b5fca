//! Error types for process attachment, pointer resolution and verified writes

use super::Address;
use thiserror::Error;

/// Main error type for memory operations
#[derive(Error, Debug)]
pub enum MemoryError {
    #[error("Process not found: {0}")]
    ProcessNotFound(String),

    #[error("Insufficient privileges: {0}")]
    InsufficientPrivileges(String),

    #[error("Module not found: {0}")]
    ModuleNotFound(String),

    #[error("Failed to read memory at {address}: {reason}")]
    ReadFailed { address: Address, reason: String },

    #[error("Failed to write memory at {address}: {reason}")]
    WriteFailed { address: Address, reason: String },

    #[error("Invalid memory address: {0}")]
    InvalidAddress(String),

    #[error("Invalid pointer chain: {0}")]
    InvalidPointerChain(String),

    #[error("Pointer chain broken at level {level}: {source}")]
    UnresolvedPointer {
        level: usize,
        #[source]
        source: Box<MemoryError>,
    },

    #[error("Not attached to target process: {source}")]
    NotAttached {
        #[source]
        source: Box<MemoryError>,
    },

    #[error("Verification failed at {address}: wrote {expected}, read back {actual}")]
    VerificationMismatch {
        address: Address,
        expected: i32,
        actual: i32,
    },

    #[error("Amount {amount} is out of range (maximum {max})")]
    AmountOutOfRange { amount: u64, max: u64 },

    #[error("Invalid handle: {0}")]
    InvalidHandle(String),

    #[error("Unsupported operation: {0}")]
    UnsupportedOperation(String),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result type alias for memory operations
pub type MemoryResult<T> = Result<T, MemoryError>;

impl MemoryError {
    /// Creates a read failed error
    pub fn read_failed(address: Address, reason: impl Into<String>) -> Self {
        MemoryError::ReadFailed {
            address,
            reason: reason.into(),
        }
    }

    /// Creates a write failed error
    pub fn write_failed(address: Address, reason: impl Into<String>) -> Self {
        MemoryError::WriteFailed {
            address,
            reason: reason.into(),
        }
    }

    /// Wraps a failed pointer dereference at the given chain level
    pub fn unresolved(level: usize, source: MemoryError) -> Self {
        MemoryError::UnresolvedPointer {
            level,
            source: Box::new(source),
        }
    }

    /// Wraps the reason an implicit attach did not succeed
    pub fn not_attached(source: MemoryError) -> Self {
        MemoryError::NotAttached {
            source: Box::new(source),
        }
    }

    /// Whether this error came out of walking the pointer chain
    pub fn is_resolution_failure(&self) -> bool {
        matches!(
            self,
            MemoryError::UnresolvedPointer { .. } | MemoryError::InvalidPointerChain(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = MemoryError::ProcessNotFound("RDR2.exe".to_string());
        assert_eq!(err.to_string(), "Process not found: RDR2.exe");

        let err = MemoryError::read_failed(Address::new(0x1000), "page fault");
        assert_eq!(err.to_string(), "Failed to read memory at 0x1000: page fault");

        let err = MemoryError::VerificationMismatch {
            address: Address::new(0x1000),
            expected: 150000,
            actual: 149900,
        };
        assert_eq!(
            err.to_string(),
            "Verification failed at 0x1000: wrote 150000, read back 149900"
        );
    }

    #[test]
    fn test_unresolved_wraps_source() {
        use std::error::Error as _;

        let err = MemoryError::unresolved(
            2,
            MemoryError::read_failed(Address::new(0xE60), "unmapped"),
        );
        assert!(err.to_string().contains("level 2"));
        assert!(err.is_resolution_failure());

        let source = err.source().expect("source is kept");
        assert!(source.to_string().contains("0xE60"));
    }

    #[test]
    fn test_not_attached_wraps_source() {
        let err = MemoryError::not_attached(MemoryError::ProcessNotFound("game".to_string()));
        match err {
            MemoryError::NotAttached { source } => {
                assert!(matches!(*source, MemoryError::ProcessNotFound(_)));
            }
            _ => panic!("Wrong error type"),
        }
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "test");
        let mem_err: MemoryError = io_err.into();
        assert!(matches!(mem_err, MemoryError::IoError(_)));
        assert!(!mem_err.is_resolution_failure());
    }
}
