//! Verified memory writes: write, read back, compare

use super::ProcessMemory;
use crate::core::types::{Address, MemoryError, MemoryResult};
use tracing::{debug, warn};

/// Outcome of a write that was confirmed by a verification read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppliedWrite {
    pub address: Address,
    pub value: i32,
}

/// Writer that confirms every write with an immediate read of the same address
pub struct VerifiedWriter<'a, M: ProcessMemory + ?Sized> {
    memory: &'a M,
}

impl<'a, M: ProcessMemory + ?Sized> VerifiedWriter<'a, M> {
    /// Create a new verified writer
    pub fn new(memory: &'a M) -> Self {
        VerifiedWriter { memory }
    }

    /// Write a 4-byte value and confirm it reads back unchanged
    ///
    /// A failed OS write surfaces as `WriteFailed`. A write that went through
    /// but reads back differently (the target raced us, or the address is
    /// wrong) surfaces as `VerificationMismatch`.
    pub fn write_i32(&self, address: Address, value: i32) -> MemoryResult<AppliedWrite> {
        debug!(%address, value, "writing value");
        self.memory.write_i32(address, value)?;

        let actual = self.memory.read_i32(address)?;
        if actual != value {
            warn!(%address, expected = value, actual, "verification read differs from write");
            return Err(MemoryError::VerificationMismatch {
                address,
                expected: value,
                actual,
            });
        }

        Ok(AppliedWrite { address, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::{MemoryOp, MockTarget, WriteBehavior};

    #[test]
    fn test_write_verified() {
        let target = MockTarget::new("game.exe").with_region(Address::new(0x1000), 4);
        let session = target.open_session();
        let writer = VerifiedWriter::new(&session);

        let applied = writer.write_i32(Address::new(0x1000), 150000).unwrap();
        assert_eq!(applied.value, 150000);
        assert_eq!(
            target.ops(),
            vec![
                MemoryOp::Write {
                    address: Address::new(0x1000),
                    data: 150000i32.to_ne_bytes().to_vec(),
                },
                MemoryOp::Read {
                    address: Address::new(0x1000),
                    len: 4,
                },
            ]
        );
    }

    #[test]
    fn test_discarded_write_is_a_mismatch() {
        let target = MockTarget::new("game.exe").with_i32(Address::new(0x1000), 500);
        target.set_write_behavior(WriteBehavior::Discard);
        let session = target.open_session();

        let result = VerifiedWriter::new(&session).write_i32(Address::new(0x1000), 150000);
        match result {
            Err(MemoryError::VerificationMismatch {
                expected, actual, ..
            }) => {
                assert_eq!(expected, 150000);
                assert_eq!(actual, 500);
            }
            other => panic!("Expected VerificationMismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_failed_write_skips_verification() {
        let target = MockTarget::new("game.exe").with_i32(Address::new(0x1000), 500);
        target.set_write_behavior(WriteBehavior::Fail);
        let session = target.open_session();

        let result = VerifiedWriter::new(&session).write_i32(Address::new(0x1000), 1);
        assert!(matches!(result, Err(MemoryError::WriteFailed { .. })));
        assert_eq!(target.read_count(), 0);
    }
}
