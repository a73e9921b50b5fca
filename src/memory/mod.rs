//! Memory access for an attached process
//!
//! [`ProcessMemory`] is the seam every consumer is written against: the real
//! [`ProcessHandle`](crate::process::ProcessHandle) implements it, and so does
//! the in-memory [`mock::MockSession`]. Typed accessors are provided methods
//! built on the two raw primitives.

pub mod mock;
pub mod writer;

pub use mock::{MemoryOp, MockSession, MockTarget, WriteBehavior};
pub use writer::{AppliedWrite, VerifiedWriter};

use crate::core::types::{Address, MemoryError, MemoryResult};

/// Raw and typed access to the memory of one attached process
pub trait ProcessMemory {
    /// Read into `buffer`, returning the number of bytes transferred
    fn read_memory(&self, address: Address, buffer: &mut [u8]) -> MemoryResult<usize>;

    /// Write `data`, returning the number of bytes transferred
    fn write_memory(&self, address: Address, data: &[u8]) -> MemoryResult<usize>;

    /// Base load address of a module inside the process
    fn module_base_address(&self, module_name: &str) -> MemoryResult<Address>;

    /// Whether the process behind this session is still running
    fn is_alive(&self) -> bool;

    /// Read exactly `buffer.len()` bytes; a short read is an error
    fn read_exact(&self, address: Address, buffer: &mut [u8]) -> MemoryResult<()> {
        let read = self.read_memory(address, buffer)?;
        if read != buffer.len() {
            return Err(MemoryError::read_failed(
                address,
                format!(
                    "Partial read: expected {} bytes, read {} bytes",
                    buffer.len(),
                    read
                ),
            ));
        }
        Ok(())
    }

    /// Write all of `data`; a short write is an error
    fn write_all(&self, address: Address, data: &[u8]) -> MemoryResult<()> {
        let written = self.write_memory(address, data)?;
        if written != data.len() {
            return Err(MemoryError::write_failed(
                address,
                format!(
                    "Partial write: expected {} bytes, wrote {} bytes",
                    data.len(),
                    written
                ),
            ));
        }
        Ok(())
    }

    /// Read a pointer-sized (8 byte) value
    fn read_u64(&self, address: Address) -> MemoryResult<u64> {
        let mut buffer = [0u8; 8];
        self.read_exact(address, &mut buffer)?;
        Ok(u64::from_ne_bytes(buffer))
    }

    /// Read a signed 4-byte value
    fn read_i32(&self, address: Address) -> MemoryResult<i32> {
        let mut buffer = [0u8; 4];
        self.read_exact(address, &mut buffer)?;
        Ok(i32::from_ne_bytes(buffer))
    }

    /// Write a signed 4-byte value
    fn write_i32(&self, address: Address, value: i32) -> MemoryResult<()> {
        self.write_all(address, &value.to_ne_bytes())
    }
}

impl<M: ProcessMemory + ?Sized> ProcessMemory for &M {
    fn read_memory(&self, address: Address, buffer: &mut [u8]) -> MemoryResult<usize> {
        (**self).read_memory(address, buffer)
    }

    fn write_memory(&self, address: Address, data: &[u8]) -> MemoryResult<usize> {
        (**self).write_memory(address, data)
    }

    fn module_base_address(&self, module_name: &str) -> MemoryResult<Address> {
        (**self).module_base_address(module_name)
    }

    fn is_alive(&self) -> bool {
        (**self).is_alive()
    }
}
