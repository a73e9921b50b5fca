//! Pointer chain resolution
//!
//! A chain starts at a fixed offset from a module's base, where the first
//! pointer lives. Every following offset but the last is added to the
//! current pointer and dereferenced again; the last offset is only added,
//! yielding the address of the value itself.

use crate::core::types::{Address, MemoryError, MemoryResult};
use crate::memory::ProcessMemory;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// Offsets leading from a module base to a value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointerChain {
    /// Offset from the module base to the first pointer
    pub base_offset: u64,
    /// Offsets applied in order after the first dereference
    pub offsets: Vec<u64>,
}

impl PointerChain {
    pub fn new(base_offset: u64, offsets: impl Into<Vec<u64>>) -> Self {
        PointerChain {
            base_offset,
            offsets: offsets.into(),
        }
    }

    /// Number of pointer reads a resolution performs
    pub fn depth(&self) -> usize {
        self.offsets.len()
    }

    /// A chain needs at least one offset to name a value
    pub fn validate(&self) -> MemoryResult<()> {
        if self.offsets.is_empty() {
            return Err(MemoryError::InvalidPointerChain(
                "offset list is empty".to_string(),
            ));
        }
        Ok(())
    }
}

impl fmt::Display for PointerChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[base+0x{:X}]", self.base_offset)?;
        for offset in &self.offsets {
            write!(f, " -> +0x{:X}", offset)?;
        }
        Ok(())
    }
}

/// Walks a [`PointerChain`] through a process's memory
///
/// Nothing is cached: every call re-reads the whole chain.
pub struct PointerResolver<'a, M: ProcessMemory + ?Sized> {
    memory: &'a M,
}

impl<'a, M: ProcessMemory + ?Sized> PointerResolver<'a, M> {
    pub fn new(memory: &'a M) -> Self {
        PointerResolver { memory }
    }

    /// Compute the absolute address of the value `chain` points at
    ///
    /// Read failures come back as [`MemoryError::UnresolvedPointer`] tagged
    /// with the level that failed: 0 for the base pointer, `i` for the read
    /// through `offsets[i - 1]`. Null or out of range pointers fail the same
    /// way, wrapping [`MemoryError::InvalidAddress`]. Adding the final offset
    /// is reported at level `offsets.len()`.
    pub fn resolve(&self, module_base: Address, chain: &PointerChain) -> MemoryResult<Address> {
        chain.validate()?;
        let (last, walk) = chain.offsets.split_last().ok_or_else(|| {
            MemoryError::InvalidPointerChain("offset list is empty".to_string())
        })?;

        let base_slot = module_base
            .offset(chain.base_offset)
            .map_err(|e| MemoryError::unresolved(0, e))?;
        let base = self.deref(0, base_slot)?;

        let pointer = walk
            .iter()
            .enumerate()
            .try_fold(base, |pointer, (i, &offset)| {
                let level = i + 1;
                let slot = pointer
                    .offset(offset)
                    .map_err(|e| MemoryError::unresolved(level, e))?;
                self.deref(level, slot)
            })?;

        // The final offset is added, never dereferenced
        let level = chain.offsets.len();
        let address = pointer
            .offset(*last)
            .map_err(|e| MemoryError::unresolved(level, e))?;
        if !address.is_plausible() {
            return Err(MemoryError::unresolved(
                level,
                MemoryError::InvalidAddress(format!("resolved address {} is out of range", address)),
            ));
        }

        debug!(%module_base, %chain, %address, "resolved pointer chain");
        Ok(address)
    }

    fn deref(&self, level: usize, slot: Address) -> MemoryResult<Address> {
        let pointer = self
            .memory
            .read_u64(slot)
            .map(Address::new)
            .map_err(|e| MemoryError::unresolved(level, e))?;

        if !pointer.is_plausible() {
            return Err(MemoryError::unresolved(
                level,
                MemoryError::InvalidAddress(format!(
                    "pointer {} read from {} is not a user-mode address",
                    pointer, slot
                )),
            ));
        }

        debug!(level, %slot, %pointer, "dereferenced");
        Ok(pointer)
    }
}
