//! Memory address wrapper type with hex parsing and checked arithmetic

use super::error::{MemoryError, MemoryResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Highest user-mode address under 4-level paging on x86-64 Windows and Linux
///
/// Linux hosts running 5-level paging can hand out user pointers above this
/// (up to `0x00FF_FFFF_FFFF_FFFF`); those are treated as implausible.
pub const MAX_USER_ADDRESS: u64 = 0x0000_7FFF_FFFF_FFFF;

/// An absolute address inside the target process
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Address(pub u64);

impl Address {
    /// Creates a new address from a raw value
    pub const fn new(value: u64) -> Self {
        Address(value)
    }

    /// Creates a null address (0x0)
    pub const fn null() -> Self {
        Address(0)
    }

    /// Checks if the address is null
    pub const fn is_null(&self) -> bool {
        self.0 == 0
    }

    /// Whether the address can be a live user-mode pointer
    pub const fn is_plausible(&self) -> bool {
        self.0 != 0 && self.0 <= MAX_USER_ADDRESS
    }

    /// Adds an offset, returning `None` on overflow
    pub const fn checked_add(&self, offset: u64) -> Option<Self> {
        match self.0.checked_add(offset) {
            Some(value) => Some(Address(value)),
            None => None,
        }
    }

    /// Adds an offset, failing with `InvalidAddress` on overflow
    pub fn offset(&self, offset: u64) -> MemoryResult<Self> {
        self.checked_add(offset).ok_or_else(|| {
            MemoryError::InvalidAddress(format!("{} + 0x{:X} overflows", self, offset))
        })
    }

    /// Returns the raw value
    pub const fn as_u64(&self) -> u64 {
        self.0
    }
}

/// Parses a hex integer the way addresses and offsets are written in pointer tables
///
/// Every value is hex. The `0x`/`0X` and `$` prefixes are optional, so `20`
/// and `0x20` are the same offset.
pub fn parse_hex_u64(s: &str) -> Option<u64> {
    let s = s.trim();
    let digits = s
        .strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .or_else(|| s.strip_prefix('$'))
        .unwrap_or(s);
    if digits.is_empty() || digits.starts_with('+') {
        return None;
    }
    u64::from_str_radix(digits, 16).ok()
}

impl FromStr for Address {
    type Err = MemoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_hex_u64(s)
            .map(Address::new)
            .ok_or_else(|| MemoryError::InvalidAddress(s.trim().to_string()))
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:X}", self.0)
    }
}

impl fmt::LowerHex for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:016x}", self.0)
    }
}

impl fmt::UpperHex for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:016X}", self.0)
    }
}

impl From<u64> for Address {
    fn from(value: u64) -> Self {
        Address::new(value)
    }
}

impl From<Address> for u64 {
    fn from(address: Address) -> Self {
        address.0
    }
}
