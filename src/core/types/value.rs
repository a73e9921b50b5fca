//! Fixed-point money value stored in the target as a 4-byte cents integer

use super::error::{MemoryError, MemoryResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Default scale between whole currency units and the stored integer
pub const CENTS_PER_UNIT: u32 = 100;

/// Largest whole amount whose cents encoding fits an `i32` at the default scale
pub const MAX_ENCODABLE_AMOUNT: u64 = (i32::MAX as u64) / (CENTS_PER_UNIT as u64);

/// A money amount together with its in-memory encoding
///
/// The stored representation is always `units * multiplier`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoneyValue {
    raw: i32,
    multiplier: u32,
}

impl MoneyValue {
    /// Encodes a whole amount, rejecting it if it exceeds `max_amount` or the
    /// scaled value does not fit in four bytes
    pub fn from_units(amount: u64, multiplier: u32, max_amount: u64) -> MemoryResult<Self> {
        let capacity = if multiplier == 0 {
            0
        } else {
            (i32::MAX as u64) / u64::from(multiplier)
        };
        let max = max_amount.min(capacity);
        if amount > max {
            return Err(MemoryError::AmountOutOfRange { amount, max });
        }

        // amount <= i32::MAX / multiplier, so neither step can overflow
        let raw = (amount * u64::from(multiplier)) as i32;
        Ok(MoneyValue { raw, multiplier })
    }

    /// Decodes a value read back from memory
    pub fn from_raw(raw: i32, multiplier: u32) -> Self {
        MoneyValue { raw, multiplier }
    }

    /// The integer exactly as it is stored in the target
    pub fn raw(&self) -> i32 {
        self.raw
    }

    /// Whole units, truncated toward zero
    pub fn units(&self) -> i64 {
        if self.multiplier == 0 {
            return i64::from(self.raw);
        }
        i64::from(self.raw) / i64::from(self.multiplier)
    }

    /// The fractional remainder in stored units
    pub fn fraction(&self) -> i64 {
        if self.multiplier == 0 {
            return 0;
        }
        (i64::from(self.raw) % i64::from(self.multiplier)).abs()
    }
}

impl fmt::Display for MoneyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.raw < 0 { "-" } else { "" };
        let units = self.units().abs();
        if self.multiplier <= 1 {
            return write!(f, "{}${}", sign, units);
        }
        let digits = (self.multiplier - 1).to_string().len();
        write!(
            f,
            "{}${}.{:0width$}",
            sign,
            units,
            self.fraction(),
            width = digits
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encoding_scales_by_multiplier() {
        let value = MoneyValue::from_units(1500, CENTS_PER_UNIT, 999_999_999).unwrap();
        assert_eq!(value.raw(), 150000);
        assert_eq!(value.units(), 1500);
        assert_eq!(value.fraction(), 0);
    }

    #[test]
    fn test_zero_is_valid() {
        let value = MoneyValue::from_units(0, CENTS_PER_UNIT, 100).unwrap();
        assert_eq!(value.raw(), 0);
    }

    #[test]
    fn test_configured_maximum_is_enforced() {
        assert!(MoneyValue::from_units(100, CENTS_PER_UNIT, 100).is_ok());
        match MoneyValue::from_units(101, CENTS_PER_UNIT, 100) {
            Err(MemoryError::AmountOutOfRange { amount, max }) => {
                assert_eq!(amount, 101);
                assert_eq!(max, 100);
            }
            other => panic!("Expected AmountOutOfRange, got {:?}", other),
        }
    }

    #[test]
    fn test_four_byte_capacity_is_enforced() {
        assert_eq!(MAX_ENCODABLE_AMOUNT, 21_474_836);

        let top = MoneyValue::from_units(MAX_ENCODABLE_AMOUNT, CENTS_PER_UNIT, 999_999_999);
        assert_eq!(top.unwrap().raw(), 2_147_483_600);

        let over = MoneyValue::from_units(MAX_ENCODABLE_AMOUNT + 1, CENTS_PER_UNIT, 999_999_999);
        assert!(matches!(
            over,
            Err(MemoryError::AmountOutOfRange { max: MAX_ENCODABLE_AMOUNT, .. })
        ));
    }

    #[test]
    fn test_display() {
        assert_eq!(MoneyValue::from_raw(150000, 100).to_string(), "$1500.00");
        assert_eq!(MoneyValue::from_raw(150005, 100).to_string(), "$1500.05");
        assert_eq!(MoneyValue::from_raw(-250, 100).to_string(), "-$2.50");
        assert_eq!(MoneyValue::from_raw(42, 1).to_string(), "$42");
    }
}
