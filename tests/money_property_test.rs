//! Property: a reported success always leaves exactly amount * 100 in memory

use money_editor::{
    Address, MemoryError, MockTarget, MoneyEditor, MoneyValue, PointerChain, TargetConfig,
    MAX_ENCODABLE_AMOUNT,
};
use proptest::prelude::*;

fn target() -> MockTarget {
    MockTarget::new("RDR2.exe")
        .with_module("RDR2.exe", Address::new(0x400000), 0x1000)
        .with_u64(Address::new(0x400010), 0x10_0000)
        .with_i32(Address::new(0x10_0E60), 0)
}

fn config() -> TargetConfig {
    TargetConfig::new("RDR2.exe", PointerChain::new(0x10, vec![0xE60]))
}

proptest! {
    #[test]
    fn success_implies_cents_stored(amount in 0u64..=MAX_ENCODABLE_AMOUNT) {
        let target = target();
        let mut editor = MoneyEditor::with_attacher(target.clone(), config());

        prop_assert!(editor.apply_value(amount));
        prop_assert_eq!(
            target.peek_i32(Address::new(0x10_0E60)),
            Some((amount * 100) as i32)
        );
    }

    #[test]
    fn out_of_range_never_touches_memory(amount in (MAX_ENCODABLE_AMOUNT + 1)..=u64::MAX) {
        let target = target();
        let mut editor = MoneyEditor::with_attacher(target.clone(), config());

        let result = editor.set_value(amount);
        let out_of_range = matches!(result, Err(MemoryError::AmountOutOfRange { .. }));
        prop_assert!(out_of_range);
        prop_assert!(target.ops().is_empty());
    }

    #[test]
    fn raw_decodes_to_units(amount in 0u64..=MAX_ENCODABLE_AMOUNT) {
        let value = MoneyValue::from_units(amount, 100, MAX_ENCODABLE_AMOUNT).unwrap();
        let decoded = MoneyValue::from_raw(value.raw(), 100);
        prop_assert_eq!(decoded.units(), amount as i64);
        prop_assert_eq!(decoded.fraction(), 0);
    }
}
