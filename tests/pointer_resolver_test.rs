//! Pointer chain resolution through the public API

use money_editor::{Address, MemoryError, MockTarget, PointerChain, PointerResolver};

fn chain_of_three() -> MockTarget {
    MockTarget::new("game.exe")
        .with_u64(Address::new(0x1000_0100), 0x2000_0000)
        .with_u64(Address::new(0x2000_0008), 0x3000_0000)
        .with_u64(Address::new(0x3000_0010), 0x4000_0000)
}

#[test]
fn test_three_level_chain() {
    let target = chain_of_three();
    let session = target.open_session();
    let chain = PointerChain::new(0x100, vec![0x8, 0x10, 0x18]);

    let address = PointerResolver::new(&session)
        .resolve(Address::new(0x1000_0000), &chain)
        .unwrap();
    assert_eq!(address, Address::new(0x4000_0018));
    assert_eq!(target.read_count(), 3);
}

#[test]
fn test_each_level_reports_its_depth() {
    let chain = PointerChain::new(0x100, vec![0x8, 0x10, 0x18]);

    // Knock out the pointer read at each level in turn
    let slots = [0x1000_0100u64, 0x2000_0008, 0x3000_0010];
    for (level, slot) in slots.iter().enumerate() {
        let target = chain_of_three();
        target.poke_u64(Address::new(*slot), 0);
        let session = target.open_session();

        match PointerResolver::new(&session).resolve(Address::new(0x1000_0000), &chain) {
            Err(MemoryError::UnresolvedPointer { level: failed, .. }) => assert_eq!(failed, level),
            other => panic!("level {}: expected UnresolvedPointer, got {:?}", level, other),
        }
    }
}

#[test]
fn test_unresolved_pointer_keeps_source() {
    use std::error::Error;

    let target = MockTarget::new("game.exe");
    let session = target.open_session();
    let chain = PointerChain::new(0x100, vec![0x8]);

    let err = PointerResolver::new(&session)
        .resolve(Address::new(0x1000_0000), &chain)
        .unwrap_err();
    let source = err.source().expect("resolution errors carry their cause");
    assert!(source.to_string().contains("0x10000100"));
}

#[test]
fn test_module_base_overflow() {
    let target = MockTarget::new("game.exe");
    let session = target.open_session();
    let chain = PointerChain::new(0x10, vec![0x8]);

    let result = PointerResolver::new(&session).resolve(Address::new(u64::MAX), &chain);
    assert!(matches!(
        result,
        Err(MemoryError::UnresolvedPointer { level: 0, .. })
    ));
    assert_eq!(target.read_count(), 0);
}

#[test]
fn test_chain_from_toml() {
    let chain: PointerChain = toml::from_str("base_offset = 0x052A7128\noffsets = [0x20, 0xE60]").unwrap();
    assert_eq!(chain, PointerChain::new(0x052A7128, vec![0x20, 0xE60]));
}
