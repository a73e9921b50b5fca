use criterion::{black_box, criterion_group, criterion_main, Criterion};
use money_editor::{Address, MockTarget, MoneyEditor, PointerChain, PointerResolver, TargetConfig};

fn game() -> MockTarget {
    MockTarget::new("RDR2.exe")
        .with_module("RDR2.exe", Address::new(0x400000), 0x0600_0000)
        .with_u64(Address::new(0x400000 + 0x052A7128), 0x7000)
        .with_u64(Address::new(0x7020), 0x9000)
        .with_i32(Address::new(0x9E60), 0)
}

fn benchmark_pointer_resolve(c: &mut Criterion) {
    let target = game();
    let session = target.open_session();
    let chain = PointerChain::new(0x052A7128, vec![0x20, 0xE60]);

    c.bench_function("resolve_two_level_chain", |b| {
        b.iter(|| {
            target.clear_ops();
            PointerResolver::new(&session)
                .resolve(black_box(Address::new(0x400000)), black_box(&chain))
                .unwrap()
        });
    });
}

fn benchmark_apply_value(c: &mut Criterion) {
    let target = game();
    let chain = PointerChain::new(0x052A7128, vec![0x20, 0xE60]);
    let mut editor = MoneyEditor::with_attacher(target.clone(), TargetConfig::new("RDR2.exe", chain));

    c.bench_function("apply_value", |b| {
        b.iter(|| {
            target.clear_ops();
            editor.apply_value(black_box(1500))
        });
    });
}

criterion_group!(benches, benchmark_pointer_resolve, benchmark_apply_value);
criterion_main!(benches);
