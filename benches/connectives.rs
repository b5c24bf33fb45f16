//! Benchmarks for connective application.

use candle_core::Device;
use criterion::{criterion_group, criterion_main, Criterion};
use tensem::{Connectives, TruthTable, TruthVector};

fn bench_primitives(c: &mut Criterion) {
    let device = Device::Cpu;
    let conn = Connectives::new(&device).unwrap();
    let t = TruthVector::truth_on(&device).unwrap();
    let f = TruthVector::falsity_on(&device).unwrap();
    let mut group = c.benchmark_group("connectives");

    group.bench_function("negation", |bench| {
        bench.iter(|| conn.not(&t).unwrap());
    });

    group.bench_function("conjunction", |bench| {
        bench.iter(|| conn.and(&t, &f).unwrap());
    });

    // Derived: five primitive applications
    group.bench_function("xor", |bench| {
        bench.iter(|| conn.xor(&t, &f).unwrap());
    });

    group.finish();
}

fn bench_truth_table(c: &mut Criterion) {
    let device = Device::Cpu;
    let conn = Connectives::new(&device).unwrap();

    c.bench_function("truth_table_xor", |bench| {
        bench.iter(|| TruthTable::evaluate(&device, |x, y| conn.xor(x, y)).unwrap());
    });
}

criterion_group!(benches, bench_primitives, bench_truth_table);
criterion_main!(benches);
