//! Store Operation Benchmarks for flashscope
//!
//! Measures the throughput of the flash store's hot operations: writes,
//! flagging reads, and full mark-and-sweep cycles.

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use flashscope::store::FlashStore;
use std::sync::Arc;
use std::time::Duration;

/// Benchmark put operations
fn bench_put(c: &mut Criterion) {
    let store = Arc::new(FlashStore::new());

    let mut group = c.benchmark_group("put");
    group.throughput(Throughput::Elements(1));

    group.bench_function("put_text", |b| {
        let mut i = 0u64;
        b.iter(|| {
            store.put(format!("key:{}", i), "profile updated");
            i += 1;
        });
    });

    group.bench_function("put_overwrite", |b| {
        b.iter(|| {
            store.put("notice", black_box("profile updated"));
        });
    });

    group.finish();
}

/// Benchmark flagging reads
fn bench_get(c: &mut Criterion) {
    let store = Arc::new(FlashStore::new());

    // Pre-populate
    for i in 0..10_000 {
        store.put(format!("key:{}", i), format!("value:{}", i));
    }

    let mut group = c.benchmark_group("get");
    group.throughput(Throughput::Elements(1));

    group.bench_function("get_hit", |b| {
        let mut i = 0u64;
        b.iter(|| {
            let key = format!("key:{}", i % 10_000);
            black_box(store.get(&key));
            i += 1;
        });
    });

    group.bench_function("get_miss", |b| {
        b.iter(|| {
            black_box(store.get("missing"));
        });
    });

    group.bench_function("peek_hit", |b| {
        let mut i = 0u64;
        b.iter(|| {
            let key = format!("key:{}", i % 10_000);
            black_box(store.peek(&key));
            i += 1;
        });
    });

    group.finish();
}

/// Benchmark the full request hand-off cycle: write, read, sweep
fn bench_cycle(c: &mut Criterion) {
    let mut group = c.benchmark_group("cycle");

    for entries in [1usize, 16, 256] {
        group.throughput(Throughput::Elements(entries as u64));
        group.bench_function(format!("put_get_sweep_{}", entries), |b| {
            let store = FlashStore::new();
            b.iter(|| {
                for i in 0..entries {
                    store.put(format!("key:{}", i), "value");
                }
                for i in 0..entries {
                    black_box(store.get(&format!("key:{}", i)));
                }
                store.sweep();
            });
        });
    }

    group.finish();
}

/// Benchmark the bulk flag path used by the sweep-unused policy
fn bench_flag_all(c: &mut Criterion) {
    let mut group = c.benchmark_group("flag_all");
    group.measurement_time(Duration::from_secs(5));

    group.bench_function("flag_all_256_then_sweep", |b| {
        let store = FlashStore::new();
        b.iter(|| {
            for i in 0..256 {
                store.put(format!("key:{}", i), "value");
            }
            store.flag_all();
            store.sweep();
        });
    });

    group.finish();
}

criterion_group!(benches, bench_put, bench_get, bench_cycle, bench_flag_all);
criterion_main!(benches);
