// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use criterion::{
    BatchSize, BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main,
};

use rampart_vec::RampartVec;

// Fast mode: FAST_BENCH=1 cargo bench -p benchmarks --bench vec
fn is_fast_mode() -> bool {
    std::env::var("FAST_BENCH")
        .map(|v| v == "1")
        .unwrap_or(false)
}

fn configure_group(group: &mut criterion::BenchmarkGroup<criterion::measurement::WallTime>) {
    if is_fast_mode() {
        group.measurement_time(std::time::Duration::from_millis(500));
        group.sample_size(10);
    } else {
        group.measurement_time(std::time::Duration::from_secs(3));
        group.sample_size(50);
    }
}

// =============================================================================
// push: growth from empty
// =============================================================================

fn bench_push_from_empty(c: &mut Criterion) {
    let mut group = c.benchmark_group("push_from_empty");
    configure_group(&mut group);

    for size in [100, 1_000, 10_000, 100_000] {
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("Vec", size), &size, |b, &s| {
            b.iter(|| {
                let mut vec = Vec::new();
                for i in 0..s {
                    vec.push(i as u64);
                }
                black_box(vec)
            });
        });

        group.bench_with_input(BenchmarkId::new("RampartVec", size), &size, |b, &s| {
            b.iter(|| {
                let mut vec = RampartVec::new();
                for i in 0..s {
                    vec.push(i as u64).expect("Failed to push(..)");
                }
                black_box(vec)
            });
        });
    }

    group.finish();
}

// =============================================================================
// push: reserved capacity
// =============================================================================

fn bench_push_reserved(c: &mut Criterion) {
    let mut group = c.benchmark_group("push_reserved");
    configure_group(&mut group);

    for size in [100, 1_000, 10_000, 100_000] {
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("Vec", size), &size, |b, &s| {
            let mut vec = Vec::with_capacity(s);
            b.iter(|| {
                vec.clear();
                for i in 0..s {
                    vec.push(i as u64);
                }
                black_box(&vec);
            });
        });

        group.bench_with_input(BenchmarkId::new("RampartVec", size), &size, |b, &s| {
            let mut vec = RampartVec::with_capacity(s).expect("Failed to with_capacity(..)");
            b.iter(|| {
                vec.clear();
                for i in 0..s {
                    vec.push(i as u64).expect("Failed to push(..)");
                }
                black_box(&vec);
            });
        });
    }

    group.finish();
}

// =============================================================================
// insert: middle of the sequence
// =============================================================================

fn bench_insert_middle(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert_middle");
    configure_group(&mut group);

    for size in [100, 1_000, 10_000] {
        group.throughput(Throughput::Elements(1));

        group.bench_with_input(BenchmarkId::new("Vec", size), &size, |b, &s| {
            b.iter_batched(
                || (0..s as u64).collect::<Vec<_>>(),
                |mut vec| {
                    vec.insert(s / 2, u64::MAX);
                    black_box(vec)
                },
                BatchSize::SmallInput,
            );
        });

        group.bench_with_input(BenchmarkId::new("RampartVec", size), &size, |b, &s| {
            b.iter_batched(
                || (0..s as u64).collect::<RampartVec<_>>(),
                |mut vec| {
                    vec.insert(s / 2, u64::MAX).expect("Failed to insert(..)");
                    black_box(vec)
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

// =============================================================================
// insert_n: bulk clone into a reallocated buffer
// =============================================================================

fn bench_insert_n(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert_n");
    configure_group(&mut group);

    for size in [100, 1_000, 10_000] {
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("Vec", size), &size, |b, &s| {
            b.iter_batched(
                || (0..s as u64).collect::<Vec<_>>(),
                |mut vec| {
                    vec.splice(s / 2..s / 2, std::iter::repeat_n(7u64, s));
                    black_box(vec)
                },
                BatchSize::SmallInput,
            );
        });

        group.bench_with_input(BenchmarkId::new("RampartVec", size), &size, |b, &s| {
            b.iter_batched(
                || (0..s as u64).collect::<RampartVec<_>>(),
                |mut vec| {
                    vec.insert_n(s / 2, s, &7).expect("Failed to insert_n(..)");
                    black_box(vec)
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

// =============================================================================
// erase: front removal and unordered removal
// =============================================================================

fn bench_erase(c: &mut Criterion) {
    let mut group = c.benchmark_group("erase");
    configure_group(&mut group);

    for size in [1_000, 10_000] {
        group.throughput(Throughput::Elements(1));

        group.bench_with_input(BenchmarkId::new("erase_front", size), &size, |b, &s| {
            b.iter_batched(
                || (0..s as u64).collect::<RampartVec<_>>(),
                |mut vec| {
                    black_box(vec.erase(0).expect("Failed to erase(..)"));
                    vec
                },
                BatchSize::SmallInput,
            );
        });

        group.bench_with_input(BenchmarkId::new("erase_unordered_front", size), &size, |b, &s| {
            b.iter_batched(
                || (0..s as u64).collect::<RampartVec<_>>(),
                |mut vec| {
                    black_box(vec.erase_unordered(0).expect("Failed to erase_unordered(..)"));
                    vec
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_push_from_empty,
    bench_push_reserved,
    bench_insert_middle,
    bench_insert_n,
    bench_erase
);
criterion_main!(benches);
