// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use criterion::{BatchSize, BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use rampart_vec::Vector;

// Fast mode: FAST_BENCH=1 cargo bench -p benchmarks --bench vector
fn is_fast_mode() -> bool {
    std::env::var("FAST_BENCH").map(|v| v == "1").unwrap_or(false)
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
// push
// =============================================================================

fn bench_push_growing(c: &mut Criterion) {
    let mut group = c.benchmark_group("push_growing");
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

        group.bench_with_input(BenchmarkId::new("Vector", size), &size, |b, &s| {
            b.iter(|| {
                let mut vector = Vector::new();
                for i in 0..s {
                    vector.push(i as u64).expect("Failed to push(..)");
                }
                black_box(vector)
            });
        });
    }

    group.finish();
}

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

        group.bench_with_input(BenchmarkId::new("Vector", size), &size, |b, &s| {
            let mut vector = Vector::with_capacity(s).expect("Failed to with_capacity(..)");
            b.iter(|| {
                vector.clear();
                for i in 0..s {
                    vector.push(i as u64).expect("Failed to push(..)");
                }
                black_box(&vector);
            });
        });
    }

    group.finish();
}

// =============================================================================
// insert
// =============================================================================

fn bench_insert_front(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert_front");
    configure_group(&mut group);

    for size in [100, 1_000, 10_000] {
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("Vec", size), &size, |b, &s| {
            b.iter(|| {
                let mut vec = Vec::new();
                for i in 0..s {
                    vec.insert(0, i as u64);
                }
                black_box(vec)
            });
        });

        group.bench_with_input(BenchmarkId::new("Vector", size), &size, |b, &s| {
            b.iter(|| {
                let mut vector = Vector::new();
                for i in 0..s {
                    vector.insert(0, i as u64).expect("Failed to insert(..)");
                }
                black_box(vector)
            });
        });
    }

    group.finish();
}

fn bench_insert_slice_middle(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert_slice_middle");
    configure_group(&mut group);

    for size in [100, 1_000, 10_000, 100_000] {
        let source: Vec<u64> = (0..size as u64).collect();
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("Vec", size), &size, |b, &s| {
            b.iter_batched(
                || (0..s as u64).collect::<Vec<_>>(),
                |mut vec| {
                    vec.splice(s / 2..s / 2, source.iter().copied());
                    black_box(vec)
                },
                BatchSize::LargeInput,
            );
        });

        group.bench_with_input(BenchmarkId::new("Vector", size), &size, |b, &s| {
            b.iter_batched(
                || Vector::from_slice(&source).expect("Failed to from_slice(..)"),
                |mut vector| {
                    vector
                        .insert_from_slice(s / 2, &source)
                        .expect("Failed to insert_from_slice(..)");
                    black_box(vector)
                },
                BatchSize::LargeInput,
            );
        });
    }

    group.finish();
}

fn bench_insert_iter_middle(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert_iter_middle");
    configure_group(&mut group);

    for size in [100, 1_000, 10_000, 100_000] {
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("Vec", size), &size, |b, &s| {
            b.iter_batched(
                || (0..s as u64).collect::<Vec<_>>(),
                |mut vec| {
                    // Filtered iterators give no exact size hint.
                    vec.splice(s / 2..s / 2, (0..s as u64).filter(|i| i % 3 != 0));
                    black_box(vec)
                },
                BatchSize::LargeInput,
            );
        });

        group.bench_with_input(BenchmarkId::new("Vector", size), &size, |b, &s| {
            b.iter_batched(
                || Vector::from_iter_in(0..s as u64, rampart_alloc::Global).expect("Failed to from_iter_in(..)"),
                |mut vector| {
                    vector
                        .insert_iter(s / 2, (0..s as u64).filter(|i| i % 3 != 0))
                        .expect("Failed to insert_iter(..)");
                    black_box(vector)
                },
                BatchSize::LargeInput,
            );
        });
    }

    group.finish();
}

// =============================================================================
// erase
// =============================================================================

fn bench_erase_range_front(c: &mut Criterion) {
    let mut group = c.benchmark_group("erase_range_front");
    configure_group(&mut group);

    for size in [100, 1_000, 10_000, 100_000] {
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("Vec", size), &size, |b, &s| {
            b.iter_batched(
                || (0..s as u64).collect::<Vec<_>>(),
                |mut vec| {
                    vec.drain(..s / 4);
                    black_box(vec)
                },
                BatchSize::LargeInput,
            );
        });

        group.bench_with_input(BenchmarkId::new("Vector", size), &size, |b, &s| {
            b.iter_batched(
                || Vector::from_iter_in(0..s as u64, rampart_alloc::Global).expect("Failed to from_iter_in(..)"),
                |mut vector| {
                    vector.erase_range(..s / 4);
                    black_box(vector)
                },
                BatchSize::LargeInput,
            );
        });
    }

    group.finish();
}

criterion_group!(push_benches, bench_push_growing, bench_push_reserved);

criterion_group!(
    insert_benches,
    bench_insert_front,
    bench_insert_slice_middle,
    bench_insert_iter_middle,
    bench_erase_range_front
);

criterion_main!(push_benches, insert_benches);
