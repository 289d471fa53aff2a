//! Benchmarks for grouping and flattening.
//!
//! Run with: cargo bench -p coursetree-core

use coursetree_core::{Flattener, GroupIndex, ROOT_SENTINEL, Record, flatten};
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;

/// Balanced catalog: `roots` top-level entries, each with `fanout` children
/// and `fanout` grandchildren per child.
fn catalog(roots: i64, fanout: i64) -> Vec<Record> {
    let mut records = Vec::new();
    let mut next = 1i64;
    for _ in 0..roots {
        let root = next;
        next += 1;
        records.push(Record::new(root, format!("course {root}"), ROOT_SENTINEL));
        for _ in 0..fanout {
            let unit = next;
            next += 1;
            records.push(Record::new(unit, format!("unit {unit}"), root));
            for _ in 0..fanout {
                records.push(Record::new(next, format!("lesson {next}"), unit));
                next += 1;
            }
        }
    }
    // Arrive in reverse so every group actually needs sorting.
    records.reverse();
    records
}

fn bench_group_index(c: &mut Criterion) {
    let mut group = c.benchmark_group("core/group_index");
    for (roots, fanout) in [(10, 10), (100, 30)] {
        let records = catalog(roots, fanout);
        group.bench_with_input(
            BenchmarkId::from_parameter(records.len()),
            &records,
            |b, records| b.iter(|| black_box(GroupIndex::build(records.iter().cloned()))),
        );
    }
    group.finish();
}

fn bench_flatten(c: &mut Criterion) {
    let mut group = c.benchmark_group("core/flatten");
    for (roots, fanout) in [(10, 10), (100, 30)] {
        let index = GroupIndex::build(catalog(roots, fanout));
        group.bench_with_input(
            BenchmarkId::new("fresh", index.record_count()),
            &index,
            |b, index| b.iter(|| black_box(flatten(index, ROOT_SENTINEL))),
        );

        let mut flattener = Flattener::new();
        group.bench_with_input(
            BenchmarkId::new("reused", index.record_count()),
            &index,
            |b, index| b.iter(|| black_box(flattener.flatten(index, ROOT_SENTINEL))),
        );
    }
    group.finish();
}

fn bench_deep_chain(c: &mut Criterion) {
    let records: Vec<Record> = (1..=100_000)
        .map(|id| Record::new(id, "n", id - 1))
        .collect();
    let index = GroupIndex::build(records);
    c.bench_function("core/flatten/chain_100k", |b| {
        b.iter(|| black_box(flatten(&index, ROOT_SENTINEL)))
    });
}

criterion_group!(benches, bench_group_index, bench_flatten, bench_deep_chain);
criterion_main!(benches);
