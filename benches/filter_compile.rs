//! Benchmarks for predicate construction and `$filter` compilation.

use chrono::{TimeZone, Utc};
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use odata_kit::prelude::*;
use serde_json::json;
use std::hint::black_box;

/// Create an AND of `count` equality checks.
fn create_and_predicate(count: usize) -> Predicate {
    Predicate::and((0..count).map(|i| Predicate::eq(format!("field_{}", i), i as i64)))
}

/// Create a deeply nested predicate.
fn create_nested_predicate(depth: usize) -> Predicate {
    if depth == 0 {
        Predicate::eq("leaf", true)
    } else {
        Predicate::and([
            Predicate::or([
                create_nested_predicate(depth - 1),
                Predicate::eq("check", depth as i64),
            ]),
            Predicate::not(Predicate::eq("deleted", true)),
        ])
    }
}

fn bench_predicate_creation(c: &mut Criterion) {
    let mut group = c.benchmark_group("predicate_creation");

    group.bench_function("equals", |b| b.iter(|| black_box(Predicate::eq("id", 42))));

    group.bench_function("from_json", |b| {
        let tree = json!({
            "and": [
                { "eq": ["IDDOCTOR", 3] },
                { "or": [{ "gt": ["X", 1] }, { "eq": ["X", null] }] }
            ]
        });
        b.iter(|| black_box(Predicate::from_json(black_box(&tree))))
    });

    for count in [5, 10, 50] {
        group.bench_with_input(BenchmarkId::new("and", count), &count, |b, &count| {
            b.iter(|| black_box(create_and_predicate(count)))
        });
    }

    group.finish();
}

fn bench_compile(c: &mut Criterion) {
    let mut group = c.benchmark_group("compile");

    let date = Utc.with_ymd_and_hms(2021, 4, 30, 22, 0, 0).unwrap();
    let end_to_end = Predicate::and([
        Predicate::eq("IDDOCTOR", 3),
        Predicate::or([Predicate::gt("X", date), Predicate::eq("X", Predicate::Null)]),
    ]);
    group.bench_function("end_to_end", |b| b.iter(|| compile(black_box(&end_to_end))));

    let boxed = Predicate::in_list(
        "Name",
        (0..10).map(|i| ValueBox::new(format!("it's \"item\" {}", i))),
    );
    group.bench_function("boxed_strings", |b| b.iter(|| compile(black_box(&boxed))));

    for count in [10, 100] {
        let tree = create_and_predicate(count);
        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::new("and", count), &tree, |b, tree| {
            b.iter(|| compile(black_box(tree)))
        });
    }

    for depth in [3, 6] {
        let tree = create_nested_predicate(depth);
        group.bench_with_input(BenchmarkId::new("nested", depth), &tree, |b, tree| {
            b.iter(|| compile(black_box(tree)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_predicate_creation, bench_compile);
criterion_main!(benches);
