//! Benchmarks for value boxes and record replacement.

use criterion::{Criterion, criterion_group, criterion_main};
use odata_kit::prelude::*;
use serde_json::json;
use std::hint::black_box;

fn bench_boxes(c: &mut Criterion) {
    let mut group = c.benchmark_group("boxes");

    let number = NumberBox::with_options(
        1234567.891,
        NumberOptions::default().use_grouping(true).fraction_digits(2),
    );
    group.bench_function("number_format", |b| b.iter(|| black_box(&number).to_string()));
    group.bench_function("number_parse", |b| {
        b.iter(|| black_box(&number).parse(black_box("1.234.567,891")))
    });

    let text = ValueBox::new("I'm a \"hero\"");
    group.bench_function("string_to_filter", |b| b.iter(|| black_box(&text).to_filter()));
    group.bench_function("string_from_filter", |b| {
        b.iter(|| ValueBox::from_filter(black_box("'I''m a \"hero\"'"), ValueOptions::default()))
    });

    group.finish();
}

fn bench_replace(c: &mut Criterion) {
    let schema = EntitySchema::new("Visits")
        .property(PropertySpec::new("PAID").kind("flag"))
        .property(PropertySpec::new("AMOUNT").kind("money"))
        .property(PropertySpec::new("IDDOCTOR").kind("doctor").expand("Doctor", "Name"))
        .register("flag", BoolOptions::default())
        .register("money", NumberOptions::default().fraction_digits(2))
        .register("doctor", LookupOptions::default());

    let page: Vec<Record> = (0..100)
        .map(|i| {
            Record::from_json(json!({
                "PAID": i % 2,
                "AMOUNT": i * 10,
                "IDDOCTOR": i,
                "Doctor": { "Name": format!("Dr. {}", i) },
            }))
        })
        .collect();

    c.bench_function("replace_all_100", |b| {
        b.iter_batched(
            || page.clone(),
            |mut records| {
                schema.replace_all(&mut records);
                records
            },
            criterion::BatchSize::SmallInput,
        )
    });
}

criterion_group!(benches, bench_boxes, bench_replace);
criterion_main!(benches);
