//! Benchmarks for dependency ordering and INSERT generation.
//!
//! Tests:
//! - Creation order resolution over chains of tables
//! - Row generation throughput for a mixed-type table
//! - Decoding list-shaped text output

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::rngs::StdRng;
use rand::SeedableRng;
use sql_seeder::insert::{populate, PopulateOptions};
use sql_seeder::normalize::normalize_output;
use sql_seeder::schema::resolve_order;
use std::hint::black_box;

/// `count` tables where each references the previous one, listed child first
fn chain_schema(count: usize) -> Vec<String> {
    (0..count)
        .rev()
        .map(|i| {
            if i == 0 {
                "CREATE TABLE t0 (id INT PRIMARY KEY, name VARCHAR(20))".to_string()
            } else {
                format!(
                    "CREATE TABLE t{i} (id INT PRIMARY KEY, parent_id INT NOT NULL, \
                     FOREIGN KEY (parent_id) REFERENCES t{}(id))",
                    i - 1
                )
            }
        })
        .collect()
}

fn bench_resolve_order(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolve_order");

    for count in [10, 100, 500] {
        let schema = chain_schema(count);
        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(
            BenchmarkId::new("chain", format!("{}_tables", count)),
            &schema,
            |b, schema| b.iter(|| black_box(resolve_order(black_box(schema)).unwrap())),
        );
    }

    group.finish();
}

fn bench_populate_rows(c: &mut Criterion) {
    let mut group = c.benchmark_group("populate_rows");

    let schema = [
        "CREATE TABLE customers (id INT PRIMARY KEY AUTO_INCREMENT, name VARCHAR(50) NOT NULL)",
        "CREATE TABLE orders (id INT PRIMARY KEY, customer_id INT NOT NULL, \
         total DECIMAL(10,2), note TEXT, placed_on DATE, shipped_at DATETIME, \
         FOREIGN KEY (customer_id) REFERENCES customers(id))",
    ];

    for rows in [10, 1_000, 10_000] {
        group.throughput(Throughput::Elements(rows as u64 * 2));
        group.bench_with_input(BenchmarkId::new("rows", rows), &rows, |b, &rows| {
            let options = PopulateOptions::new(rows);
            b.iter(|| {
                let result = populate(&schema, &options, StdRng::seed_from_u64(42)).unwrap();
                black_box(result.statements().count())
            })
        });
    }

    group.finish();
}

fn bench_normalize(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalize");

    let items: Vec<String> = (0..200)
        .map(|i| format!("'INSERT INTO t VALUES ({i}, \"row {i}\")'"))
        .collect();
    let inputs = [
        ("json", format!("[{}]", (0..200).map(|i| format!("\"v{i}\"")).collect::<Vec<_>>().join(", "))),
        ("fenced_literal", format!("```python\n[{}]\n```", items.join(", "))),
        ("bracketed", format!("Result [v1]: [{}] done", (0..200).map(|i| format!("'item {i}'")).collect::<Vec<_>>().join(", "))),
    ];

    for (name, input) in &inputs {
        group.bench_with_input(BenchmarkId::new("strategy", name), input, |b, input| {
            b.iter(|| black_box(normalize_output(black_box(input)).unwrap()))
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_resolve_order,
    bench_populate_rows,
    bench_normalize
);
criterion_main!(benches);
