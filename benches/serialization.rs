use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use serde::{Deserialize, Serialize};
use toon_records::{from_str, to_string, Document};

#[derive(Serialize, Deserialize, Clone)]
struct User {
    id: u32,
    name: String,
    email: String,
    active: bool,
}

fn make_users(count: u32) -> Vec<User> {
    (0..count)
        .map(|i| User {
            id: i,
            name: format!("User {}", i),
            email: format!("user{}@example.com", i),
            active: i % 2 == 0,
        })
        .collect()
}

fn benchmark_serialize(c: &mut Criterion) {
    let mut group = c.benchmark_group("serialize_records");

    for size in [10, 100, 1000].iter() {
        let users = make_users(*size);
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| to_string(black_box(&users), "users"))
        });
    }
    group.finish();
}

fn benchmark_deserialize(c: &mut Criterion) {
    let mut group = c.benchmark_group("deserialize_records");

    for size in [10, 100, 1000].iter() {
        let toon = to_string(&make_users(*size), "users").unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| from_str::<User>(black_box(&toon)))
        });
    }
    group.finish();
}

fn benchmark_document_parse(c: &mut Criterion) {
    let toon = to_string(&make_users(100), "users").unwrap();

    c.bench_function("document_parse_100_rows", |b| {
        b.iter(|| Document::parse(black_box(&toon)))
    });
}

fn benchmark_document_render(c: &mut Criterion) {
    let doc = Document::parse(&to_string(&make_users(100), "users").unwrap()).unwrap();

    c.bench_function("document_render_100_rows", |b| {
        b.iter(|| black_box(&doc).to_string())
    });
}

criterion_group!(
    benches,
    benchmark_serialize,
    benchmark_deserialize,
    benchmark_document_parse,
    benchmark_document_render
);
criterion_main!(benches);
