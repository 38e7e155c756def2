use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use tops::{parse_document, to_string, tops, Mapping, Value};

fn service(i: usize) -> Value {
    let mut entries = Mapping::new();
    entries.insert("name".to_string(), Value::from(format!("service-{}", i)));
    entries.insert("host".to_string(), Value::from("10.0.0.1"));
    entries.insert(
        "ports".to_string(),
        Value::from(vec![Value::from("80"), Value::from("443")]),
    );
    entries.insert(
        "description".to_string(),
        Value::from(format!("backend number {}: handles \"{}\" traffic", i, i % 3)),
    );
    Value::from(entries)
}

fn services(size: usize) -> Value {
    let list: Vec<Value> = (0..size).map(service).collect();
    let mut root = Mapping::new();
    root.insert("services".to_string(), Value::from(list));
    Value::from(root)
}

fn benchmark_parse_simple(c: &mut Criterion) {
    let text = "name: demo\nversion: 3\ntags:\n  - fast\n  - small\n";

    c.bench_function("parse_simple_document", |b| {
        b.iter(|| parse_document(black_box(text)))
    });
}

fn benchmark_print_simple(c: &mut Criterion) {
    let value = tops!({ "name": "demo", "version": 3, "tags": ["fast", "small"] });

    c.bench_function("print_simple_document", |b| {
        b.iter(|| to_string(black_box(&value)))
    });
}

fn benchmark_parse_services(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_services");

    for size in [10, 50, 100, 500].iter() {
        let text = to_string(&services(*size));

        group.bench_with_input(BenchmarkId::from_parameter(size), &text, |b, text| {
            b.iter(|| parse_document(black_box(text)))
        });
    }
    group.finish();
}

fn benchmark_print_services(c: &mut Criterion) {
    let mut group = c.benchmark_group("print_services");

    for size in [10, 50, 100, 500].iter() {
        let value = services(*size);

        group.bench_with_input(BenchmarkId::from_parameter(size), &value, |b, value| {
            b.iter(|| to_string(black_box(value)))
        });
    }
    group.finish();
}

fn benchmark_deep_nesting(c: &mut Criterion) {
    let mut text = String::new();
    for depth in 0..64 {
        text.push_str(&" ".repeat(depth * 2));
        text.push_str(&format!("level{}:\n", depth));
    }

    c.bench_function("parse_deep_nesting", |b| {
        b.iter(|| parse_document(black_box(&text)))
    });
}

fn benchmark_comments(c: &mut Criterion) {
    let plain = to_string(&services(100));
    let commented: String = plain
        .lines()
        .flat_map(|line| ["# note", line])
        .collect::<Vec<_>>()
        .join("\n");

    let mut group = c.benchmark_group("comments");

    group.bench_function("without_comments", |b| {
        b.iter(|| parse_document(black_box(&plain)))
    });

    group.bench_function("with_comments", |b| {
        b.iter(|| parse_document(black_box(&commented)))
    });

    group.finish();
}

fn benchmark_comparison_with_json(c: &mut Criterion) {
    let value = services(100);
    let tops_str = to_string(&value);
    let json_str = serde_json::to_string(&value).unwrap();

    let mut group = c.benchmark_group("comparison");

    group.bench_function("tops_parse", |b| {
        b.iter(|| parse_document(black_box(&tops_str)))
    });

    group.bench_function("json_parse", |b| {
        b.iter(|| serde_json::from_str::<Value>(black_box(&json_str)))
    });

    group.finish();
}

criterion_group!(
    benches,
    benchmark_parse_simple,
    benchmark_print_simple,
    benchmark_parse_services,
    benchmark_print_services,
    benchmark_deep_nesting,
    benchmark_comments,
    benchmark_comparison_with_json
);
criterion_main!(benches);
