use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use sexpression::{parse, to_string, Node};

fn build_footprint(pads: u32) -> Node {
    let mut root = Node::create_list("footprint").unwrap();
    root.append_token("2d3a4c5e-0000-4000-8000-000000000001").unwrap();
    root.append_string_child("name", "QFN-64", true).unwrap();
    root.append_string_child("description", "Quad flat\nno-lead \"package\"", true)
        .unwrap();
    for i in 0..pads {
        let pad = root.append_list("pad", true).unwrap();
        pad.append_token(&i).unwrap();
        pad.append_token_child("side", "top", false).unwrap();
        pad.append_list("position", false)
            .unwrap()
            .append_token(&(i64::from(i) * 500_000))
            .unwrap()
            .append_token(&-1_200_000i64)
            .unwrap();
        pad.append_token_child("rotation", &90, false).unwrap();
    }
    root.append_line_break().unwrap();
    root
}

fn benchmark_print_small(c: &mut Criterion) {
    let root = build_footprint(4);

    c.bench_function("print_small_document", |b| {
        b.iter(|| to_string(black_box(&root)))
    });
}

fn benchmark_parse_small(c: &mut Criterion) {
    let text = to_string(&build_footprint(4));

    c.bench_function("parse_small_document", |b| {
        b.iter(|| parse(black_box(&text), "bench.lp"))
    });
}

fn benchmark_print_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("print_document");

    for size in [10, 100, 1000].iter() {
        let root = build_footprint(*size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &root, |b, root| {
            b.iter(|| to_string(black_box(root)))
        });
    }
    group.finish();
}

fn benchmark_parse_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_document");

    for size in [10, 100, 1000].iter() {
        let text = to_string(&build_footprint(*size));
        group.bench_with_input(BenchmarkId::from_parameter(size), &text, |b, text| {
            b.iter(|| parse(black_box(text), "bench.lp"))
        });
    }
    group.finish();
}

fn benchmark_path_lookup(c: &mut Criterion) {
    let root = build_footprint(100);

    c.bench_function("value_by_path", |b| {
        b.iter(|| root.value_by_path::<u32>(black_box("pad/rotation"), false))
    });
}

fn benchmark_comparison_with_json(c: &mut Criterion) {
    let root = build_footprint(100);
    let mut group = c.benchmark_group("comparison");

    group.bench_function("sexpr_print", |b| {
        b.iter(|| to_string(black_box(&root)))
    });

    group.bench_function("json_serialize", |b| {
        b.iter(|| serde_json::to_string(black_box(&root)))
    });

    let sexpr_str = to_string(&root);
    let json_str = serde_json::to_string(&root).unwrap();

    group.bench_function("sexpr_parse", |b| {
        b.iter(|| parse(black_box(&sexpr_str), "bench.lp"))
    });

    group.bench_function("json_deserialize", |b| {
        b.iter(|| serde_json::from_str::<Node>(black_box(&json_str)))
    });

    group.finish();
}

fn benchmark_roundtrip(c: &mut Criterion) {
    let root = build_footprint(50);

    c.bench_function("roundtrip_document", |b| {
        b.iter(|| {
            let text = to_string(black_box(&root));
            parse(&text, "bench.lp")
        })
    });
}

criterion_group!(
    benches,
    benchmark_print_small,
    benchmark_parse_small,
    benchmark_print_sizes,
    benchmark_parse_sizes,
    benchmark_path_lookup,
    benchmark_comparison_with_json,
    benchmark_roundtrip
);
criterion_main!(benches);
