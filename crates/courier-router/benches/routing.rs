//! Routing benchmarks.
//!
//! Run with: `cargo bench -p courier-router`

use courier_router::Router;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

fn build_router(num_routes: usize) -> Router<usize> {
    let mut router = Router::new();
    let third = num_routes / 3;

    for i in 0..third {
        router
            .insert("GET", &format!("/app/resource{i}"), i)
            .expect("literal route");
    }
    for i in 0..third {
        router
            .insert("GET", &format!("/app/resource{i}/{{id}}"), third + i)
            .expect("param route");
    }
    for i in 0..third {
        router
            .insert(
                "GET",
                &format!("/app/org/{{org}}/resource{i}/{{id}}"),
                2 * third + i,
            )
            .expect("nested route");
    }

    router
}

fn bench_literal_match(c: &mut Criterion) {
    let router = build_router(99);
    c.bench_function("literal_match", |b| {
        b.iter(|| black_box(router.match_route("GET", "/app/resource20").is_some()));
    });
}

fn bench_param_match(c: &mut Criterion) {
    let router = build_router(99);
    c.bench_function("param_match", |b| {
        b.iter(|| black_box(router.match_route("GET", "/app/resource20/12345").is_some()));
    });
}

fn bench_miss(c: &mut Criterion) {
    let router = build_router(99);
    c.bench_function("miss", |b| {
        b.iter(|| black_box(router.match_route("GET", "/app/nonexistent/path").is_some()));
    });
}

fn bench_table_size(c: &mut Criterion) {
    let mut group = c.benchmark_group("table_size");
    for size in [9, 99, 999] {
        let router = build_router(size);
        let path = format!("/app/org/acme/resource{}/7", size / 3 - 1);
        group.bench_with_input(BenchmarkId::from_parameter(size), &path, |b, path| {
            b.iter(|| black_box(router.match_route("GET", path).is_some()));
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_literal_match,
    bench_param_match,
    bench_miss,
    bench_table_size
);
criterion_main!(benches);
