use criterion::{criterion_group, criterion_main, BatchSize, Criterion};

use courier_router::{normalize, RouteConfig, Router};

fn router_route(c: &mut Criterion) {
    let mut group = c.benchmark_group("router-route");

    group.bench_function("single-route", |b| {
        let mut router: Router<usize> = Router::new();
        router.add(RouteConfig::new("GET", "/hello/{name}"), 1);
        b.iter_with_large_drop(|| router.route("GET", "/hello/world", None))
    });

    group.bench_function("deep-path", |b| {
        let mut router: Router<usize> = Router::new();
        router
            .add(RouteConfig::new("GET", "/api/v1/users/{uid}/posts/{pid}"), 1)
            .add(RouteConfig::new("GET", "/api/v1/users/{uid}/profile"), 2)
            .add(RouteConfig::new("GET", "/api/v1/files/{path*}"), 3);
        b.iter_with_large_drop(|| router.route("GET", "/api/v1/users/42/posts/7", None))
    });
}

fn router_add(c: &mut Criterion) {
    let mut group = c.benchmark_group("router-add");

    group.bench_function("single-route", |b| {
        b.iter_batched_ref(
            Router::new,
            |router: &mut Router<usize>| {
                router.add(RouteConfig::new("GET", "/hello/{name}"), 1);
            },
            BatchSize::SmallInput,
        )
    });
}

fn normalize_path(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalize");

    group.bench_function("clean-path", |b| b.iter(|| normalize("/api/v1/users/42")));

    group.bench_function("encoded-and-dotted", |b| {
        b.iter_with_large_drop(|| normalize("/api/%7Ev1/../users/%41"))
    });
}

criterion_group!(benches, router_route, router_add, normalize_path);
criterion_main!(benches);
