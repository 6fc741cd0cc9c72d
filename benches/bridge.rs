//! Per-call overhead of the blocking adapters.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use sync_bridge::Bridge;

fn bench_collect(c: &mut Criterion) {
    let bridge = Bridge::new().expect("bridge runtime");
    let mut group = c.benchmark_group("collect_bounded");

    for limit in [1usize, 10, 100, 1000] {
        group.bench_with_input(BenchmarkId::from_parameter(limit), &limit, |b, &limit| {
            b.iter(|| {
                let stream = futures::stream::iter((0u64..).map(Ok::<_, std::io::Error>));
                black_box(bridge.collect_bounded(stream, limit).unwrap())
            })
        });
    }

    group.finish();
}

fn bench_invoke(c: &mut Criterion) {
    let bridge = Bridge::new().expect("bridge runtime");

    c.bench_function("invoke_blocking/ready", |b| {
        b.iter(|| {
            black_box(
                bridge
                    .invoke_blocking(async { Ok::<_, std::io::Error>(black_box(42u64)) })
                    .unwrap(),
            )
        })
    });

    c.bench_function("invoke_blocking/fresh_bridge", |b| {
        b.iter(|| {
            let value = sync_bridge::invoke_blocking(async { Ok::<_, std::io::Error>(42u64) });
            black_box(value.unwrap())
        })
    });
}

criterion_group!(benches, bench_collect, bench_invoke);
criterion_main!(benches);
