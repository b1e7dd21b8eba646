use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use othello_engine::test_utils::run_perft;
use std::hint::black_box;

fn criterion_perft(c: &mut Criterion) {
    let mut group = c.benchmark_group("perft");
    group.sample_size(50);

    for depth in 1..7 {
        group.bench_with_input(BenchmarkId::from_parameter(depth), &depth, |b, &depth| {
            b.iter(|| run_perft(black_box(depth)))
        });
    }

    group.finish();
}

criterion_group!(benches, criterion_perft);
criterion_main!(benches);
