use mob_core::rng::RngHandle;
use mob_graph::gen_random_bipartite;
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn queries_bench(c: &mut Criterion) {
    let mut rng = RngHandle::from_seed(7);
    let graph = gen_random_bipartite(1_000, 1_000, 0.01, 1, &mut rng).unwrap();
    let vertices: Vec<_> = (0..graph.vertex_count()).collect();

    c.bench_function("strength_queries", |b| {
        b.iter(|| {
            for v in &vertices {
                black_box(graph.strength(*v));
            }
        });
    });

    c.bench_function("two_hop_queries", |b| {
        b.iter(|| {
            for v in vertices.iter().take(200) {
                black_box(graph.two_hops(*v));
            }
        });
    });
}

criterion_group!(benches, queries_bench);
criterion_main!(benches);
