use criterion::{black_box, criterion_group, criterion_main, Criterion};
use mob_core::rng::RngHandle;
use mob_graph::{format_edge_list, gen_random_bipartite, parse_edge_list};

fn build_graph_bench(c: &mut Criterion) {
    c.bench_function("generate_bipartite_500x500", |b| {
        b.iter(|| {
            let mut rng = RngHandle::from_seed(42);
            black_box(gen_random_bipartite(500, 500, 0.02, 3, &mut rng).unwrap())
        });
    });

    let mut rng = RngHandle::from_seed(42);
    let graph = gen_random_bipartite(500, 500, 0.02, 3, &mut rng).unwrap();
    let text = format_edge_list(&graph);
    let layers = graph.vertices_per_layer().to_vec();
    c.bench_function("parse_edge_list_500x500", |b| {
        b.iter(|| black_box(parse_edge_list(&text, &layers).unwrap()));
    });
}

criterion_group!(benches, build_graph_bench);
criterion_main!(benches);
