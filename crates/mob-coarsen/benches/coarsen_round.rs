use criterion::{black_box, criterion_group, criterion_main, Criterion};
use mob_coarsen::hierarchy::{active_layers, coarsen, coarsen_round};
use mob_coarsen::matching::MatchingMethod;
use mob_coarsen::params::CoarsenConfig;
use mob_core::rng::RngHandle;
use mob_graph::gen_random_bipartite;

fn coarsen_round_bench(c: &mut Criterion) {
    let mut rng = RngHandle::from_seed(11);
    let graph = gen_random_bipartite(500, 400, 0.02, 3, &mut rng).unwrap();

    for method in [
        MatchingMethod::GreedyTwohops,
        MatchingMethod::GreedySeedTwohops,
        MatchingMethod::GreedySeedModularity,
    ] {
        let config = CoarsenConfig {
            matching: vec![method],
            parallel: false,
            ..CoarsenConfig::default()
        };
        let resolved = config.resolve(graph.layers()).unwrap();
        let active = active_layers(&graph, &resolved);
        c.bench_function(&format!("round_{method}"), |b| {
            b.iter(|| black_box(coarsen_round(&graph, &resolved, 0, &active, None).unwrap()));
        });
    }

    let config = CoarsenConfig::default();
    c.bench_function("hierarchy_default", |b| {
        b.iter(|| black_box(coarsen(&graph, &config).unwrap()));
    });
}

criterion_group!(benches, coarsen_round_bench);
criterion_main!(benches);
