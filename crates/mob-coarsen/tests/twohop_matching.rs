use mob_coarsen::biclique::BicliqueOpts;
use mob_coarsen::matching::{
    match_layer, LayerParams, LayerTask, MatchingForm, MatchingMethod, ScoreOrder, SeedPriority,
};
use mob_coarsen::similarity::Similarity;
use mob_graph::Graph;

fn build_graph() -> Graph {
    // path 0-4-1-5-2-6-3 with a heavy first hop
    let mut graph = Graph::new(vec![4, 3]).unwrap();
    graph.add_edge(0, 4, 3.0).unwrap();
    graph.add_edge(1, 4, 3.0).unwrap();
    graph.add_edge(1, 5, 1.0).unwrap();
    graph.add_edge(2, 5, 1.0).unwrap();
    graph.add_edge(2, 6, 1.0).unwrap();
    graph.add_edge(3, 6, 1.0).unwrap();
    graph
}

fn params(matching: MatchingMethod, reduction_factor: f64) -> LayerParams {
    LayerParams {
        reduction_factor,
        matching,
        similarity: Similarity::WeightedCommonNeighbors,
        seed_priority: SeedPriority::Degree,
        biclique: BicliqueOpts::default(),
        score_order: ScoreOrder::Descending,
    }
}

fn run_layer(graph: &Graph, layer: usize, params: LayerParams) -> (Vec<usize>, usize) {
    let range = graph.select(layer).unwrap();
    let mut slice: Vec<usize> = range.clone().collect();
    let task = LayerTask {
        layer,
        range,
        params,
        rng_seed: 7,
    };
    let outcome = match_layer(graph, &task, &mut slice).unwrap();
    assert_eq!(outcome.layer, layer);
    (slice, outcome.merges)
}

#[test]
fn greedy_twohops_commits_best_pairs_first() {
    let graph = build_graph();
    let (slice, merges) = run_layer(&graph, 0, params(MatchingMethod::GreedyTwohops, 0.5));
    assert_eq!(slice, vec![1, 0, 3, 2]);
    assert_eq!(merges, 2);
}

#[test]
fn budget_caps_committed_pairs() {
    let graph = build_graph();
    let (slice, merges) = run_layer(&graph, 0, params(MatchingMethod::GreedyTwohops, 0.25));
    assert_eq!(slice, vec![1, 0, 2, 3]);
    assert_eq!(merges, 1);

    let (slice, merges) = run_layer(&graph, 0, params(MatchingMethod::GreedyTwohops, 0.1));
    assert_eq!(slice, vec![0, 1, 2, 3]);
    assert_eq!(merges, 0);
}

#[test]
fn ascending_order_prefers_weakest_pair() {
    let graph = build_graph();
    let mut ascending = params(MatchingMethod::GreedyTwohops, 0.25);
    ascending.score_order = ScoreOrder::Ascending;
    let (slice, merges) = run_layer(&graph, 0, ascending);
    assert_eq!(slice, vec![0, 2, 1, 3]);
    assert_eq!(merges, 1);
}

#[test]
fn seeded_twohops_follow_seed_priority() {
    let graph = build_graph();
    for priority in [SeedPriority::Degree, SeedPriority::Strength] {
        let mut seeded = params(MatchingMethod::GreedySeedTwohops, 0.5);
        seeded.seed_priority = priority;
        let (slice, merges) = run_layer(&graph, 0, seeded);
        assert_eq!(slice, vec![1, 0, 3, 2], "{priority}");
        assert_eq!(merges, 2);
    }
}

#[test]
fn random_seeds_still_produce_symmetric_pairing() {
    let graph = build_graph();
    let mut seeded = params(MatchingMethod::GreedySeedTwohops, 0.5);
    seeded.seed_priority = SeedPriority::Random;
    let (first, merges) = run_layer(&graph, 0, seeded.clone());
    let (second, _) = run_layer(&graph, 0, seeded);
    assert_eq!(first, second);
    assert!(merges >= 1);
    for (v, &partner) in first.iter().enumerate() {
        assert_eq!(first[partner], v);
    }
}

#[test]
fn modularity_strategies_pick_positive_gains() {
    let graph = build_graph();
    for method in [MatchingMethod::GreedyModularity, MatchingMethod::GreedySeedModularity] {
        let (slice, merges) = run_layer(&graph, 0, params(method, 0.5));
        assert_eq!(slice, vec![1, 0, 3, 2], "{method}");
        assert_eq!(merges, 2);
    }
}

#[test]
fn modularity_skips_negative_gain() {
    // 0 and 1 share only a light neighbor and each hold a heavy private edge
    let mut graph = Graph::new(vec![2, 3]).unwrap();
    graph.add_edge(0, 2, 10.0).unwrap();
    graph.add_edge(1, 3, 10.0).unwrap();
    graph.add_edge(0, 4, 0.1).unwrap();
    graph.add_edge(1, 4, 0.1).unwrap();

    for method in [MatchingMethod::GreedyModularity, MatchingMethod::GreedySeedModularity] {
        let (slice, merges) = run_layer(&graph, 0, params(method, 0.5));
        assert_eq!(slice, vec![0, 1], "{method}");
        assert_eq!(merges, 0);
    }
    let (slice, merges) = run_layer(&graph, 0, params(MatchingMethod::GreedyTwohops, 0.5));
    assert_eq!(slice, vec![1, 0]);
    assert_eq!(merges, 1);
}

#[test]
fn right_layer_slice_is_offset_by_range_start() {
    let graph = build_graph();
    let (slice, merges) = run_layer(&graph, 1, params(MatchingMethod::GreedyTwohops, 0.34));
    // layer 1 is {4, 5, 6}; the heaviest pair is (4, 5) via vertex 1
    assert_eq!(slice, vec![5, 4, 6]);
    assert_eq!(merges, 1);
}

#[test]
fn pairing_strategies_report_pairing_form() {
    let graph = build_graph();
    let range = graph.select(0).unwrap();
    let mut slice: Vec<usize> = range.clone().collect();
    let task = LayerTask {
        layer: 0,
        range,
        params: params(MatchingMethod::GreedyTwohops, 0.5),
        rng_seed: 0,
    };
    let outcome = match_layer(&graph, &task, &mut slice).unwrap();
    assert_eq!(outcome.form, MatchingForm::Pairing);
}

#[test]
fn slice_length_must_cover_layer() {
    let graph = build_graph();
    let task = LayerTask {
        layer: 0,
        range: graph.select(0).unwrap(),
        params: params(MatchingMethod::GreedyTwohops, 0.5),
        rng_seed: 0,
    };
    let mut short = vec![0, 1];
    let err = match_layer(&graph, &task, &mut short).unwrap_err();
    assert_eq!(err.code(), "length-mismatch");
}

#[test]
fn method_names_parse() {
    for method in MatchingMethod::ALL {
        assert_eq!(method.name().parse::<MatchingMethod>().unwrap(), method);
    }
    assert_eq!("random".parse::<SeedPriority>().unwrap(), SeedPriority::Random);
    assert_eq!(
        "greedy_louvain".parse::<MatchingMethod>().unwrap_err().code(),
        "unknown-method"
    );
}
