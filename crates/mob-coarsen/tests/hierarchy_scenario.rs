use mob_coarsen::hierarchy::{coarsen, StopReason};
use mob_coarsen::matching::MatchingMethod;
use mob_coarsen::params::CoarsenConfig;
use mob_coarsen::uncoarsen::project_to_original;
use mob_core::rng::RngHandle;
use mob_graph::{canonical_hash, gen_complete_bipartite, gen_random_bipartite, Graph};

fn config(max_levels: Vec<usize>) -> CoarsenConfig {
    CoarsenConfig {
        max_levels,
        ..CoarsenConfig::default()
    }
}

#[test]
fn complete_bipartite_halves_each_round() {
    let graph = gen_complete_bipartite(10, 10).unwrap();
    let hierarchy = coarsen(&graph, &config(vec![2, 2])).unwrap();

    assert_eq!(hierarchy.graphs.len(), 3);
    let sizes: Vec<Vec<usize>> = hierarchy
        .graphs
        .iter()
        .map(|g| g.vertices_per_layer().to_vec())
        .collect();
    assert_eq!(sizes, vec![vec![10, 10], vec![5, 5], vec![3, 3]]);
    assert_eq!(hierarchy.coarsest().level(), &[2, 2]);
    assert_eq!(hierarchy.report.stop_reason, StopReason::LayersTerminated);
    assert_eq!(hierarchy.report.levels.len(), 2);
    assert_eq!(hierarchy.report.levels[0].merges, vec![5, 5]);
    assert_eq!(hierarchy.report.final_graph_hash, canonical_hash(hierarchy.coarsest()));
    assert_eq!(hierarchy.report.initial_graph_hash, canonical_hash(&graph));

    // weights are conserved at every level
    for level in &hierarchy.graphs {
        assert_eq!(level.total_vertex_weight(), 20.0);
        assert_eq!(level.total_edge_weight(), 100.0);
    }
    // the input graph is left untouched
    assert_eq!(hierarchy.graphs[0].level(), &[0, 0]);
}

#[test]
fn dropping_intermediate_levels_keeps_only_the_coarsest() {
    let graph = gen_complete_bipartite(10, 10).unwrap();
    let mut settings = config(vec![2, 2]);
    settings.keep_all_levels = false;
    let hierarchy = coarsen(&graph, &settings).unwrap();
    assert_eq!(hierarchy.graphs.len(), 1);
    assert_eq!(hierarchy.coarsest().vertices_per_layer(), &[3, 3]);
    assert_eq!(hierarchy.report.levels.len(), 2);
}

#[test]
fn edgeless_graph_stops_without_progress() {
    let graph = Graph::new(vec![3, 3]).unwrap();
    let hierarchy = coarsen(&graph, &CoarsenConfig::default()).unwrap();
    assert_eq!(hierarchy.graphs.len(), 1);
    assert_eq!(hierarchy.report.stop_reason, StopReason::NoProgress);
    assert!(hierarchy.report.levels.is_empty());
}

#[test]
fn vertex_floor_terminates_layers() {
    let graph = gen_complete_bipartite(10, 10).unwrap();
    let mut settings = config(vec![5]);
    settings.global_min_vertices = vec![Some(6)];
    let hierarchy = coarsen(&graph, &settings).unwrap();
    assert_eq!(hierarchy.graphs.len(), 2);
    assert_eq!(hierarchy.coarsest().vertices_per_layer(), &[5, 5]);
    assert_eq!(hierarchy.report.stop_reason, StopReason::LayersTerminated);
}

#[test]
fn layers_advance_independently() {
    let graph = gen_complete_bipartite(10, 10).unwrap();
    let hierarchy = coarsen(&graph, &config(vec![1, 2])).unwrap();
    assert_eq!(hierarchy.coarsest().vertices_per_layer(), &[5, 3]);
    assert_eq!(hierarchy.coarsest().level(), &[1, 2]);
    assert_eq!(hierarchy.report.levels[1].active_layers, vec![1]);
    assert_eq!(hierarchy.report.levels[1].merges, vec![0, 2]);
}

#[test]
fn biclique_grouping_collapses_complete_graph() {
    let graph = gen_complete_bipartite(10, 10).unwrap();
    let settings = CoarsenConfig {
        reduction_factor: vec![1.0],
        max_levels: vec![1],
        matching: vec![MatchingMethod::GreedyBiclique],
        ..CoarsenConfig::default()
    };
    let hierarchy = coarsen(&graph, &settings).unwrap();
    let coarsest = hierarchy.coarsest();
    assert_eq!(coarsest.vertices_per_layer(), &[1, 1]);
    assert_eq!(coarsest.edge_weight(0, 1), 100.0);
    assert_eq!(coarsest.vertex(0).unwrap().weight, 10.0);
    assert_eq!(coarsest.vertex(1).unwrap().source, (10..20).collect::<Vec<_>>());
}

#[test]
fn parallel_and_sequential_runs_agree() {
    let mut rng = RngHandle::from_seed(2024);
    let graph = gen_random_bipartite(30, 24, 0.2, 4, &mut rng).unwrap();
    for method in MatchingMethod::ALL {
        let mut settings = CoarsenConfig {
            matching: vec![method],
            reduction_factor: vec![0.4],
            ..CoarsenConfig::default()
        };
        settings.seed_priority = vec![mob_coarsen::matching::SeedPriority::Random];
        let parallel = coarsen(&graph, &settings).unwrap();
        settings.parallel = false;
        let sequential = coarsen(&graph, &settings).unwrap();

        let parallel_hashes: Vec<String> = parallel.graphs.iter().map(canonical_hash).collect();
        let sequential_hashes: Vec<String> = sequential.graphs.iter().map(canonical_hash).collect();
        assert_eq!(parallel_hashes, sequential_hashes, "{method}");
        assert_eq!(parallel.report.levels, sequential.report.levels, "{method}");
    }
}

#[test]
fn repeated_runs_share_run_hash() {
    let mut rng = RngHandle::from_seed(9);
    let graph = gen_random_bipartite(12, 15, 0.3, 3, &mut rng).unwrap();
    let first = coarsen(&graph, &CoarsenConfig::default()).unwrap();
    let second = coarsen(&graph, &CoarsenConfig::default()).unwrap();
    assert_eq!(first.report.run_hash, second.report.run_hash);
    assert_eq!(first.report.run_hash.len(), 64);

    let mut reseeded = CoarsenConfig::default();
    reseeded.seed += 1;
    let third = coarsen(&graph, &reseeded).unwrap();
    assert_ne!(first.report.provenance.config_hash, third.report.provenance.config_hash);
}

#[test]
fn projection_through_levels_matches_source_lists() {
    let mut rng = RngHandle::from_seed(77);
    let graph = gen_random_bipartite(16, 12, 0.35, 2, &mut rng).unwrap();
    let hierarchy = coarsen(&graph, &CoarsenConfig::default()).unwrap();
    let coarsest = hierarchy.coarsest();
    let membership: Vec<usize> = (0..coarsest.vertex_count()).collect();

    let walked = hierarchy.project(&membership).unwrap();
    let direct = project_to_original(coarsest, &membership).unwrap();
    assert_eq!(walked, direct);
    assert_eq!(walked.len(), graph.vertex_count());
}

#[test]
fn mismatched_arrays_fail_before_any_round() {
    let graph = gen_complete_bipartite(4, 4).unwrap();
    let err = coarsen(&graph, &config(vec![1, 2, 3])).unwrap_err();
    assert_eq!(err.code(), "length-mismatch");
}
