use mob_coarsen::hash::hash_level;
use mob_coarsen::hierarchy::coarsen;
use mob_coarsen::params::CoarsenConfig;
use mob_coarsen::serde_io::{hierarchy_from_json, hierarchy_to_json, level_from_json, level_to_json};
use mob_graph::{gen_complete_bipartite, graph_from_json, graph_to_json};

#[test]
fn hierarchy_report_survives_json() {
    let graph = gen_complete_bipartite(6, 8).unwrap();
    let hierarchy = coarsen(&graph, &CoarsenConfig::default()).unwrap();
    let json = hierarchy_to_json(&hierarchy.report).unwrap();
    let restored = hierarchy_from_json(&json).unwrap();
    assert_eq!(restored, hierarchy.report);
    assert!(json.contains("\"stop_reason\": \"layers_terminated\""));
}

#[test]
fn level_hash_is_stable_across_json() {
    let graph = gen_complete_bipartite(4, 4).unwrap();
    let hierarchy = coarsen(&graph, &CoarsenConfig::default()).unwrap();
    let level = &hierarchy.report.levels[0];
    let restored = level_from_json(&level_to_json(level).unwrap()).unwrap();

    let mut unhashed = restored.clone();
    unhashed.level_hash = String::new();
    assert_eq!(hash_level(&unhashed).unwrap(), level.level_hash);
}

#[test]
fn coarse_graphs_keep_provenance_through_json() {
    let graph = gen_complete_bipartite(4, 6).unwrap();
    let hierarchy = coarsen(&graph, &CoarsenConfig::default()).unwrap();
    let coarsest = hierarchy.coarsest();
    let restored = graph_from_json(&graph_to_json(coarsest).unwrap()).unwrap();
    assert_eq!(restored.vertices(), coarsest.vertices());
    assert_eq!(restored.level(), coarsest.level());
    assert_eq!(
        mob_graph::canonical_hash(&restored),
        hierarchy.report.final_graph_hash
    );
}

#[test]
fn malformed_report_is_a_serde_error() {
    let err = hierarchy_from_json("{\"levels\": 3}").unwrap_err();
    assert_eq!(err.code(), "json-hierarchy-deserialize");
}
