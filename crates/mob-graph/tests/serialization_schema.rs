use mob_core::provenance::SchemaVersion;
use mob_graph::{gen_complete_bipartite, graph_from_json, graph_to_json, GRAPH_SCHEMA_VERSION};

#[test]
fn readers_accept_same_major_only() {
    let current = GRAPH_SCHEMA_VERSION;
    assert!(current.reads(&SchemaVersion::new(current.major, current.minor + 1, 0)));
    assert!(!current.reads(&SchemaVersion::new(current.major + 1, 0, 0)));
    assert_eq!(SchemaVersion::new(1, 2, 3).to_string(), "1.2.3");
}

#[test]
fn future_major_version_is_rejected() {
    let graph = gen_complete_bipartite(2, 3).unwrap();
    let json = graph_to_json(&graph).unwrap();
    let bumped = json.replacen(
        &format!("\"major\": {}", GRAPH_SCHEMA_VERSION.major),
        &format!("\"major\": {}", GRAPH_SCHEMA_VERSION.major + 1),
        1,
    );
    assert_ne!(json, bumped);
    let err = graph_from_json(&bumped).unwrap_err();
    assert_eq!(err.code(), "schema-version");
    assert_eq!(err.family(), "Serde");
}

#[test]
fn inconsistent_layer_sizes_are_rejected_on_load() {
    let graph = gen_complete_bipartite(2, 2).unwrap();
    let json = graph_to_json(&graph).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    let mut broken = value.clone();
    broken["vertices_per_layer"] = serde_json::json!([3, 2]);
    let err = graph_from_json(&broken.to_string()).unwrap_err();
    assert_eq!(err.code(), "layer-order");
    assert!(graph_from_json(&value.to_string()).is_ok());
}
