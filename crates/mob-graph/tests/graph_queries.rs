use mob_core::errors::MobError;
use mob_graph::{Graph, Vertex};

fn build_graph() -> Graph {
    // left {0,1,2,3}, right {4,5,6}
    let mut graph = Graph::new(vec![4, 3]).unwrap();
    graph.add_edge(0, 4, 1.0).unwrap();
    graph.add_edge(0, 5, 2.0).unwrap();
    graph.add_edge(1, 4, 1.0).unwrap();
    graph.add_edge(1, 5, 1.0).unwrap();
    graph.add_edge(2, 6, 3.0).unwrap();
    graph
}

#[test]
fn layers_are_contiguous_ranges() {
    let graph = build_graph();
    assert_eq!(graph.layers(), 2);
    assert_eq!(graph.select(0).unwrap(), 0..4);
    assert_eq!(graph.select(1).unwrap(), 4..7);
    assert_eq!(graph.layer_of(5), Some(1));
    assert_eq!(graph.level(), &[0, 0]);
    let err = graph.select(2).unwrap_err();
    assert_eq!(err.code(), "unknown-layer");
}

#[test]
fn degree_strength_and_weights() {
    let graph = build_graph();
    assert_eq!(graph.degree(0), 2);
    assert_eq!(graph.degree(3), 0);
    assert_eq!(graph.strength(0), 3.0);
    assert_eq!(graph.edge_weight(5, 0), 2.0);
    assert_eq!(graph.edge_weight(0, 6), 0.0);
    assert_eq!(graph.neighbors(4).collect::<Vec<_>>(), vec![0, 1]);
    assert_eq!(graph.common_neighbors(0, 1), vec![4, 5]);
    assert!(graph.common_neighbors(0, 2).is_empty());
    assert_eq!(graph.total_edge_weight(), 8.0);
    assert_eq!(graph.total_vertex_weight(), 7.0);
}

#[test]
fn neighborhood_orders_by_distance_then_id() {
    let graph = build_graph();
    assert_eq!(graph.neighborhood(0, 1), vec![4, 5]);
    assert_eq!(graph.neighborhood(0, 2), vec![4, 5, 1]);
    assert_eq!(graph.two_hops(0), vec![1]);
    assert!(graph.two_hops(3).is_empty());
    assert!(graph.neighborhood(0, 0).is_empty());
}

#[test]
fn duplicate_edges_fold_into_one() {
    let mut graph = Graph::new(vec![1, 1]).unwrap();
    graph.add_edge(0, 1, 1.5).unwrap();
    assert_eq!(graph.degree(0), 1);
    graph.add_edge(1, 0, 2.5).unwrap();
    assert_eq!(graph.edge_count(), 1);
    assert_eq!(graph.edge_weight(0, 1), 4.0);
    assert_eq!(graph.strength(1), 4.0);
}

#[test]
fn invalid_edges_rejected() {
    let mut graph = Graph::new(vec![2, 2]).unwrap();
    match graph.add_edge(0, 9, 1.0).unwrap_err() {
        MobError::Graph(info) => {
            assert_eq!(info.code, "unknown-vertex");
            assert_eq!(info.context.get("vertex"), Some(&"9".to_string()));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(graph.add_edge(1, 1, 1.0).unwrap_err().code(), "self-loop");
    assert_eq!(graph.add_edge(0, 2, f64::NAN).unwrap_err().code(), "invalid-weight");
    assert_eq!(graph.edge_count(), 0);
}

#[test]
fn from_parts_rejects_interleaved_layers() {
    let vertices = vec![
        Vertex::original(0, 0),
        Vertex::original(1, 1),
        Vertex::original(2, 0),
    ];
    let err = Graph::from_parts(vertices, vec![2, 1], vec![0, 0], Vec::new()).unwrap_err();
    assert_eq!(err.code(), "layer-order");
    assert!(Graph::new(Vec::new()).is_err());
}

#[test]
fn increment_level_tracks_layers() {
    let mut graph = build_graph();
    graph.increment_level(1).unwrap();
    assert_eq!(graph.level(), &[0, 1]);
    assert!(graph.increment_level(5).is_err());
}
