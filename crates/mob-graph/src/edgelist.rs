//! Plain-text edge lists: one `u v [weight]` record per line.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use mob_core::errors::{ErrorInfo, MobError};

use crate::graph::Graph;

/// Parses an edge list into a graph with the given layer sizes.
///
/// Blank lines and lines starting with `#` or `%` are ignored. A missing
/// weight defaults to 1.0. Records naming the same pair in either direction
/// are folded into one undirected edge with summed weight.
pub fn parse_edge_list(text: &str, vertices_per_layer: &[usize]) -> Result<Graph, MobError> {
    let mut graph = Graph::new(vertices_per_layer.to_vec())?;
    for (index, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with('%') {
            continue;
        }
        let (u, v, weight) = parse_record(line).map_err(|message| {
            MobError::Graph(
                ErrorInfo::new("parse-edge-list", message)
                    .with_context("line", index + 1)
                    .with_context("record", line),
            )
        })?;
        graph.add_edge(u, v, weight)?;
    }
    Ok(graph)
}

fn parse_record(line: &str) -> Result<(usize, usize, f64), String> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if !(2..=3).contains(&fields.len()) {
        return Err(format!("expected 2 or 3 fields, found {}", fields.len()));
    }
    let u = fields[0]
        .parse::<usize>()
        .map_err(|err| format!("invalid source id: {err}"))?;
    let v = fields[1]
        .parse::<usize>()
        .map_err(|err| format!("invalid target id: {err}"))?;
    let weight = match fields.get(2) {
        Some(raw) => raw
            .parse::<f64>()
            .map_err(|err| format!("invalid weight: {err}"))?,
        None => 1.0,
    };
    Ok((u, v, weight))
}

/// Reads and parses an edge list file.
pub fn load_edge_list(path: &Path, vertices_per_layer: &[usize]) -> Result<Graph, MobError> {
    let text = fs::read_to_string(path).map_err(|err| {
        MobError::Serde(
            ErrorInfo::new("io-read", err.to_string()).with_context("path", path.display()),
        )
    })?;
    parse_edge_list(&text, vertices_per_layer)
}

/// Formats the graph as `u v weight` lines in ascending edge order.
pub fn format_edge_list(graph: &Graph) -> String {
    let mut out = String::new();
    for (u, v, weight) in graph.edges() {
        let _ = writeln!(out, "{u} {v} {weight}");
    }
    out
}

/// Writes the graph's edge list to `path`.
pub fn write_edge_list(path: &Path, graph: &Graph) -> Result<(), MobError> {
    fs::write(path, format_edge_list(graph)).map_err(|err| {
        MobError::Serde(
            ErrorInfo::new("io-write", err.to_string()).with_context("path", path.display()),
        )
    })
}
