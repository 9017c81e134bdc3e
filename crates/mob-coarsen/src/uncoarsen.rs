//! Projection of coarse memberships back onto finer levels, and the cluster file format.

use std::fmt::Write as _;

use mob_core::errors::{ErrorInfo, MobError};
use mob_core::VertexId;
use mob_graph::Graph;

fn projection_error(code: &str, message: &str) -> ErrorInfo {
    ErrorInfo::new(code, message)
}

/// Labels `0..total` from lists of member ids, each list carrying one label.
fn assign<'a>(
    groups: impl Iterator<Item = (&'a [VertexId], usize)>,
    total: usize,
) -> Result<Vec<usize>, MobError> {
    let mut labels: Vec<Option<usize>> = vec![None; total];
    for (members, label) in groups {
        for &member in members {
            let slot = labels.get_mut(member).ok_or_else(|| {
                MobError::Matching(
                    projection_error("invalid-provenance", "member id outside the finer level")
                        .with_context("member", member)
                        .with_context("vertices", total),
                )
            })?;
            if slot.replace(label).is_some() {
                return Err(MobError::Matching(
                    projection_error("invalid-provenance", "member id listed twice")
                        .with_context("member", member),
                ));
            }
        }
    }
    labels
        .into_iter()
        .enumerate()
        .map(|(v, label)| {
            label.ok_or_else(|| {
                MobError::Matching(
                    projection_error("invalid-provenance", "finer vertex has no owner")
                        .with_context("vertex", v),
                )
            })
        })
        .collect()
}

fn check_membership(graph: &Graph, membership: &[usize]) -> Result<(), MobError> {
    if membership.len() != graph.vertex_count() {
        return Err(MobError::Matching(
            projection_error("length-mismatch", "membership does not cover every vertex")
                .with_context("membership", membership.len())
                .with_context("vertices", graph.vertex_count()),
        ));
    }
    Ok(())
}

/// Projects a membership of `coarse` one level down through `predecessor`.
pub fn project_to_finer(coarse: &Graph, membership: &[usize]) -> Result<Vec<usize>, MobError> {
    check_membership(coarse, membership)?;
    let total = coarse.vertices().iter().map(|v| v.predecessor.len()).sum();
    assign(
        coarse
            .vertices()
            .iter()
            .zip(membership)
            .map(|(vertex, &label)| (vertex.predecessor.as_slice(), label)),
        total,
    )
}

/// Projects a membership of `coarse` onto the original vertices through `source`.
pub fn project_to_original(coarse: &Graph, membership: &[usize]) -> Result<Vec<usize>, MobError> {
    check_membership(coarse, membership)?;
    let total = coarse.vertices().iter().map(|v| v.source.len()).sum();
    assign(
        coarse
            .vertices()
            .iter()
            .zip(membership)
            .map(|(vertex, &label)| (vertex.source.as_slice(), label)),
        total,
    )
}

/// One line per super-vertex listing the original ids it represents.
pub fn format_clusters(graph: &Graph) -> String {
    let mut out = String::new();
    for vertex in graph.vertices() {
        let ids: Vec<String> = vertex.source.iter().map(ToString::to_string).collect();
        let _ = writeln!(out, "{}", ids.join(" "));
    }
    out
}

/// Parses the cluster format written by [`format_clusters`].
pub fn parse_clusters(text: &str) -> Result<Vec<Vec<VertexId>>, MobError> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(index, line)| {
            line.split_whitespace()
                .map(|field| {
                    field.parse::<VertexId>().map_err(|err| {
                        MobError::Serde(
                            ErrorInfo::new("parse-clusters", err.to_string())
                                .with_context("line", index + 1)
                                .with_context("field", field),
                        )
                    })
                })
                .collect()
        })
        .collect()
}

/// Labels every original vertex with the index of the cluster that contains it.
pub fn membership_from_clusters(clusters: &[Vec<VertexId>]) -> Result<Vec<usize>, MobError> {
    let total = clusters.iter().map(Vec::len).sum();
    assign(
        clusters
            .iter()
            .enumerate()
            .map(|(label, members)| (members.as_slice(), label)),
        total,
    )
}
