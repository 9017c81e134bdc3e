//! Maximal biclique search between a left candidate set and a right candidate set.
//!
//! The search is the iterative backtracking scheme over frames `(L, R, P, Q)`
//! driven by an explicit stack. Candidates are always taken from `P` in
//! ascending id order and frames are popped last-in first-out, which fixes
//! the order in which bicliques are discovered.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use mob_core::errors::{ErrorInfo, MobError};
use mob_core::VertexId;
use mob_graph::Graph;
use serde::{Deserialize, Serialize};

/// Policy selecting which maximal bicliques a search reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BicliquePriority {
    /// Return the first maximal biclique discovered.
    FirstMaximal,
    /// Best by `|L| + |R|`.
    MaximumVertex,
    /// Best by `|L| · |R|`.
    MaximumEdge,
    /// Best by edge weight sum divided by the side-size ratio.
    Balanced,
    /// Best by edge weight sum.
    Weighted,
    /// Return the first biclique whose sides match the target size exactly.
    Size,
    /// Report every maximal biclique, scored as `Balanced`.
    All,
}

impl BicliquePriority {
    /// Every priority, in declaration order.
    pub const ALL: [BicliquePriority; 7] = [
        BicliquePriority::FirstMaximal,
        BicliquePriority::MaximumVertex,
        BicliquePriority::MaximumEdge,
        BicliquePriority::Balanced,
        BicliquePriority::Weighted,
        BicliquePriority::Size,
        BicliquePriority::All,
    ];

    /// Configuration name of the priority.
    pub fn name(self) -> &'static str {
        match self {
            BicliquePriority::FirstMaximal => "first_maximal",
            BicliquePriority::MaximumVertex => "maximum_vertex",
            BicliquePriority::MaximumEdge => "maximum_edge",
            BicliquePriority::Balanced => "balanced",
            BicliquePriority::Weighted => "weighted",
            BicliquePriority::Size => "size",
            BicliquePriority::All => "all",
        }
    }

    fn keeps_best(self) -> bool {
        matches!(
            self,
            BicliquePriority::MaximumVertex
                | BicliquePriority::MaximumEdge
                | BicliquePriority::Balanced
                | BicliquePriority::Weighted
        )
    }
}

impl fmt::Display for BicliquePriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BicliquePriority {
    type Err = MobError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BicliquePriority::ALL
            .into_iter()
            .find(|priority| priority.name() == s)
            .ok_or_else(|| {
                MobError::Config(
                    ErrorInfo::new("unknown-method", "unknown biclique priority")
                        .with_context("biclique_priority", s),
                )
            })
    }
}

/// Search options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BicliqueOpts {
    /// Reporting policy.
    pub priority: BicliquePriority,
    /// Minimum `(|L|, |R|)` a candidate must reach to be reported.
    pub min_size: (usize, usize),
    /// Exact `(|L|, |R|)` required by [`BicliquePriority::Size`].
    pub target_size: (usize, usize),
}

impl Default for BicliqueOpts {
    fn default() -> Self {
        Self {
            priority: BicliquePriority::Balanced,
            min_size: (1, 1),
            target_size: (2, 2),
        }
    }
}

/// A complete bipartite subgraph with the score assigned by the search.
#[derive(Debug, Clone, PartialEq)]
pub struct Biclique {
    /// Subset of the left candidates.
    pub left: BTreeSet<VertexId>,
    /// Subset of the right candidates.
    pub right: BTreeSet<VertexId>,
    /// Priority score (see [`score_biclique`]).
    pub score: f64,
}

/// Sum of edge weights between the two sides.
pub fn edge_weight_sum(graph: &Graph, left: &BTreeSet<VertexId>, right: &BTreeSet<VertexId>) -> f64 {
    left.iter()
        .flat_map(|&l| right.iter().map(move |&r| (l, r)))
        .map(|(l, r)| graph.edge_weight(l, r))
        .sum()
}

/// Scores a biclique under `priority`.
///
/// `balanced` divides the edge weight sum by `max(|L|,|R|) / min(|L|,|R|)`
/// in floating point; `first_maximal`, `size` and `all` use the same score.
pub fn score_biclique(
    graph: &Graph,
    left: &BTreeSet<VertexId>,
    right: &BTreeSet<VertexId>,
    priority: BicliquePriority,
) -> f64 {
    let (a, b) = (left.len() as f64, right.len() as f64);
    if a == 0.0 || b == 0.0 {
        return 0.0;
    }
    match priority {
        BicliquePriority::MaximumVertex => a + b,
        BicliquePriority::MaximumEdge => a * b,
        BicliquePriority::Weighted => edge_weight_sum(graph, left, right),
        BicliquePriority::Balanced
        | BicliquePriority::FirstMaximal
        | BicliquePriority::Size
        | BicliquePriority::All => edge_weight_sum(graph, left, right) / (a.max(b) / a.min(b)),
    }
}

struct Frame {
    left: BTreeSet<VertexId>,
    right: BTreeSet<VertexId>,
    candidates: BTreeSet<VertexId>,
    rejected: BTreeSet<VertexId>,
}

/// Searches maximal bicliques with left side drawn from `left` and right side from `right`.
///
/// `all` returns every qualifying maximal biclique in discovery order; every
/// other priority returns at most one.
pub fn find_bicliques(
    graph: &Graph,
    left: &BTreeSet<VertexId>,
    right: &BTreeSet<VertexId>,
    opts: &BicliqueOpts,
) -> Vec<Biclique> {
    let mut found = Vec::new();
    let mut best: Option<Biclique> = None;
    let mut stack = vec![Frame {
        left: left.clone(),
        right: BTreeSet::new(),
        candidates: right.clone(),
        rejected: BTreeSet::new(),
    }];

    while let Some(mut frame) = stack.pop() {
        while let Some(x) = frame.candidates.pop_first() {
            let shrunk: BTreeSet<VertexId> = frame
                .left
                .iter()
                .copied()
                .filter(|&l| graph.is_adjacent(l, x))
                .collect();
            if shrunk.is_empty() {
                frame.rejected.insert(x);
                continue;
            }

            let mut extended = frame.right.clone();
            extended.insert(x);

            let mut rejected = BTreeSet::new();
            let mut maximal = true;
            for &q in &frame.rejected {
                let covered = shrunk.iter().filter(|&&l| graph.is_adjacent(l, q)).count();
                if covered == shrunk.len() {
                    maximal = false;
                    break;
                }
                if covered > 0 {
                    rejected.insert(q);
                }
            }

            if maximal {
                let mut frontier = BTreeSet::new();
                for &v in &frame.candidates {
                    let covered = shrunk.iter().filter(|&&l| graph.is_adjacent(l, v)).count();
                    if covered == shrunk.len() {
                        extended.insert(v);
                    } else if covered > 0 {
                        frontier.insert(v);
                    }
                }

                let eligible =
                    shrunk.len() >= opts.min_size.0 && extended.len() >= opts.min_size.1;
                if eligible {
                    match opts.priority {
                        BicliquePriority::FirstMaximal => {
                            return vec![build(graph, shrunk, extended, opts.priority)];
                        }
                        BicliquePriority::Size => {
                            if (shrunk.len(), extended.len()) == opts.target_size {
                                return vec![build(graph, shrunk, extended, opts.priority)];
                            }
                        }
                        BicliquePriority::All => {
                            found.push(build(graph, shrunk.clone(), extended.clone(), opts.priority));
                        }
                        priority if priority.keeps_best() => {
                            let score = score_biclique(graph, &shrunk, &extended, priority);
                            if best.as_ref().map_or(true, |current| score > current.score) {
                                best = Some(Biclique {
                                    left: shrunk.clone(),
                                    right: extended.clone(),
                                    score,
                                });
                            }
                        }
                        _ => {}
                    }
                }

                if !frontier.is_empty() {
                    stack.push(Frame {
                        left: shrunk,
                        right: extended,
                        candidates: frontier,
                        rejected,
                    });
                }
            }
            frame.rejected.insert(x);
        }
    }

    match opts.priority {
        BicliquePriority::All => found,
        _ => best.into_iter().collect(),
    }
}

fn build(
    graph: &Graph,
    left: BTreeSet<VertexId>,
    right: BTreeSet<VertexId>,
    priority: BicliquePriority,
) -> Biclique {
    let score = score_biclique(graph, &left, &right, priority);
    Biclique { left, right, score }
}
