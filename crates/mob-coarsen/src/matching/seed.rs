use std::fmt;
use std::ops::Range;
use std::str::FromStr;

use mob_core::errors::{ErrorInfo, MobError};
use mob_core::rng::RngHandle;
use mob_core::VertexId;
use mob_graph::Graph;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

/// Order in which seeded strategies visit vertices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeedPriority {
    /// Highest degree first.
    Degree,
    /// Highest strength first.
    Strength,
    /// Uniform shuffle from the worker's random stream.
    Random,
}

impl SeedPriority {
    /// Configuration name of the priority.
    pub fn name(self) -> &'static str {
        match self {
            SeedPriority::Degree => "degree",
            SeedPriority::Strength => "strength",
            SeedPriority::Random => "random",
        }
    }
}

impl fmt::Display for SeedPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SeedPriority {
    type Err = MobError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        [SeedPriority::Degree, SeedPriority::Strength, SeedPriority::Random]
            .into_iter()
            .find(|priority| priority.name() == s)
            .ok_or_else(|| {
                MobError::Config(
                    ErrorInfo::new("unknown-method", "unknown seed priority")
                        .with_context("seed_priority", s),
                )
            })
    }
}

/// Visiting order of the vertices in `range`; ties keep ascending id order.
pub fn seed_order(
    graph: &Graph,
    range: Range<VertexId>,
    priority: SeedPriority,
    rng: &mut RngHandle,
) -> Vec<VertexId> {
    let mut order: Vec<VertexId> = range.collect();
    match priority {
        SeedPriority::Degree => order.sort_by_key(|&v| std::cmp::Reverse(graph.degree(v))),
        SeedPriority::Strength => {
            order.sort_by(|&a, &b| graph.strength(b).total_cmp(&graph.strength(a)))
        }
        SeedPriority::Random => order.shuffle(rng),
    }
    order
}
