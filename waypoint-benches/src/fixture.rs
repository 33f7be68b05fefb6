//! Seeded graph fixtures for benchmarking.
//!
//! Search cost depends only on node count and density, so fixtures are
//! complete undirected graphs with random costs: every ordering is valid and
//! the search must score all `n!` of them.

use rand::{SeedableRng, rngs::SmallRng};
use waypoint_core::{
    CostRange, EdgeProbability, Graph, NodeName, WaypointError, generate_directed, to_undirected,
};

/// Errors that may occur during fixture generation.
#[derive(Clone, Debug, thiserror::Error, PartialEq)]
pub enum FixtureError {
    /// A search fixture needs at least two nodes.
    #[error("fixture needs at least two nodes (got {got})")]
    TooFewNodes {
        /// Requested node count.
        got: usize,
    },
    /// Generator settings were rejected.
    #[error(transparent)]
    Config(#[from] WaypointError),
}

/// Configuration for a complete fixture graph.
#[derive(Clone, Debug)]
pub struct FixtureConfig {
    /// Number of nodes in the graph.
    pub node_count: usize,
    /// RNG seed for reproducible costs.
    pub seed: u64,
}

/// Returns `count` distinct, lexicographically ordered node names.
#[must_use]
pub fn node_names(count: usize) -> Vec<NodeName> {
    (0..count)
        .map(|index| NodeName::from(format!("node-{index:02}")))
        .collect()
}

/// Generates a complete undirected graph with costs drawn from `[1, 100)`.
///
/// # Errors
///
/// Returns [`FixtureError::TooFewNodes`] if `node_count < 2`.
///
/// # Examples
///
/// ```
/// use waypoint_benches::fixture::{FixtureConfig, complete_graph};
///
/// let graph = complete_graph(&FixtureConfig { node_count: 4, seed: 7 }).expect("valid config");
/// assert_eq!(graph.len(), 12);
/// ```
pub fn complete_graph(config: &FixtureConfig) -> Result<Graph, FixtureError> {
    if config.node_count < 2 {
        return Err(FixtureError::TooFewNodes {
            got: config.node_count,
        });
    }
    let mut rng = SmallRng::seed_from_u64(config.seed);
    let directed = generate_directed(
        &node_names(config.node_count),
        EdgeProbability::new(1.0)?,
        CostRange::new(1, 100)?,
        &mut rng,
    );
    Ok(to_undirected(&directed))
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;
    use waypoint_core::node_set;

    #[rstest]
    #[case(0)]
    #[case(1)]
    fn rejects_degenerate_sizes(#[case] node_count: usize) {
        let err = complete_graph(&FixtureConfig {
            node_count,
            seed: 1,
        })
        .expect_err("fewer than two nodes must be rejected");
        assert_eq!(err, FixtureError::TooFewNodes { got: node_count });
    }

    #[rstest]
    #[case(2)]
    #[case(6)]
    fn fixtures_are_complete_and_reproducible(#[case] node_count: usize) {
        let config = FixtureConfig {
            node_count,
            seed: 42,
        };
        let graph = complete_graph(&config).expect("valid config");
        assert_eq!(graph.len(), node_count * (node_count - 1));
        assert_eq!(node_set(&graph).len(), node_count);
        assert_eq!(complete_graph(&config), Ok(graph));
    }
}
