//! Exhaustive path enumeration, scoring and shortest-path selection.
//!
//! Every ordering of a graph's node set is generated lazily, filtered to those
//! whose hops all exist in the adjacency map and scored. The node set is
//! sorted, so enumeration follows lexicographic node order and ties resolve to
//! the lexicographically first path.

use tracing::{info, instrument};

use crate::{
    Result,
    catalog::NodeName,
    error::WaypointError,
    graph::Graph,
    path::{Path, ScoredPath},
    permutation::{Permutations, factorial},
    telemetry,
    transform::{AdjacencyMap, adjacency_map, node_set},
};

/// Indicates how [`shortest_path`] evaluates candidate orderings.
///
/// `Auto` resolves deterministically: it selects `Parallel` when the
/// `parallel` feature is compiled in and `Sequential` otherwise. Both
/// strategies return the same path for the same graph.
///
/// # Examples
/// ```
/// use waypoint_core::SearchStrategy;
///
/// assert_eq!(SearchStrategy::default(), SearchStrategy::Auto);
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum SearchStrategy {
    /// Allow the library to pick the strategy.
    #[default]
    Auto,
    /// Scan orderings on the calling thread.
    Sequential,
    /// Scan orderings on the rayon thread pool.
    Parallel,
}

/// Lazy stream of the valid, scored paths through a graph.
///
/// Created by [`valid_paths`]. Every hop-valid ordering of the node set
/// appears exactly once.
#[derive(Clone, Debug)]
pub struct ValidPaths {
    adjacency: AdjacencyMap,
    orderings: Permutations<NodeName>,
}

impl ValidPaths {
    fn new(nodes: Vec<NodeName>, adjacency: AdjacencyMap) -> Self {
        Self {
            adjacency,
            orderings: Permutations::new(nodes),
        }
    }
}

impl Iterator for ValidPaths {
    type Item = ScoredPath;

    fn next(&mut self) -> Option<Self::Item> {
        let adjacency = &self.adjacency;
        self.orderings.by_ref().find_map(|order| {
            let path = Path::new(order);
            path.is_valid(adjacency).then(|| {
                let score = path.score(adjacency);
                ScoredPath::new(path, score)
            })
        })
    }
}

/// Enumerates every hop-valid ordering of `graph`'s node set with its score.
///
/// # Examples
/// ```
/// use waypoint_core::{Graph, Orientation, valid_paths};
///
/// let graph = Graph::try_from_triples(
///     Orientation::Directed,
///     [("A", "B", 2), ("B", "C", 3), ("C", "A", 4)],
/// )?;
/// let scores: Vec<u64> = valid_paths(&graph).map(|scored| scored.score()).collect();
/// assert_eq!(scores, [5, 7, 6]);
/// # Ok::<(), waypoint_core::WaypointError>(())
/// ```
#[must_use]
pub fn valid_paths(graph: &Graph) -> ValidPaths {
    ValidPaths::new(node_set(graph).into_iter().collect(), adjacency_map(graph))
}

/// Returns the minimum-score path among `paths`.
///
/// Ties keep the first path encountered. Paths visiting fewer than two nodes
/// are not solutions and are skipped, so `None` signals that no solution
/// exists.
#[must_use]
pub fn select_shortest<I>(paths: I) -> Option<ScoredPath>
where
    I: IntoIterator<Item = ScoredPath>,
{
    paths
        .into_iter()
        .filter(|candidate| candidate.path().len() >= 2)
        .fold(None, |best: Option<ScoredPath>, candidate| match best {
            Some(current) if current.score() <= candidate.score() => Some(current),
            _ => Some(candidate),
        })
}

/// Finds the minimum-cost path that visits every node of `graph`.
///
/// # Errors
/// Returns [`WaypointError::NoValidPath`] when no hop-valid ordering exists or
/// the graph has fewer than two nodes, and
/// [`WaypointError::BackendUnavailable`] when `strategy` is not compiled in.
///
/// # Examples
/// ```
/// use waypoint_core::{Graph, Orientation, SearchStrategy, shortest_path};
///
/// let graph = Graph::try_from_triples(
///     Orientation::Undirected,
///     [
///         ("A", "B", 5), ("B", "A", 5),
///         ("B", "C", 2), ("C", "B", 2),
///         ("A", "C", 9), ("C", "A", 9),
///     ],
/// )?;
/// let best = shortest_path(&graph, SearchStrategy::Sequential)?;
/// assert_eq!(best.score(), 7);
/// assert_eq!(best.path().to_string(), "A -> B -> C");
/// # Ok::<(), waypoint_core::WaypointError>(())
/// ```
#[instrument(
    name = "core.search",
    err,
    skip(graph),
    fields(edges = graph.len(), strategy = ?strategy),
)]
pub fn shortest_path(graph: &Graph, strategy: SearchStrategy) -> Result<ScoredPath> {
    let nodes: Vec<NodeName> = node_set(graph).into_iter().collect();
    let node_count = nodes.len();
    let adjacency = adjacency_map(graph);
    telemetry::permutations_scanned(factorial(node_count).unwrap_or(usize::MAX));

    let best = match strategy {
        SearchStrategy::Sequential => select_shortest(ValidPaths::new(nodes, adjacency)),
        #[cfg(feature = "parallel")]
        SearchStrategy::Auto | SearchStrategy::Parallel => parallel::shortest(nodes, &adjacency),
        #[cfg(not(feature = "parallel"))]
        SearchStrategy::Auto => select_shortest(ValidPaths::new(nodes, adjacency)),
        #[cfg(not(feature = "parallel"))]
        SearchStrategy::Parallel => {
            return Err(WaypointError::BackendUnavailable {
                requested: SearchStrategy::Parallel,
            });
        }
    };

    let best = best.ok_or(WaypointError::NoValidPath { node_count })?;
    info!(score = best.score(), nodes = node_count, "shortest path selected");
    Ok(best)
}

#[cfg(feature = "parallel")]
#[cfg_attr(docsrs, doc(cfg(feature = "parallel")))]
mod parallel {
    use rayon::prelude::*;

    use crate::{
        catalog::NodeName,
        path::{Path, ScoredPath},
        permutation::Permutations,
        transform::AdjacencyMap,
    };

    /// Scores orderings on the rayon pool.
    ///
    /// Candidates carry their enumeration index and the reduction orders by
    /// `(score, index)`, which reproduces the sequential first-wins tie-break.
    pub(super) fn shortest(nodes: Vec<NodeName>, adjacency: &AdjacencyMap) -> Option<ScoredPath> {
        Permutations::new(nodes)
            .enumerate()
            .par_bridge()
            .filter_map(|(index, order)| {
                let path = Path::new(order);
                (path.len() >= 2 && path.is_valid(adjacency))
                    .then(|| (path.score(adjacency), index, path))
            })
            .min_by(|left, right| left.0.cmp(&right.0).then_with(|| left.1.cmp(&right.1)))
            .map(|(score, _, path)| ScoredPath::new(path, score))
    }
}
