//! Visiting orders and their scores.

use std::fmt;

use crate::{catalog::NodeName, graph::Score, transform::AdjacencyMap};

/// An ordered visit of distinct nodes.
///
/// # Examples
/// ```
/// use waypoint_core::{Graph, Orientation, Path, adjacency_map};
///
/// let graph = Graph::try_from_triples(Orientation::Directed, [("A", "B", 4)])?;
/// let adjacency = adjacency_map(&graph);
///
/// let forward = Path::from_iter(["A", "B"]);
/// assert!(forward.is_valid(&adjacency));
/// assert_eq!(forward.score(&adjacency), 4);
///
/// let backward = Path::from_iter(["B", "A"]);
/// assert!(!backward.is_valid(&adjacency));
/// assert_eq!(backward.score(&adjacency), 0);
/// # Ok::<(), waypoint_core::WaypointError>(())
/// ```
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct Path(Vec<NodeName>);

impl Path {
    /// Wraps a node sequence.
    #[must_use]
    pub fn new(nodes: Vec<NodeName>) -> Self {
        Self(nodes)
    }

    /// Returns the visited nodes in order.
    #[must_use]
    #[rustfmt::skip]
    pub fn nodes(&self) -> &[NodeName] { &self.0 }

    /// Returns the number of visited nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns whether the path visits no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over consecutive `(from, to)` hops.
    pub fn hops(&self) -> impl Iterator<Item = (&NodeName, &NodeName)> {
        self.0.windows(2).filter_map(|pair| match pair {
            [from, to] => Some((from, to)),
            _ => None,
        })
    }

    /// Returns whether every hop exists in `adjacency`.
    #[must_use]
    pub fn is_valid(&self, adjacency: &AdjacencyMap) -> bool {
        self.hops()
            .all(|(from, to)| adjacency.contains_hop(from.as_str(), to.as_str()))
    }

    /// Sums the cost of every hop.
    ///
    /// A hop missing from `adjacency` contributes zero rather than
    /// disqualifying the path; pair with [`Self::is_valid`] to reject such
    /// paths. A path with fewer than two nodes scores zero.
    #[must_use]
    pub fn score(&self, adjacency: &AdjacencyMap) -> Score {
        self.hops().fold(0, |total: Score, (from, to)| {
            total.saturating_add(adjacency.cost(from.as_str(), to.as_str()).unwrap_or(0))
        })
    }
}

impl<S: Into<NodeName>> FromIterator<S> for Path {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (position, node) in self.0.iter().enumerate() {
            if position > 0 {
                f.write_str(" -> ")?;
            }
            write!(f, "{node}")?;
        }
        Ok(())
    }
}

/// A valid path paired with its score.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct ScoredPath {
    path: Path,
    score: Score,
}

impl ScoredPath {
    /// Pairs `path` with `score`.
    #[must_use]
    pub fn new(path: Path, score: Score) -> Self {
        Self { path, score }
    }

    /// Returns the path.
    #[must_use]
    #[rustfmt::skip]
    pub fn path(&self) -> &Path { &self.path }

    /// Returns the score.
    #[must_use]
    #[rustfmt::skip]
    pub fn score(&self) -> Score { self.score }

    /// Consumes the pair, returning the path.
    #[must_use]
    pub fn into_path(self) -> Path {
        self.path
    }
}
