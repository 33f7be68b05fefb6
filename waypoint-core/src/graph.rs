//! Weighted edge lists over catalog nodes.

use crate::{Result, catalog::NodeName, error::WaypointError};

/// Cost of traversing a single edge.
pub type Cost = u64;

/// Total cost of a path.
pub type Score = u64;

/// A weighted edge from one node to a different node.
///
/// # Examples
/// ```
/// use waypoint_core::{Edge, NodeName, WaypointError};
///
/// let edge = Edge::new("A".into(), "B".into(), 4)?;
/// assert_eq!(edge.cost(), 4);
/// assert!(Edge::new("A".into(), "A".into(), 1).is_err());
/// # Ok::<(), WaypointError>(())
/// ```
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Edge {
    from: NodeName,
    to: NodeName,
    cost: Cost,
}

impl Edge {
    /// Creates an edge.
    ///
    /// # Errors
    /// Returns [`WaypointError::SelfLoop`] when `from == to`.
    pub fn new(from: NodeName, to: NodeName, cost: Cost) -> Result<Self> {
        if from == to {
            return Err(WaypointError::SelfLoop { node: from });
        }
        Ok(Self { from, to, cost })
    }

    /// Builds an edge whose endpoints are already known to differ.
    pub(crate) fn between_distinct(from: NodeName, to: NodeName, cost: Cost) -> Self {
        debug_assert_ne!(from, to, "edge endpoints must differ");
        Self { from, to, cost }
    }

    /// Returns the source node.
    #[must_use]
    #[rustfmt::skip]
    pub fn from(&self) -> &NodeName { &self.from }

    /// Returns the target node.
    #[must_use]
    #[rustfmt::skip]
    pub fn to(&self) -> &NodeName { &self.to }

    /// Returns the traversal cost.
    #[must_use]
    #[rustfmt::skip]
    pub fn cost(&self) -> Cost { self.cost }
}

/// Whether a graph's edges are one-way or mirrored in both directions.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Orientation {
    /// Edges are one-way; `(a, b)` says nothing about `(b, a)`.
    Directed,
    /// Every edge is paired with its reverse at equal cost.
    #[default]
    Undirected,
}

/// An ordered sequence of edges.
///
/// Graphs are immutable once built. Derived views such as the node set and
/// adjacency map live in [`crate::transform`] and are recomputed on demand.
///
/// # Examples
/// ```
/// use waypoint_core::{Graph, Orientation};
///
/// let graph = Graph::try_from_triples(
///     Orientation::Undirected,
///     [("A", "B", 5), ("B", "A", 5)],
/// )?;
/// assert_eq!(graph.len(), 2);
/// # Ok::<(), waypoint_core::WaypointError>(())
/// ```
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Graph {
    edges: Vec<Edge>,
    orientation: Orientation,
}

impl Graph {
    /// Wraps an edge list.
    #[must_use]
    pub fn from_edges(orientation: Orientation, edges: Vec<Edge>) -> Self {
        Self { edges, orientation }
    }

    /// Builds a graph from `(from, to, cost)` triples.
    ///
    /// # Errors
    /// Returns [`WaypointError::SelfLoop`] when a triple starts and ends at the
    /// same node.
    pub fn try_from_triples<I, S>(orientation: Orientation, triples: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, S, Cost)>,
        S: Into<NodeName>,
    {
        let edges = triples
            .into_iter()
            .map(|(from, to, cost)| Edge::new(from.into(), to.into(), cost))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::from_edges(orientation, edges))
    }

    /// Returns the edges in insertion order.
    #[must_use]
    #[rustfmt::skip]
    pub fn edges(&self) -> &[Edge] { &self.edges }

    /// Returns the orientation the graph was built with.
    #[must_use]
    #[rustfmt::skip]
    pub fn orientation(&self) -> Orientation { self.orientation }

    /// Returns the number of edges.
    #[must_use]
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// Returns whether the graph has no edges.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}
