//! Derived views over a [`Graph`]: the undirected form, the node set and the
//! ordered-pair adjacency map.
//!
//! Every view is rebuilt from the edge list on each call. Folds run left to
//! right and later edges overwrite earlier ones; costs are never summed or
//! averaged.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::{
    catalog::NodeName,
    graph::{Cost, Edge, Graph, Orientation},
};

/// Mapping from an ordered `(from, to)` pair to its cost.
///
/// # Examples
/// ```
/// use waypoint_core::{Graph, Orientation, adjacency_map};
///
/// let graph = Graph::try_from_triples(
///     Orientation::Directed,
///     [("A", "B", 3), ("A", "B", 8)],
/// )?;
/// let adjacency = adjacency_map(&graph);
/// assert_eq!(adjacency.cost("A", "B"), Some(8));
/// assert_eq!(adjacency.cost("B", "A"), None);
/// # Ok::<(), waypoint_core::WaypointError>(())
/// ```
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct AdjacencyMap {
    costs: HashMap<NodeName, HashMap<NodeName, Cost>>,
    len: usize,
}

impl AdjacencyMap {
    fn insert(&mut self, from: &NodeName, to: &NodeName, cost: Cost) {
        let previous = self
            .costs
            .entry(from.clone())
            .or_default()
            .insert(to.clone(), cost);
        if previous.is_none() {
            self.len += 1;
        }
    }

    /// Returns the cost of the hop from `from` to `to`, if the hop exists.
    #[must_use]
    pub fn cost(&self, from: &str, to: &str) -> Option<Cost> {
        self.costs
            .get(from)
            .and_then(|targets| targets.get(to))
            .copied()
    }

    /// Returns whether the hop from `from` to `to` exists.
    #[must_use]
    pub fn contains_hop(&self, from: &str, to: &str) -> bool {
        self.cost(from, to).is_some()
    }

    /// Returns the number of distinct ordered pairs.
    #[must_use]
    #[rustfmt::skip]
    pub fn len(&self) -> usize { self.len }

    /// Returns whether the map holds no hops.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

/// Folds `graph` into an [`AdjacencyMap`]; the last edge for each ordered pair
/// wins.
#[must_use]
pub fn adjacency_map(graph: &Graph) -> AdjacencyMap {
    graph
        .edges()
        .iter()
        .fold(AdjacencyMap::default(), |mut map, edge| {
            map.insert(edge.from(), edge.to(), edge.cost());
            map
        })
}

/// Returns every node appearing as either endpoint of an edge.
///
/// The set is ordered, so iterating it yields nodes in lexicographic order.
#[must_use]
pub fn node_set(graph: &Graph) -> BTreeSet<NodeName> {
    graph
        .edges()
        .iter()
        .flat_map(|edge| [edge.from().clone(), edge.to().clone()])
        .collect()
}

/// Converts `graph` into its undirected form.
///
/// Edges are keyed by unordered pair and the last occurrence of a pair in
/// either direction sets the cost, which can discard an earlier directed cost.
/// Each surviving pair is emitted as two mirrored edges of equal cost, ordered
/// by pair rather than by input position.
///
/// # Examples
/// ```
/// use waypoint_core::{Graph, Orientation, adjacency_map, to_undirected};
///
/// let directed = Graph::try_from_triples(
///     Orientation::Directed,
///     [("A", "B", 2), ("B", "A", 6)],
/// )?;
/// let undirected = to_undirected(&directed);
/// let adjacency = adjacency_map(&undirected);
/// assert_eq!(undirected.len(), 2);
/// assert_eq!(adjacency.cost("A", "B"), Some(6));
/// assert_eq!(adjacency.cost("B", "A"), Some(6));
/// # Ok::<(), waypoint_core::WaypointError>(())
/// ```
#[must_use]
pub fn to_undirected(graph: &Graph) -> Graph {
    let pairs = graph
        .edges()
        .iter()
        .fold(BTreeMap::new(), |mut pairs, edge| {
            pairs.insert(unordered_key(edge), edge.cost());
            pairs
        });

    let edges = pairs
        .into_iter()
        .flat_map(|((low, high), cost)| {
            [
                Edge::between_distinct(low.clone(), high.clone(), cost),
                Edge::between_distinct(high, low, cost),
            ]
        })
        .collect();
    Graph::from_edges(Orientation::Undirected, edges)
}

fn unordered_key(edge: &Edge) -> (NodeName, NodeName) {
    if edge.from() <= edge.to() {
        (edge.from().clone(), edge.to().clone())
    } else {
        (edge.to().clone(), edge.from().clone())
    }
}
