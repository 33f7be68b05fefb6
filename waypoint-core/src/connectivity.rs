//! Connectivity checks for synthesized graphs.
//!
//! The default check asks whether some ordering of the full node set is a
//! hop-valid path, using the same predicate as the path search. That is a
//! Hamiltonian-path question and costs `O(n!)` in the worst case. The
//! reachability check answers the classic question instead: whether the
//! undirected view of the graph forms a single component.

use std::collections::HashMap;

use tracing::trace;

use crate::{
    catalog::NodeName,
    graph::Graph,
    path::Path,
    permutation::Permutations,
    telemetry,
    transform::{adjacency_map, node_set},
};

/// Selects how the synthesizer decides that a graph is connected.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum ConnectivityCheck {
    /// Exhaustively search for a hop-valid ordering of every node.
    #[default]
    Tour,
    /// Union-find reachability over the undirected view of the graph.
    ///
    /// This is cheaper but weaker: a reachable graph may still lack a full
    /// tour, in which case the path search reports
    /// [`crate::WaypointError::NoValidPath`].
    Reachability,
}

impl ConnectivityCheck {
    /// Applies the selected check to the nodes appearing in `graph`.
    #[must_use]
    pub fn is_connected(self, graph: &Graph) -> bool {
        self.is_connected_over(&[], graph)
    }

    /// Applies the selected check to `nodes` together with every node
    /// appearing in `graph`.
    ///
    /// Nodes without edges make the graph disconnected, which is how the
    /// synthesizer rejects samples that left a node isolated.
    #[must_use]
    pub fn is_connected_over(self, nodes: &[NodeName], graph: &Graph) -> bool {
        match self {
            Self::Tour => has_full_tour_over(nodes, graph),
            Self::Reachability => is_weakly_connected_over(nodes, graph),
        }
    }
}

fn all_nodes(nodes: &[NodeName], graph: &Graph) -> Vec<NodeName> {
    let mut all = node_set(graph);
    all.extend(nodes.iter().cloned());
    all.into_iter().collect()
}

/// Returns whether some ordering of every node in `graph` is a valid path.
///
/// Orderings are streamed lazily and the search stops at the first valid one.
/// Empty and single-node graphs are trivially connected.
///
/// # Examples
/// ```
/// use waypoint_core::{Graph, Orientation, has_full_tour};
///
/// let chain = Graph::try_from_triples(Orientation::Directed, [("A", "B", 1), ("B", "C", 1)])?;
/// assert!(has_full_tour(&chain));
///
/// let star = Graph::try_from_triples(Orientation::Directed, [("A", "B", 1), ("A", "C", 1)])?;
/// assert!(!has_full_tour(&star));
/// # Ok::<(), waypoint_core::WaypointError>(())
/// ```
#[must_use]
pub fn has_full_tour(graph: &Graph) -> bool {
    has_full_tour_over(&[], graph)
}

/// Like [`has_full_tour`], but the tour must also visit every node in `nodes`.
///
/// # Examples
/// ```
/// use waypoint_core::{Graph, NodeName, has_full_tour_over};
///
/// let pair = [NodeName::from("A"), NodeName::from("B")];
/// assert!(!has_full_tour_over(&pair, &Graph::default()));
/// assert!(has_full_tour_over(&pair[..1], &Graph::default()));
/// ```
#[must_use]
pub fn has_full_tour_over(nodes: &[NodeName], graph: &Graph) -> bool {
    let all = all_nodes(nodes, graph);
    if all.len() < 2 {
        return true;
    }
    let adjacency = adjacency_map(graph);
    let mut scanned = 0_usize;
    let found = Permutations::new(all).any(|order| {
        scanned += 1;
        Path::new(order).is_valid(&adjacency)
    });
    telemetry::permutations_scanned(scanned);
    trace!(scanned, found, "tour connectivity check finished");
    found
}

/// Returns whether the undirected view of `graph` is a single component.
///
/// Runs in near-linear time. Edge direction is ignored, so a directed graph
/// can pass this check without admitting a full tour.
///
/// # Examples
/// ```
/// use waypoint_core::{Graph, Orientation, is_weakly_connected};
///
/// let star = Graph::try_from_triples(Orientation::Directed, [("A", "B", 1), ("A", "C", 1)])?;
/// assert!(is_weakly_connected(&star));
///
/// let split = Graph::try_from_triples(Orientation::Directed, [("A", "B", 1), ("C", "D", 1)])?;
/// assert!(!is_weakly_connected(&split));
/// # Ok::<(), waypoint_core::WaypointError>(())
/// ```
#[must_use]
pub fn is_weakly_connected(graph: &Graph) -> bool {
    is_weakly_connected_over(&[], graph)
}

/// Like [`is_weakly_connected`], but every node in `nodes` must also be
/// reachable.
#[must_use]
pub fn is_weakly_connected_over(nodes: &[NodeName], graph: &Graph) -> bool {
    let positions: HashMap<NodeName, usize> = all_nodes(nodes, graph)
        .into_iter()
        .enumerate()
        .map(|(position, name)| (name, position))
        .collect();
    if positions.len() < 2 {
        return true;
    }

    let mut components = DisjointSet::new(positions.len());
    let mut remaining = positions.len() - 1;
    for edge in graph.edges() {
        let (Some(&left), Some(&right)) = (positions.get(edge.from()), positions.get(edge.to()))
        else {
            continue;
        };
        if components.union(left, right) {
            remaining -= 1;
            if remaining == 0 {
                return true;
            }
        }
    }
    false
}

/// Union-find with path compression and union by rank.
#[derive(Clone, Debug)]
struct DisjointSet {
    parent: Vec<usize>,
    rank: Vec<u8>,
}

impl DisjointSet {
    fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            rank: vec![0; n],
        }
    }

    fn find(&mut self, mut node: usize) -> usize {
        let mut root = node;
        while self.parent[root] != root {
            root = self.parent[root];
        }

        while self.parent[node] != node {
            let parent = self.parent[node];
            self.parent[node] = root;
            node = parent;
        }

        root
    }

    /// Merges the components of `left` and `right`, returning `false` if they
    /// were already joined.
    fn union(&mut self, left: usize, right: usize) -> bool {
        let mut left = self.find(left);
        let mut right = self.find(right);
        if left == right {
            return false;
        }
        if self.rank[left] < self.rank[right] {
            std::mem::swap(&mut left, &mut right);
        }
        self.parent[right] = left;
        if self.rank[left] == self.rank[right] {
            self.rank[left] = self.rank[left].saturating_add(1);
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    use crate::graph::{Cost, Orientation};

    fn graph(orientation: Orientation, triples: &[(&str, &str, Cost)]) -> Graph {
        Graph::try_from_triples(orientation, triples.iter().copied())
            .expect("test triples must not contain self-loops")
    }

    #[rstest]
    #[case::empty(&[], true)]
    #[case::single_edge(&[("A", "B", 1)], true)]
    #[case::chain(&[("A", "B", 1), ("B", "C", 1), ("C", "D", 1)], true)]
    #[case::reverse_chain(&[("D", "C", 1), ("C", "B", 1), ("B", "A", 1)], true)]
    #[case::out_star(&[("A", "B", 1), ("A", "C", 1), ("A", "D", 1)], false)]
    #[case::two_components(&[("A", "B", 1), ("C", "D", 1)], false)]
    fn tour_check_on_directed_graphs(
        #[case] triples: &[(&str, &str, Cost)],
        #[case] expected: bool,
    ) {
        let directed = graph(Orientation::Directed, triples);
        assert_eq!(has_full_tour(&directed), expected);
        assert_eq!(ConnectivityCheck::Tour.is_connected(&directed), expected);
    }

    #[rstest]
    #[case::empty(&[], true)]
    #[case::out_star(&[("A", "B", 1), ("A", "C", 1), ("A", "D", 1)], true)]
    #[case::two_components(&[("A", "B", 1), ("C", "D", 1)], false)]
    #[case::path_and_pair(&[("A", "B", 1), ("B", "C", 1), ("D", "E", 1)], false)]
    fn reachability_ignores_direction(
        #[case] triples: &[(&str, &str, Cost)],
        #[case] expected: bool,
    ) {
        let directed = graph(Orientation::Directed, triples);
        assert_eq!(is_weakly_connected(&directed), expected);
        assert_eq!(
            ConnectivityCheck::Reachability.is_connected(&directed),
            expected
        );
    }

    #[test]
    fn undirected_star_has_reachability_but_no_tour() {
        let star = crate::transform::to_undirected(&graph(
            Orientation::Directed,
            &[("A", "B", 1), ("A", "C", 1), ("A", "D", 1)],
        ));
        assert!(is_weakly_connected(&star));
        assert!(!has_full_tour(&star));
    }

    #[rstest]
    #[case(ConnectivityCheck::Tour)]
    #[case(ConnectivityCheck::Reachability)]
    fn isolated_nodes_break_connectivity(#[case] check: ConnectivityCheck) {
        let pair = graph(Orientation::Undirected, &[("A", "B", 1), ("B", "A", 1)]);
        let sampled = [NodeName::from("A"), NodeName::from("B"), NodeName::from("C")];
        assert!(check.is_connected(&pair));
        assert!(check.is_connected_over(&sampled[..2], &pair));
        assert!(!check.is_connected_over(&sampled, &pair));
    }

    #[rstest]
    #[case(ConnectivityCheck::Tour)]
    #[case(ConnectivityCheck::Reachability)]
    fn edgeless_pair_is_disconnected(#[case] check: ConnectivityCheck) {
        let pair = [NodeName::from("A"), NodeName::from("B")];
        assert!(!check.is_connected_over(&pair, &Graph::default()));
        assert!(check.is_connected(&Graph::default()));
    }

    #[test]
    fn disjoint_set_tracks_components() {
        let mut set = DisjointSet::new(4);
        assert!(set.union(0, 1));
        assert!(set.union(2, 3));
        assert!(!set.union(1, 0));
        assert!(set.union(1, 3));
        assert_eq!(set.find(0), set.find(2));
    }
}
