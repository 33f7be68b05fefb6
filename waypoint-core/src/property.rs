//! Property suites covering the transform, connectivity and search layers.

use std::collections::HashMap;

use proptest::prelude::*;
use rand::{SeedableRng, rngs::SmallRng};
use test_strategy::Arbitrary;

use crate::{
    builder::PlannerBuilder,
    catalog::{NodeCatalog, NodeName},
    connectivity::{ConnectivityCheck, has_full_tour, is_weakly_connected},
    error::WaypointError,
    graph::{Cost, Edge, Graph, Orientation},
    permutation::{Permutations, factorial},
    search::{SearchStrategy, select_shortest, shortest_path, valid_paths},
    test_utils::suite_proptest_config,
    transform::{adjacency_map, node_set, to_undirected},
};

const NAMES: [&str; 5] = ["Amsterdam", "Berlin", "Madrid", "Oslo", "Rome"];

/// Raw edge list over a small fixed alphabet; self-loops are dropped when the
/// graph is built.
#[derive(Clone, Debug, Arbitrary)]
struct EdgeList {
    #[strategy(proptest::collection::vec((0usize..5, 0usize..5, 1u64..20), 0..24))]
    triples: Vec<(usize, usize, Cost)>,
}

impl EdgeList {
    fn graph(&self, orientation: Orientation) -> Graph {
        let edges = self
            .triples
            .iter()
            .filter_map(|&(from, to, cost)| {
                Edge::new(NodeName::from(NAMES[from]), NodeName::from(NAMES[to]), cost).ok()
            })
            .collect();
        Graph::from_edges(orientation, edges)
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Arbitrary)]
enum Density {
    #[weight(2)]
    Sparse,
    #[weight(3)]
    Moderate,
    #[weight(1)]
    Complete,
}

impl Density {
    fn probability(self) -> f64 {
        match self {
            Self::Sparse => 0.0,
            Self::Moderate => 0.5,
            Self::Complete => 1.0,
        }
    }
}

#[derive(Clone, Debug, Arbitrary)]
struct SynthesisCase {
    #[strategy(1usize..=6)]
    nodes: usize,
    density: Density,
    directed: bool,
    reachability: bool,
    seed: u64,
}

proptest! {
    #![proptest_config(suite_proptest_config(128))]

    #[test]
    fn undirected_form_is_symmetric_and_deduplicated(edges: EdgeList) {
        let undirected = to_undirected(&edges.graph(Orientation::Directed));
        prop_assert_eq!(undirected.orientation(), Orientation::Undirected);
        prop_assert_eq!(undirected.len() % 2, 0);

        let mut seen: HashMap<(&NodeName, &NodeName), Cost> = HashMap::new();
        for edge in undirected.edges() {
            prop_assert!(seen.insert((edge.from(), edge.to()), edge.cost()).is_none());
        }
        for ((from, to), cost) in &seen {
            prop_assert_eq!(seen.get(&(*to, *from)), Some(cost));
        }
    }

    #[test]
    fn adjacency_keeps_last_edge_per_pair(edges: EdgeList) {
        let graph = edges.graph(Orientation::Directed);
        let adjacency = adjacency_map(&graph);
        let mut last: HashMap<(&str, &str), Cost> = HashMap::new();
        for edge in graph.edges() {
            last.insert((edge.from().as_str(), edge.to().as_str()), edge.cost());
        }
        prop_assert_eq!(adjacency.len(), last.len());
        for ((from, to), cost) in last {
            prop_assert_eq!(adjacency.cost(from, to), Some(cost));
        }
    }

    #[test]
    fn tour_check_agrees_with_path_enumeration(edges: EdgeList, directed: bool) {
        let orientation = if directed { Orientation::Directed } else { Orientation::Undirected };
        let graph = edges.graph(orientation);
        let has_path = valid_paths(&graph).any(|scored| scored.path().len() >= 2);
        if node_set(&graph).len() >= 2 {
            prop_assert_eq!(has_full_tour(&graph), has_path);
        }
        if has_full_tour(&graph) {
            prop_assert!(is_weakly_connected(&graph));
        }
    }

    #[test]
    fn shortest_path_is_first_minimum(edges: EdgeList) {
        let graph = to_undirected(&edges.graph(Orientation::Directed));
        let candidates: Vec<_> = valid_paths(&graph).collect();
        let expected = select_shortest(candidates.iter().cloned());
        match shortest_path(&graph, SearchStrategy::Sequential) {
            Ok(best) => {
                let minimum = candidates.iter().map(|scored| scored.score()).min();
                prop_assert_eq!(Some(best.score()), minimum);
                let first = candidates.iter().find(|scored| scored.score() == best.score());
                prop_assert_eq!(first, Some(&best));
                prop_assert_eq!(expected, Some(best));
            }
            Err(err) => {
                prop_assert_eq!(err, WaypointError::NoValidPath { node_count: node_set(&graph).len() });
                prop_assert!(expected.is_none());
            }
        }
    }

    #[test]
    fn search_strategies_agree(edges: EdgeList) {
        let graph = edges.graph(Orientation::Directed);
        prop_assert_eq!(
            shortest_path(&graph, SearchStrategy::Sequential),
            shortest_path(&graph, SearchStrategy::Auto),
        );
    }

    #[test]
    fn permutation_count_matches_factorial(len in 0usize..7) {
        let count = Permutations::new((0..len).collect::<Vec<_>>()).count();
        prop_assert_eq!(Some(count), factorial(len));
    }

    #[test]
    fn synthesized_graphs_pass_their_connectivity_check(case: SynthesisCase) {
        let connectivity = if case.reachability {
            ConnectivityCheck::Reachability
        } else {
            ConnectivityCheck::Tour
        };
        let orientation = if case.directed { Orientation::Directed } else { Orientation::Undirected };
        let synth = PlannerBuilder::new()
            .with_node_count(case.nodes)
            .with_probability(case.density.probability())
            .with_orientation(orientation)
            .with_connectivity(connectivity)
            .build()
            .expect("configuration is valid")
            .synthesizer()
            .clone();
        let mut rng = SmallRng::seed_from_u64(case.seed);
        match synth.synthesize(&NodeCatalog::default(), &mut rng) {
            Ok(synthesized) => {
                prop_assert_eq!(synthesized.nodes().len(), case.nodes);
                prop_assert!(connectivity.is_connected_over(synthesized.nodes(), synthesized.graph()));
                prop_assert_eq!(synthesized.graph().orientation(), orientation);
                let sampled: Vec<_> = synthesized.nodes().to_vec();
                for name in node_set(synthesized.graph()) {
                    prop_assert!(sampled.contains(&name));
                }
            }
            Err(err) => prop_assert!(err.is_recoverable()),
        }
    }
}
