//! Retry loop producing a connected random graph.
//!
//! Each attempt samples nodes from the catalog, generates a directed graph,
//! optionally folds it into its undirected form and tests connectivity over
//! the sampled nodes. Attempts are independent and sequential; the first
//! connected graph wins.

use std::num::NonZeroUsize;

use rand::Rng;
use tracing::{debug, info, instrument, warn};

use crate::{
    Result,
    catalog::{NodeCatalog, NodeName},
    connectivity::ConnectivityCheck,
    error::WaypointError,
    generator::{EdgeGenerator, RandomEdges},
    graph::{Graph, Orientation},
    telemetry,
    transform::to_undirected,
};

/// Largest node count the exhaustive search accepts by default.
///
/// Search time grows as `n!`; ten nodes already means 3.6 million orderings.
pub const DEFAULT_NODE_CEILING: usize = 10;

/// Applies the node-count policy: requests above the catalog size are
/// silently reduced to the catalog size.
///
/// # Examples
/// ```
/// use waypoint_core::clamp_node_count;
///
/// assert_eq!(clamp_node_count(4, 10), 4);
/// assert_eq!(clamp_node_count(25, 10), 10);
/// ```
#[must_use]
pub const fn clamp_node_count(requested: usize, catalog_len: usize) -> usize {
    if requested < catalog_len {
        requested
    } else {
        catalog_len
    }
}

/// A connected graph and how it was obtained.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SynthesizedGraph {
    graph: Graph,
    nodes: Vec<NodeName>,
    attempts: usize,
}

impl SynthesizedGraph {
    /// Returns the connected graph.
    #[must_use]
    #[rustfmt::skip]
    pub fn graph(&self) -> &Graph { &self.graph }

    /// Returns the nodes sampled for the successful attempt.
    #[must_use]
    #[rustfmt::skip]
    pub fn nodes(&self) -> &[NodeName] { &self.nodes }

    /// Returns the one-based number of the successful attempt.
    #[must_use]
    #[rustfmt::skip]
    pub fn attempts(&self) -> usize { self.attempts }

    /// Consumes the value, returning the graph.
    #[must_use]
    pub fn into_graph(self) -> Graph {
        self.graph
    }
}

/// Validated synthesis configuration.
///
/// Obtain one from [`crate::PlannerBuilder::build`] via
/// [`crate::Planner::synthesizer`].
#[derive(Clone, Debug, PartialEq)]
pub struct Synthesizer {
    max_tries: NonZeroUsize,
    orientation: Orientation,
    edges: RandomEdges,
    node_count: usize,
    connectivity: ConnectivityCheck,
    node_ceiling: usize,
}

impl Synthesizer {
    pub(crate) fn new(
        max_tries: NonZeroUsize,
        orientation: Orientation,
        edges: RandomEdges,
        node_count: usize,
        connectivity: ConnectivityCheck,
        node_ceiling: usize,
    ) -> Self {
        Self {
            max_tries,
            orientation,
            edges,
            node_count,
            connectivity,
            node_ceiling,
        }
    }

    /// Returns the retry bound.
    #[must_use]
    #[rustfmt::skip]
    pub fn max_tries(&self) -> NonZeroUsize { self.max_tries }

    /// Returns whether generated graphs keep their direction.
    #[must_use]
    #[rustfmt::skip]
    pub fn orientation(&self) -> Orientation { self.orientation }

    /// Returns the edge generator settings.
    #[must_use]
    #[rustfmt::skip]
    pub fn edges(&self) -> RandomEdges { self.edges }

    /// Returns the requested node count before clamping.
    #[must_use]
    #[rustfmt::skip]
    pub fn node_count(&self) -> usize { self.node_count }

    /// Returns the connectivity check applied to each attempt.
    #[must_use]
    #[rustfmt::skip]
    pub fn connectivity(&self) -> ConnectivityCheck { self.connectivity }

    /// Returns the largest effective node count accepted.
    #[must_use]
    #[rustfmt::skip]
    pub fn node_ceiling(&self) -> usize { self.node_ceiling }

    /// Produces a connected graph over nodes sampled from `catalog`.
    ///
    /// # Errors
    /// Returns [`WaypointError::TooManyNodes`] when the clamped node count
    /// exceeds the ceiling and [`WaypointError::GenerationExhausted`] when no
    /// attempt produced a connected graph.
    ///
    /// # Examples
    /// ```
    /// use rand::{SeedableRng, rngs::SmallRng};
    /// use waypoint_core::{NodeCatalog, PlannerBuilder};
    ///
    /// let planner = PlannerBuilder::new()
    ///     .with_node_count(4)
    ///     .with_probability(1.0)
    ///     .build()?;
    /// let mut rng = SmallRng::seed_from_u64(5);
    /// let synthesized = planner.synthesizer().synthesize(&NodeCatalog::default(), &mut rng)?;
    /// assert_eq!(synthesized.attempts(), 1);
    /// assert_eq!(synthesized.graph().len(), 12);
    /// # Ok::<(), waypoint_core::WaypointError>(())
    /// ```
    pub fn synthesize<R: Rng + ?Sized>(
        &self,
        catalog: &NodeCatalog,
        rng: &mut R,
    ) -> Result<SynthesizedGraph> {
        self.synthesize_with(catalog, &self.edges, rng)
    }

    /// Runs the retry loop with a caller-supplied edge generator.
    ///
    /// # Errors
    /// Same as [`Self::synthesize`].
    #[instrument(
        name = "core.synthesize",
        err,
        skip(self, catalog, generator, rng),
        fields(
            catalog = catalog.len(),
            requested_nodes = self.node_count,
            max_tries = self.max_tries.get(),
            orientation = ?self.orientation,
            connectivity = ?self.connectivity,
        ),
    )]
    pub fn synthesize_with<G, R>(
        &self,
        catalog: &NodeCatalog,
        generator: &G,
        rng: &mut R,
    ) -> Result<SynthesizedGraph>
    where
        G: EdgeGenerator,
        R: Rng + ?Sized,
    {
        let node_count = clamp_node_count(self.node_count, catalog.len());
        if node_count < self.node_count {
            debug!(
                requested = self.node_count,
                available = catalog.len(),
                "node count clamped to catalog size"
            );
        }
        if node_count > self.node_ceiling {
            return Err(WaypointError::TooManyNodes {
                requested: node_count,
                ceiling: self.node_ceiling,
            });
        }

        for attempt in 1..=self.max_tries.get() {
            telemetry::synthesis_attempt();
            let nodes = catalog.sample(node_count, rng);
            let directed = generator.generate(&nodes, rng);
            let graph = match self.orientation {
                Orientation::Directed => directed,
                Orientation::Undirected => to_undirected(&directed),
            };
            if self.connectivity.is_connected_over(&nodes, &graph) {
                info!(attempt, edges = graph.len(), "connected graph synthesized");
                return Ok(SynthesizedGraph {
                    graph,
                    nodes,
                    attempts: attempt,
                });
            }
            debug!(attempt, edges = graph.len(), "graph is not connected, retrying");
        }

        telemetry::synthesis_exhausted();
        warn!(
            attempts = self.max_tries.get(),
            node_count, "synthesis exhausted without a connected graph"
        );
        Err(WaypointError::GenerationExhausted {
            attempts: self.max_tries.get(),
            node_count,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::cell::Cell;

    use rand::{SeedableRng, rngs::SmallRng};
    use rstest::{fixture, rstest};

    use crate::{
        builder::PlannerBuilder,
        connectivity::has_full_tour,
        graph::Edge,
    };

    /// Generator that never emits an edge and counts its invocations.
    #[derive(Default)]
    struct Edgeless {
        calls: Cell<usize>,
    }

    impl EdgeGenerator for Edgeless {
        fn generate<R: Rng + ?Sized>(&self, _nodes: &[NodeName], _rng: &mut R) -> Graph {
            self.calls.set(self.calls.get() + 1);
            Graph::default()
        }
    }

    /// Generator that emits a single one-way chain through the nodes.
    struct Chain;

    impl EdgeGenerator for Chain {
        fn generate<R: Rng + ?Sized>(&self, nodes: &[NodeName], _rng: &mut R) -> Graph {
            let edges = nodes
                .windows(2)
                .filter_map(|pair| match pair {
                    [from, to] => Edge::new(from.clone(), to.clone(), 1).ok(),
                    _ => None,
                })
                .collect();
            Graph::from_edges(Orientation::Directed, edges)
        }
    }

    #[fixture]
    fn pair_catalog() -> NodeCatalog {
        NodeCatalog::from_names(["A", "B"]).expect("catalog is valid")
    }

    fn synthesizer(builder: PlannerBuilder) -> Synthesizer {
        builder
            .build()
            .expect("builder configuration is valid")
            .synthesizer()
            .clone()
    }

    #[rstest]
    #[case(ConnectivityCheck::Tour)]
    #[case(ConnectivityCheck::Reachability)]
    fn edgeless_graphs_exhaust_every_attempt(
        pair_catalog: NodeCatalog,
        #[case] connectivity: ConnectivityCheck,
    ) {
        let synth = synthesizer(
            PlannerBuilder::new()
                .with_node_count(2)
                .with_max_tries(4)
                .with_connectivity(connectivity),
        );
        let generator = Edgeless::default();
        let mut rng = SmallRng::seed_from_u64(1);
        let err = synth
            .synthesize_with(&pair_catalog, &generator, &mut rng)
            .expect_err("edgeless graphs are never connected");
        assert_eq!(
            err,
            WaypointError::GenerationExhausted {
                attempts: 4,
                node_count: 2
            }
        );
        assert!(err.is_recoverable());
        assert_eq!(generator.calls.get(), 4);
    }

    #[rstest]
    fn directed_chain_is_accepted_on_first_attempt() {
        let synth = synthesizer(
            PlannerBuilder::new()
                .with_node_count(5)
                .with_orientation(Orientation::Directed),
        );
        let mut rng = SmallRng::seed_from_u64(9);
        let synthesized = synth
            .synthesize_with(&NodeCatalog::default(), &Chain, &mut rng)
            .expect("a chain admits a tour");
        assert_eq!(synthesized.attempts(), 1);
        assert_eq!(synthesized.nodes().len(), 5);
        assert_eq!(synthesized.graph().orientation(), Orientation::Directed);
        assert_eq!(synthesized.graph().len(), 4);
    }

    #[rstest]
    fn undirected_synthesis_mirrors_generated_edges() {
        let synth = synthesizer(PlannerBuilder::new().with_node_count(4));
        let mut rng = SmallRng::seed_from_u64(9);
        let synthesized = synth
            .synthesize_with(&NodeCatalog::default(), &Chain, &mut rng)
            .expect("a chain admits a tour");
        assert_eq!(synthesized.graph().orientation(), Orientation::Undirected);
        assert_eq!(synthesized.graph().len(), 6);
    }

    #[rstest]
    fn node_count_above_catalog_size_is_clamped(pair_catalog: NodeCatalog) {
        let synth = synthesizer(PlannerBuilder::new().with_node_count(8).with_probability(1.0));
        let mut rng = SmallRng::seed_from_u64(4);
        let synthesized = synth
            .synthesize(&pair_catalog, &mut rng)
            .expect("complete graph on two nodes is connected");
        assert_eq!(synthesized.nodes().len(), 2);
        assert!(has_full_tour(synthesized.graph()));
    }

    #[rstest]
    fn rejects_node_counts_above_ceiling() {
        let synth = synthesizer(PlannerBuilder::new().with_node_count(6).with_node_ceiling(5));
        let mut rng = SmallRng::seed_from_u64(4);
        let err = synth
            .synthesize(&NodeCatalog::default(), &mut rng)
            .expect_err("six nodes exceed the ceiling");
        assert_eq!(
            err,
            WaypointError::TooManyNodes {
                requested: 6,
                ceiling: 5
            }
        );
    }

    #[rstest]
    fn ceiling_applies_after_clamping(pair_catalog: NodeCatalog) {
        let synth = synthesizer(
            PlannerBuilder::new()
                .with_node_count(50)
                .with_node_ceiling(2)
                .with_probability(1.0),
        );
        let mut rng = SmallRng::seed_from_u64(4);
        assert!(synth.synthesize(&pair_catalog, &mut rng).is_ok());
    }

    #[rstest]
    #[case(0, 3, 0)]
    #[case(3, 3, 3)]
    #[case(4, 3, 3)]
    #[case(usize::MAX, 15, 15)]
    fn clamp_node_count_caps_at_catalog_size(
        #[case] requested: usize,
        #[case] available: usize,
        #[case] expected: usize,
    ) {
        assert_eq!(clamp_node_count(requested, available), expected);
    }

    #[rstest]
    fn seeded_synthesis_is_reproducible() {
        let synth = synthesizer(PlannerBuilder::new().with_node_count(5));
        let first = synth.synthesize(&NodeCatalog::default(), &mut SmallRng::seed_from_u64(31));
        let second = synth.synthesize(&NodeCatalog::default(), &mut SmallRng::seed_from_u64(31));
        assert_eq!(first, second);
    }
}
