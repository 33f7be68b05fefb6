//! End-to-end route planning.
//!
//! Provides the [`Planner`] entry point, which synthesizes a connected graph
//! and then searches it for the cheapest path that visits every node.

use rand::Rng;
use tracing::{info, instrument};

use crate::{
    Result,
    catalog::NodeCatalog,
    graph::Graph,
    path::ScoredPath,
    search::{SearchStrategy, shortest_path},
    synthesizer::Synthesizer,
};

/// Output of a successful [`Planner::plan`] run.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TourPlan {
    graph: Graph,
    best: ScoredPath,
    attempts: usize,
}

impl TourPlan {
    /// Returns the synthesized graph the path was found in.
    #[must_use]
    #[rustfmt::skip]
    pub fn graph(&self) -> &Graph { &self.graph }

    /// Returns the cheapest full path and its score.
    #[must_use]
    #[rustfmt::skip]
    pub fn best(&self) -> &ScoredPath { &self.best }

    /// Returns how many synthesis attempts were needed.
    #[must_use]
    #[rustfmt::skip]
    pub fn attempts(&self) -> usize { self.attempts }
}

/// Entry point for planning a tour over a node catalog.
///
/// # Examples
/// ```
/// use rand::{SeedableRng, rngs::SmallRng};
/// use waypoint_core::{NodeCatalog, PlannerBuilder};
///
/// let planner = PlannerBuilder::new()
///     .with_node_count(4)
///     .build()
///     .expect("builder must succeed");
/// let mut rng = SmallRng::seed_from_u64(42);
/// let plan = planner
///     .plan(&NodeCatalog::default(), &mut rng)
///     .expect("default settings find a tour");
/// assert_eq!(plan.best().path().len(), 4);
/// assert_eq!(plan.best().score(), plan.best().path().score(&waypoint_core::adjacency_map(plan.graph())));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Planner {
    synthesizer: Synthesizer,
    search_strategy: SearchStrategy,
}

impl Planner {
    pub(crate) fn new(synthesizer: Synthesizer, search_strategy: SearchStrategy) -> Self {
        Self {
            synthesizer,
            search_strategy,
        }
    }

    /// Returns the graph synthesizer this planner drives.
    #[must_use]
    pub fn synthesizer(&self) -> &Synthesizer {
        &self.synthesizer
    }

    /// Returns the strategy used for the shortest-path search.
    #[must_use]
    pub fn search_strategy(&self) -> SearchStrategy {
        self.search_strategy
    }

    /// Synthesizes a connected graph over `catalog` and returns its cheapest
    /// full path.
    ///
    /// # Errors
    /// Propagates synthesis failures ([`crate::WaypointError::TooManyNodes`],
    /// [`crate::WaypointError::GenerationExhausted`]) and search failures
    /// ([`crate::WaypointError::NoValidPath`],
    /// [`crate::WaypointError::BackendUnavailable`]).
    #[instrument(
        name = "core.plan",
        err,
        skip(self, catalog, rng),
        fields(catalog = catalog.len(), strategy = ?self.search_strategy),
    )]
    pub fn plan<R: Rng + ?Sized>(&self, catalog: &NodeCatalog, rng: &mut R) -> Result<TourPlan> {
        let synthesized = self.synthesizer.synthesize(catalog, rng)?;
        let attempts = synthesized.attempts();
        let graph = synthesized.into_graph();
        let best = shortest_path(&graph, self.search_strategy)?;
        info!(attempts, score = best.score(), "tour planned");
        Ok(TourPlan {
            graph,
            best,
            attempts,
        })
    }
}
