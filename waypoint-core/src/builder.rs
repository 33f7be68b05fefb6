//! Builder utilities for configuring route planning.
//!
//! Collects raw synthesis and search parameters and validates them before
//! constructing [`Planner`] instances.

use std::num::NonZeroUsize;

use crate::{
    Result,
    connectivity::ConnectivityCheck,
    error::WaypointError,
    generator::{CostRange, EdgeProbability, RandomEdges},
    graph::{Cost, Orientation},
    planner::Planner,
    search::SearchStrategy,
    synthesizer::{DEFAULT_NODE_CEILING, Synthesizer},
};

/// Configures and constructs [`Planner`] instances.
///
/// Setters store raw values; validation happens once in [`Self::build`].
///
/// # Examples
/// ```
/// use waypoint_core::{Orientation, PlannerBuilder, SearchStrategy};
///
/// let planner = PlannerBuilder::new()
///     .with_node_count(6)
///     .with_orientation(Orientation::Directed)
///     .with_search_strategy(SearchStrategy::Sequential)
///     .build()
///     .expect("builder configuration is valid");
/// assert_eq!(planner.synthesizer().node_count(), 6);
/// assert_eq!(planner.search_strategy(), SearchStrategy::Sequential);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct PlannerBuilder {
    node_count: usize,
    probability: f64,
    cost_min: Cost,
    cost_max: Cost,
    max_tries: usize,
    orientation: Orientation,
    connectivity: ConnectivityCheck,
    search_strategy: SearchStrategy,
    node_ceiling: usize,
}

impl Default for PlannerBuilder {
    fn default() -> Self {
        let costs = CostRange::default();
        Self {
            node_count: 5,
            probability: EdgeProbability::default().requested(),
            cost_min: costs.min(),
            cost_max: costs.max(),
            max_tries: 100,
            orientation: Orientation::Undirected,
            connectivity: ConnectivityCheck::Tour,
            search_strategy: SearchStrategy::Auto,
            node_ceiling: DEFAULT_NODE_CEILING,
        }
    }
}

impl PlannerBuilder {
    /// Creates a builder populated with default parameters.
    ///
    /// # Examples
    /// ```
    /// use waypoint_core::{Orientation, PlannerBuilder};
    ///
    /// let builder = PlannerBuilder::new();
    /// assert_eq!(builder.node_count(), 5);
    /// assert_eq!(builder.probability(), 0.5);
    /// assert_eq!(builder.cost_range(), (1, 10));
    /// assert_eq!(builder.max_tries(), 100);
    /// assert_eq!(builder.orientation(), Orientation::Undirected);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides how many catalog nodes each graph spans.
    ///
    /// Requests above the catalog size are clamped at synthesis time.
    #[must_use]
    pub fn with_node_count(mut self, count: usize) -> Self {
        self.node_count = count;
        self
    }

    /// Returns the requested node count.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.node_count
    }

    /// Overrides the per-pair edge probability.
    ///
    /// # Examples
    /// ```
    /// use waypoint_core::PlannerBuilder;
    ///
    /// let builder = PlannerBuilder::new().with_probability(0.8);
    /// assert_eq!(builder.probability(), 0.8);
    /// ```
    #[must_use]
    pub fn with_probability(mut self, probability: f64) -> Self {
        self.probability = probability;
        self
    }

    /// Returns the requested edge probability before the floor is applied.
    #[must_use]
    pub fn probability(&self) -> f64 {
        self.probability
    }

    /// Overrides the half-open cost range `[min, max)`.
    #[must_use]
    pub fn with_cost_range(mut self, min: Cost, max: Cost) -> Self {
        self.cost_min = min;
        self.cost_max = max;
        self
    }

    /// Returns the configured cost bounds as `(min, max)`.
    #[must_use]
    pub fn cost_range(&self) -> (Cost, Cost) {
        (self.cost_min, self.cost_max)
    }

    /// Overrides how many synthesis attempts are made before giving up.
    #[must_use]
    pub fn with_max_tries(mut self, tries: usize) -> Self {
        self.max_tries = tries;
        self
    }

    /// Returns the configured retry bound.
    #[must_use]
    pub fn max_tries(&self) -> usize {
        self.max_tries
    }

    /// Chooses whether generated graphs are kept directed or mirrored.
    #[must_use]
    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    /// Returns the configured orientation.
    #[must_use]
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Chooses the connectivity test applied to each synthesis attempt.
    #[must_use]
    pub fn with_connectivity(mut self, connectivity: ConnectivityCheck) -> Self {
        self.connectivity = connectivity;
        self
    }

    /// Returns the configured connectivity test.
    #[must_use]
    pub fn connectivity(&self) -> ConnectivityCheck {
        self.connectivity
    }

    /// Sets the strategy used for the shortest-path search.
    #[must_use]
    pub fn with_search_strategy(mut self, strategy: SearchStrategy) -> Self {
        self.search_strategy = strategy;
        self
    }

    /// Returns the configured search strategy.
    #[must_use]
    pub fn search_strategy(&self) -> SearchStrategy {
        self.search_strategy
    }

    /// Overrides the largest node count the exhaustive search accepts.
    #[must_use]
    pub fn with_node_ceiling(mut self, ceiling: usize) -> Self {
        self.node_ceiling = ceiling;
        self
    }

    /// Returns the configured node ceiling.
    #[must_use]
    pub fn node_ceiling(&self) -> usize {
        self.node_ceiling
    }

    /// Validates the configuration and constructs a [`Planner`] instance.
    ///
    /// # Errors
    /// Returns [`WaypointError::InvalidProbability`],
    /// [`WaypointError::InvalidCostRange`] or
    /// [`WaypointError::InvalidMaxTries`] when the matching setting is out of
    /// range, and [`WaypointError::BackendUnavailable`] when a parallel search
    /// is requested without the `parallel` feature.
    ///
    /// # Examples
    /// ```
    /// use waypoint_core::{PlannerBuilder, WaypointError};
    ///
    /// let err = PlannerBuilder::new().with_max_tries(0).build().unwrap_err();
    /// assert_eq!(err, WaypointError::InvalidMaxTries { got: 0 });
    /// ```
    pub fn build(self) -> Result<Planner> {
        let probability = EdgeProbability::new(self.probability)?;
        let costs = CostRange::new(self.cost_min, self.cost_max)?;
        let max_tries = NonZeroUsize::new(self.max_tries).ok_or(WaypointError::InvalidMaxTries {
            got: self.max_tries,
        })?;
        if cfg!(not(feature = "parallel")) && self.search_strategy == SearchStrategy::Parallel {
            return Err(WaypointError::BackendUnavailable {
                requested: self.search_strategy,
            });
        }

        let synthesizer = Synthesizer::new(
            max_tries,
            self.orientation,
            RandomEdges::new(probability, costs),
            self.node_count,
            self.connectivity,
            self.node_ceiling,
        );
        Ok(Planner::new(synthesizer, self.search_strategy))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    #[rstest]
    fn defaults_build_successfully() {
        let planner = PlannerBuilder::new().build().expect("defaults are valid");
        let synth = planner.synthesizer();
        assert_eq!(synth.node_count(), 5);
        assert_eq!(synth.max_tries().get(), 100);
        assert_eq!(synth.edges().probability().requested(), 0.5);
        assert_eq!(synth.edges().costs(), CostRange::default());
        assert_eq!(synth.orientation(), Orientation::Undirected);
        assert_eq!(synth.connectivity(), ConnectivityCheck::Tour);
        assert_eq!(synth.node_ceiling(), DEFAULT_NODE_CEILING);
        assert_eq!(planner.search_strategy(), SearchStrategy::Auto);
    }

    #[rstest]
    #[case::probability(
        PlannerBuilder::new().with_probability(2.0),
        WaypointError::InvalidProbability { got: 2.0 },
    )]
    #[case::cost_range(
        PlannerBuilder::new().with_cost_range(7, 7),
        WaypointError::InvalidCostRange { min: 7, max: 7 },
    )]
    #[case::max_tries(
        PlannerBuilder::new().with_max_tries(0),
        WaypointError::InvalidMaxTries { got: 0 },
    )]
    fn invalid_settings_are_rejected(#[case] builder: PlannerBuilder, #[case] expected: WaypointError) {
        let err = builder.build().expect_err("configuration must be rejected");
        assert!(err.is_configuration());
        assert_eq!(err, expected);
    }

    #[rstest]
    fn setters_round_trip_through_getters() {
        let builder = PlannerBuilder::new()
            .with_node_count(3)
            .with_probability(0.9)
            .with_cost_range(4, 40)
            .with_max_tries(7)
            .with_orientation(Orientation::Directed)
            .with_connectivity(ConnectivityCheck::Reachability)
            .with_search_strategy(SearchStrategy::Sequential)
            .with_node_ceiling(8);
        assert_eq!(builder.node_count(), 3);
        assert_eq!(builder.probability(), 0.9);
        assert_eq!(builder.cost_range(), (4, 40));
        assert_eq!(builder.max_tries(), 7);
        assert_eq!(builder.orientation(), Orientation::Directed);
        assert_eq!(builder.connectivity(), ConnectivityCheck::Reachability);
        assert_eq!(builder.search_strategy(), SearchStrategy::Sequential);
        assert_eq!(builder.node_ceiling(), 8);
    }

    #[cfg(not(feature = "parallel"))]
    #[rstest]
    fn parallel_search_requires_feature() {
        let err = PlannerBuilder::new()
            .with_search_strategy(SearchStrategy::Parallel)
            .build()
            .expect_err("parallel backend is not compiled in");
        assert_eq!(
            err,
            WaypointError::BackendUnavailable {
                requested: SearchStrategy::Parallel
            }
        );
    }
}
