//! Random directed graph generation over a node subset.

use rand::Rng;
use tracing::trace;

use crate::{
    Result,
    catalog::NodeName,
    error::WaypointError,
    graph::{Cost, Edge, Graph, Orientation},
};

/// Lowest edge probability the generator will use.
///
/// Small random graphs below this density are disconnected too often to be
/// useful, so requested probabilities are raised to the floor.
pub const PROBABILITY_FLOOR: f64 = 0.3;

/// Probability that any ordered node pair receives an edge.
///
/// # Examples
/// ```
/// use waypoint_core::{EdgeProbability, PROBABILITY_FLOOR};
///
/// let sparse = EdgeProbability::new(0.1)?;
/// assert_eq!(sparse.requested(), 0.1);
/// assert_eq!(sparse.effective(), PROBABILITY_FLOOR);
/// assert!(EdgeProbability::new(1.5).is_err());
/// # Ok::<(), waypoint_core::WaypointError>(())
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EdgeProbability(f64);

impl EdgeProbability {
    /// Validates a probability.
    ///
    /// # Errors
    /// Returns [`WaypointError::InvalidProbability`] when `probability` is NaN
    /// or outside `[0, 1]`.
    pub fn new(probability: f64) -> Result<Self> {
        if !(0.0..=1.0).contains(&probability) {
            return Err(WaypointError::InvalidProbability { got: probability });
        }
        Ok(Self(probability))
    }

    /// Returns the probability as supplied by the caller.
    #[must_use]
    #[rustfmt::skip]
    pub fn requested(self) -> f64 { self.0 }

    /// Returns the probability after applying [`PROBABILITY_FLOOR`].
    #[must_use]
    pub fn effective(self) -> f64 {
        self.0.max(PROBABILITY_FLOOR)
    }
}

impl Default for EdgeProbability {
    fn default() -> Self {
        Self(0.5)
    }
}

/// Half-open range `[min, max)` that edge costs are drawn from.
///
/// # Examples
/// ```
/// use waypoint_core::CostRange;
///
/// let range = CostRange::new(1, 10)?;
/// assert_eq!((range.min(), range.max()), (1, 10));
/// assert!(CostRange::new(5, 5).is_err());
/// # Ok::<(), waypoint_core::WaypointError>(())
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct CostRange {
    min: Cost,
    max: Cost,
}

impl CostRange {
    /// Validates a cost range.
    ///
    /// # Errors
    /// Returns [`WaypointError::InvalidCostRange`] unless `max > min`.
    pub fn new(min: Cost, max: Cost) -> Result<Self> {
        if max <= min {
            return Err(WaypointError::InvalidCostRange { min, max });
        }
        Ok(Self { min, max })
    }

    /// Returns the inclusive lower bound.
    #[must_use]
    #[rustfmt::skip]
    pub fn min(self) -> Cost { self.min }

    /// Returns the exclusive upper bound.
    #[must_use]
    #[rustfmt::skip]
    pub fn max(self) -> Cost { self.max }

    /// Returns whether `cost` falls inside the range.
    #[must_use]
    pub fn contains(self, cost: Cost) -> bool {
        (self.min..self.max).contains(&cost)
    }

    /// Draws a cost uniformly from the range.
    pub fn sample<R: Rng + ?Sized>(self, rng: &mut R) -> Cost {
        rng.gen_range(self.min..self.max)
    }
}

impl Default for CostRange {
    fn default() -> Self {
        Self { min: 1, max: 10 }
    }
}

/// Generates a directed graph over `nodes`.
///
/// Every ordered pair `(a, b)` with `a != b` independently receives an edge
/// with the [effective](EdgeProbability::effective) probability and a cost
/// drawn from `costs`. Both directions are rolled separately, so the result is
/// generally asymmetric. Pairs are visited in input order, which keeps the
/// output reproducible under a seeded RNG.
///
/// # Examples
/// ```
/// use rand::{SeedableRng, rngs::SmallRng};
/// use waypoint_core::{CostRange, EdgeProbability, NodeName, generate_directed};
///
/// let nodes: Vec<NodeName> = ["A", "B", "C"].into_iter().map(NodeName::from).collect();
/// let mut rng = SmallRng::seed_from_u64(1);
/// let graph = generate_directed(&nodes, EdgeProbability::new(1.0)?, CostRange::new(2, 3)?, &mut rng);
/// assert_eq!(graph.len(), 6);
/// assert!(graph.edges().iter().all(|edge| edge.cost() == 2));
/// # Ok::<(), waypoint_core::WaypointError>(())
/// ```
pub fn generate_directed<R: Rng + ?Sized>(
    nodes: &[NodeName],
    probability: EdgeProbability,
    costs: CostRange,
    rng: &mut R,
) -> Graph {
    let threshold = probability.effective();
    let mut edges = Vec::new();
    for from in nodes {
        for to in nodes {
            if from == to {
                continue;
            }
            if rng.gen_bool(threshold) {
                edges.push(Edge::between_distinct(
                    from.clone(),
                    to.clone(),
                    costs.sample(rng),
                ));
            }
        }
    }
    trace!(
        nodes = nodes.len(),
        edges = edges.len(),
        probability = threshold,
        "generated directed graph"
    );
    Graph::from_edges(Orientation::Directed, edges)
}

/// Produces candidate directed graphs over a node subset.
///
/// The synthesizer calls this once per attempt. [`RandomEdges`] is the
/// standard implementation; tests substitute fixed generators to drive the
/// retry loop deterministically.
pub trait EdgeGenerator {
    /// Builds a graph whose edges connect members of `nodes`.
    fn generate<R: Rng + ?Sized>(&self, nodes: &[NodeName], rng: &mut R) -> Graph;
}

/// Independent per-pair edge sampling via [`generate_directed`].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RandomEdges {
    probability: EdgeProbability,
    costs: CostRange,
}

impl RandomEdges {
    /// Combines an edge probability with a cost range.
    #[must_use]
    pub fn new(probability: EdgeProbability, costs: CostRange) -> Self {
        Self { probability, costs }
    }

    /// Returns the edge probability.
    #[must_use]
    #[rustfmt::skip]
    pub fn probability(&self) -> EdgeProbability { self.probability }

    /// Returns the cost range.
    #[must_use]
    #[rustfmt::skip]
    pub fn costs(&self) -> CostRange { self.costs }
}

impl EdgeGenerator for RandomEdges {
    fn generate<R: Rng + ?Sized>(&self, nodes: &[NodeName], rng: &mut R) -> Graph {
        generate_directed(nodes, self.probability, self.costs, rng)
    }
}
