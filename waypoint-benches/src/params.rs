//! Benchmark parameter types.
//!
//! Each type renders as a compact Criterion parameter label.

use std::fmt;

use waypoint_core::ConnectivityCheck;

/// Parameters for an exhaustive search benchmark run.
#[derive(Clone, Debug)]
pub struct SearchBenchParams {
    /// Number of nodes in the complete fixture graph.
    pub node_count: usize,
}

impl fmt::Display for SearchBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n={}", self.node_count)
    }
}

/// Parameters for a synthesis benchmark run.
#[derive(Clone, Debug)]
pub struct SynthesisBenchParams {
    /// Number of nodes sampled per attempt.
    pub node_count: usize,
    /// Connectivity test applied to each attempt.
    pub connectivity: ConnectivityCheck,
}

impl fmt::Display for SynthesisBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let check = match self.connectivity {
            ConnectivityCheck::Tour => "tour",
            ConnectivityCheck::Reachability => "reach",
        };
        write!(f, "n={},{check}", self.node_count)
    }
}
