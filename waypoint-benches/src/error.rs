//! Benchmark setup error type.
//!
//! Aggregates the failures benchmark setup can hit so setup functions can
//! propagate them with `?` instead of using `.expect()`.

use waypoint_core::WaypointError;

use crate::fixture::FixtureError;

/// Errors that may occur during benchmark setup.
#[derive(Debug, thiserror::Error)]
pub enum BenchSetupError {
    /// Fixture graph generation failed.
    #[error("fixture generation failed: {0}")]
    Fixture(#[from] FixtureError),
    /// Planner configuration or execution failed.
    #[error("waypoint operation failed: {0}")]
    Core(#[from] WaypointError),
}
