//! Benchmark support crate for waypoint.
//!
//! Provides seeded graph fixtures and parameter types used by the Criterion
//! benchmarks for exhaustive search and graph synthesis.

pub mod error;
pub mod fixture;
pub mod params;
