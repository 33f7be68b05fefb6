//! Shared test utilities used across waypoint crates.

pub mod property_profile;
pub mod tracing;
