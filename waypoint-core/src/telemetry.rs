//! Optional counters emitted through the `metrics` facade.
//!
//! Without the `metrics` feature every function compiles to a no-op.

#[cfg(feature = "metrics")]
pub(crate) fn synthesis_attempt() {
    metrics::counter!("waypoint_synthesis_attempts").increment(1);
}

#[cfg(not(feature = "metrics"))]
pub(crate) const fn synthesis_attempt() {}

#[cfg(feature = "metrics")]
pub(crate) fn synthesis_exhausted() {
    metrics::counter!("waypoint_synthesis_exhausted").increment(1);
}

#[cfg(not(feature = "metrics"))]
pub(crate) const fn synthesis_exhausted() {}

#[cfg(feature = "metrics")]
pub(crate) fn permutations_scanned(count: usize) {
    metrics::counter!("waypoint_permutations_scanned")
        .increment(u64::try_from(count).unwrap_or(u64::MAX));
}

#[cfg(not(feature = "metrics"))]
pub(crate) const fn permutations_scanned(_count: usize) {}
