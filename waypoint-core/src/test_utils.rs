//! Shared test utilities for `waypoint-core`.

use proptest::test_runner::Config as ProptestConfig;
use waypoint_test_support::property_profile::ProptestRunProfile;

/// Builds a proptest configuration from the shared CI profile so every suite
/// interprets `PROGTEST_CASES` and `WAYPOINT_PBT_FORK` the same way.
#[must_use]
pub(crate) fn suite_proptest_config(default_cases: u32) -> ProptestConfig {
    let profile = ProptestRunProfile::load(default_cases, false);
    ProptestConfig {
        cases: profile.cases(),
        fork: profile.fork(),
        ..ProptestConfig::default()
    }
}
