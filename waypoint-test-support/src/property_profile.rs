//! Environment-driven tuning for property-test suites.
//!
//! Every proptest suite in the workspace reads the same two variables so CI
//! can raise case counts or enable forking in one place.

use std::env;

/// Environment variable overriding the number of cases per property.
pub const PROGTEST_CASES_ENV_KEY: &str = "PROGTEST_CASES";
/// Environment variable enabling forked proptest execution.
pub const WAYPOINT_PBT_FORK_ENV_KEY: &str = "WAYPOINT_PBT_FORK";

/// Resolved case count and fork setting for a property suite.
///
/// # Examples
/// ```
/// use waypoint_test_support::property_profile::ProptestRunProfile;
///
/// let profile = ProptestRunProfile::load(64, false);
/// assert!(profile.cases() > 0);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProptestRunProfile {
    cases: u32,
    fork: bool,
}

impl ProptestRunProfile {
    /// Reads overrides from the process environment.
    ///
    /// Malformed values log a warning and fall back to the defaults.
    #[must_use]
    pub fn load(default_cases: u32, default_fork: bool) -> Self {
        Self::load_with_lookup(default_cases, default_fork, |key| env::var(key).ok())
    }

    fn load_with_lookup<F>(default_cases: u32, default_fork: bool, lookup: F) -> Self
    where
        F: Fn(&'static str) -> Option<String>,
    {
        Self {
            cases: resolve(&lookup, PROGTEST_CASES_ENV_KEY, default_cases, parse_cases),
            fork: resolve(&lookup, WAYPOINT_PBT_FORK_ENV_KEY, default_fork, parse_bool),
        }
    }

    /// Number of cases to run per property.
    #[must_use]
    pub fn cases(&self) -> u32 {
        self.cases
    }

    /// Whether cases run in forked subprocesses.
    #[must_use]
    pub fn fork(&self) -> bool {
        self.fork
    }
}

fn resolve<T, F, P>(lookup: &F, key: &'static str, default: T, parse: P) -> T
where
    F: Fn(&'static str) -> Option<String>,
    P: Fn(&str) -> Result<T, String>,
{
    let Some(raw) = lookup(key) else {
        return default;
    };
    parse(&raw).unwrap_or_else(|reason| {
        tracing::warn!(
            env = key,
            raw = %raw,
            reason = %reason,
            "invalid property-test profile override; using default",
        );
        default
    })
}

fn parse_cases(raw: &str) -> Result<u32, String> {
    match raw.trim().parse::<u32>() {
        Ok(0) => Err("cases must be > 0".to_owned()),
        Ok(cases) => Ok(cases),
        Err(error) => Err(format!("parse error: {error}")),
    }
}

fn parse_bool(raw: &str) -> Result<bool, String> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err("expected one of: true/false/1/0/yes/no/on/off".to_owned()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    fn profile(cases: Option<&str>, fork: Option<&str>) -> ProptestRunProfile {
        ProptestRunProfile::load_with_lookup(64, false, |key| match key {
            PROGTEST_CASES_ENV_KEY => cases.map(str::to_owned),
            WAYPOINT_PBT_FORK_ENV_KEY => fork.map(str::to_owned),
            _ => None,
        })
    }

    #[test]
    fn defaults_apply_without_overrides() {
        assert_eq!(profile(None, None), ProptestRunProfile { cases: 64, fork: false });
    }

    #[rstest]
    #[case("1", 1)]
    #[case(" 250 ", 250)]
    #[case("0", 64)]
    #[case("-1", 64)]
    #[case("many", 64)]
    fn case_overrides_fall_back_when_malformed(#[case] raw: &str, #[case] expected: u32) {
        assert_eq!(profile(Some(raw), None).cases(), expected);
    }

    #[rstest]
    #[case("TRUE", true)]
    #[case("on", true)]
    #[case("1", true)]
    #[case("no", false)]
    #[case("maybe", false)]
    #[case("", false)]
    fn fork_overrides_fall_back_when_malformed(#[case] raw: &str, #[case] expected: bool) {
        assert_eq!(profile(None, Some(raw)).fork(), expected);
    }
}
