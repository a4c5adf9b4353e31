//! Test outcome status

use serde::{Deserialize, Serialize};

/// Outcome reported by a `test-case` event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TestStatus {
    /// Test passed
    Passed,
    /// Test failed
    Failed,
    /// Test was skipped
    Skipped,
    /// Test completed without a definite verdict
    Inconclusive,
}

impl TestStatus {
    /// Parse a `result` attribute value, case-insensitively.
    ///
    /// Returns `None` for an empty or unrecognized value; callers treat that
    /// as "no outcome to report", not as an error.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        if value.eq_ignore_ascii_case("passed") {
            Some(Self::Passed)
        } else if value.eq_ignore_ascii_case("failed") {
            Some(Self::Failed)
        } else if value.eq_ignore_ascii_case("skipped") {
            Some(Self::Skipped)
        } else if value.eq_ignore_ascii_case("inconclusive") {
            Some(Self::Inconclusive)
        } else {
            None
        }
    }

    /// Canonical attribute spelling
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Passed => "passed",
            Self::Failed => "failed",
            Self::Skipped => "skipped",
            Self::Inconclusive => "inconclusive",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_canonical() {
        assert_eq!(TestStatus::parse("passed"), Some(TestStatus::Passed));
        assert_eq!(TestStatus::parse("failed"), Some(TestStatus::Failed));
        assert_eq!(TestStatus::parse("skipped"), Some(TestStatus::Skipped));
        assert_eq!(
            TestStatus::parse("inconclusive"),
            Some(TestStatus::Inconclusive)
        );
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(TestStatus::parse("Passed"), Some(TestStatus::Passed));
        assert_eq!(TestStatus::parse("FAILED"), Some(TestStatus::Failed));
    }

    #[test]
    fn test_parse_rejects_unknown() {
        assert_eq!(TestStatus::parse(""), None);
        assert_eq!(TestStatus::parse("errored"), None);
        assert_eq!(TestStatus::parse("pass"), None);
    }

    #[test]
    fn test_round_trip() {
        for status in [
            TestStatus::Passed,
            TestStatus::Failed,
            TestStatus::Skipped,
            TestStatus::Inconclusive,
        ] {
            assert_eq!(TestStatus::parse(status.as_str()), Some(status));
        }
    }
}
