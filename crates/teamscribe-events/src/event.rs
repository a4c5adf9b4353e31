//! Test lifecycle event model
//!
//! Events arrive as a flat stream of structured records describing a tree of
//! nested suites and tests. This module provides the record type, the kind
//! discriminator, and the parsing entry point for newline-delimited JSON
//! event documents.
//!
//! Two shape conventions coexist in the wild and both must be understood:
//! the current convention carries an explicit `parentId` attribute (possibly
//! empty, meaning "top-level"), while the legacy convention omits the
//! attribute entirely and leaves rootness to be inferred from nesting. The
//! distinction between an absent and an empty attribute is therefore
//! load-bearing, and is surfaced as the [`Parentage`] variant rather than as
//! an `Option` tested throughout the codebase.
//!
//! # Example
//!
//! ```
//! use teamscribe_events::{EventKind, Parentage, parse_event};
//!
//! let event = parse_event(
//!     r#"{"type":"start-suite","id":"0-1000","fullname":"Tests.dll"}"#,
//! ).unwrap();
//! assert_eq!(event.kind(), EventKind::StartSuite);
//! assert_eq!(event.parentage(), Parentage::Unrooted);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::EventError;
use crate::status::TestStatus;

/// Classified event kind.
///
/// Kinds are named after their wire spellings: `test-suite` and `test-case`
/// are the *finish* records for suites and tests respectively.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    /// A new test run began; all prior state is stale
    StartRun,
    /// A suite began
    StartSuite,
    /// A suite finished
    TestSuite,
    /// A test began
    StartTest,
    /// A test finished, carrying its outcome
    TestCase,
    /// Anything else; ignored by consumers
    Unknown,
}

impl EventKind {
    /// Classify a `type` attribute value, case-insensitively
    #[must_use]
    pub fn parse(value: &str) -> Self {
        if value.eq_ignore_ascii_case("start-run") {
            Self::StartRun
        } else if value.eq_ignore_ascii_case("start-suite") {
            Self::StartSuite
        } else if value.eq_ignore_ascii_case("test-suite") {
            Self::TestSuite
        } else if value.eq_ignore_ascii_case("start-test") {
            Self::StartTest
        } else if value.eq_ignore_ascii_case("test-case") {
            Self::TestCase
        } else {
            Self::Unknown
        }
    }

    /// Wire spelling of this kind
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::StartRun => "start-run",
            Self::StartSuite => "start-suite",
            Self::TestSuite => "test-suite",
            Self::StartTest => "start-test",
            Self::TestCase => "test-case",
            Self::Unknown => "unknown",
        }
    }
}

/// How an event relates to its parent.
///
/// The two variants correspond to the two event-shape conventions; only
/// literal attribute absence selects the legacy one. An empty `parentId`
/// is the current convention's marker for a top-level suite and never
/// reaches the legacy code paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Parentage<'a> {
    /// Current convention: explicit parent reference, empty for top-level
    Rooted(&'a str),
    /// Legacy convention: no parent attribute at all
    Unrooted,
}

/// Failure details attached to a failed `test-case` event
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Failure {
    /// Failure message
    #[serde(default)]
    pub message: String,
    /// Stack trace at the point of failure
    #[serde(rename = "stack-trace", default)]
    pub stack_trace: String,
}

/// Skip reason attached to a skipped `test-case` event
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reason {
    /// Reason message
    #[serde(default)]
    pub message: String,
}

/// One test lifecycle event.
///
/// All fields beyond `type`, `id` and `fullname` are kind-specific and
/// optional; absent substructures are treated as empty by the accessor
/// methods, never as errors.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TestEvent {
    /// Kind discriminator, e.g. `start-suite`
    #[serde(rename = "type", default)]
    pub kind: String,
    /// Event id, unique among currently open suites and tests
    #[serde(default)]
    pub id: String,
    /// Parent suite id. Attribute absence (`None`) selects the legacy
    /// convention; an empty value marks a top-level suite in the current one.
    #[serde(rename = "parentId", default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    /// Fully qualified suite or test name; events without one are discarded
    #[serde(rename = "fullname", default)]
    pub full_name: String,
    /// Outcome of a `test-case` event
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,
    /// Execution time in decimal seconds, culture-invariant
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    /// Captured standard output
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
    /// Failure details, present on failed test cases
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure: Option<Failure>,
    /// Skip reason, present on skipped test cases
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<Reason>,
}

impl TestEvent {
    /// Create an event of the given kind
    #[must_use]
    pub fn new(kind: EventKind, id: impl Into<String>, full_name: impl Into<String>) -> Self {
        Self {
            kind: kind.as_str().to_string(),
            id: id.into(),
            full_name: full_name.into(),
            ..Self::default()
        }
    }

    /// A `start-run` event
    #[must_use]
    pub fn start_run() -> Self {
        Self {
            kind: EventKind::StartRun.as_str().to_string(),
            ..Self::default()
        }
    }

    /// A `start-suite` event with no parent attribute (legacy convention)
    #[must_use]
    pub fn start_suite(id: impl Into<String>, full_name: impl Into<String>) -> Self {
        Self::new(EventKind::StartSuite, id, full_name)
    }

    /// A `test-suite` (suite finished) event with no parent attribute
    #[must_use]
    pub fn test_suite(id: impl Into<String>, full_name: impl Into<String>) -> Self {
        Self::new(EventKind::TestSuite, id, full_name)
    }

    /// A `start-test` event
    #[must_use]
    pub fn start_test(id: impl Into<String>, full_name: impl Into<String>) -> Self {
        Self::new(EventKind::StartTest, id, full_name)
    }

    /// A `test-case` (test finished) event
    #[must_use]
    pub fn test_case(id: impl Into<String>, full_name: impl Into<String>) -> Self {
        Self::new(EventKind::TestCase, id, full_name)
    }

    /// Set the `parentId` attribute (switches the event to the current
    /// convention; pass an empty string for a top-level suite)
    #[must_use]
    pub fn with_parent(mut self, parent_id: impl Into<String>) -> Self {
        self.parent_id = Some(parent_id.into());
        self
    }

    /// Set the outcome attribute
    #[must_use]
    pub fn with_result(mut self, result: impl Into<String>) -> Self {
        self.result = Some(result.into());
        self
    }

    /// Set the duration attribute, in decimal seconds
    #[must_use]
    pub fn with_duration(mut self, duration: impl Into<String>) -> Self {
        self.duration = Some(duration.into());
        self
    }

    /// Attach captured standard output
    #[must_use]
    pub fn with_output(mut self, output: impl Into<String>) -> Self {
        self.output = Some(output.into());
        self
    }

    /// Attach failure details
    #[must_use]
    pub fn with_failure(
        mut self,
        message: impl Into<String>,
        stack_trace: impl Into<String>,
    ) -> Self {
        self.failure = Some(Failure {
            message: message.into(),
            stack_trace: stack_trace.into(),
        });
        self
    }

    /// Attach a skip reason
    #[must_use]
    pub fn with_reason(mut self, message: impl Into<String>) -> Self {
        self.reason = Some(Reason {
            message: message.into(),
        });
        self
    }

    /// Classified event kind
    #[must_use]
    pub fn kind(&self) -> EventKind {
        EventKind::parse(&self.kind)
    }

    /// Parent linkage convention carried by this event
    #[must_use]
    pub fn parentage(&self) -> Parentage<'_> {
        match &self.parent_id {
            Some(parent) => Parentage::Rooted(parent),
            None => Parentage::Unrooted,
        }
    }

    /// Parsed outcome, `None` for absent, empty or unrecognized results
    #[must_use]
    pub fn status(&self) -> Option<TestStatus> {
        TestStatus::parse(self.result.as_deref()?)
    }

    /// Execution time in whole milliseconds, truncating.
    ///
    /// The attribute is a culture-invariant decimal number of seconds.
    /// Absent, unparsable, non-finite or negative durations report as zero.
    #[must_use]
    pub fn duration_millis(&self) -> u64 {
        self.duration
            .as_deref()
            .and_then(|d| d.trim().parse::<f64>().ok())
            .filter(|seconds| seconds.is_finite())
            .map_or(0, |seconds| (seconds * 1000.0) as u64)
    }

    /// Captured standard output, empty if absent
    #[must_use]
    pub fn output_text(&self) -> &str {
        self.output.as_deref().unwrap_or_default()
    }

    /// Failure message, empty if absent
    #[must_use]
    pub fn failure_message(&self) -> &str {
        self.failure.as_ref().map_or("", |f| f.message.as_str())
    }

    /// Failure stack trace, empty if absent
    #[must_use]
    pub fn stack_trace(&self) -> &str {
        self.failure.as_ref().map_or("", |f| f.stack_trace.as_str())
    }

    /// Skip reason message, empty if absent
    #[must_use]
    pub fn reason_message(&self) -> &str {
        self.reason.as_ref().map_or("", |r| r.message.as_str())
    }
}

/// Parse a single JSON event document.
///
/// Unknown `type` values are not an error; they classify as
/// [`EventKind::Unknown`] and are dropped by the publisher.
///
/// # Errors
///
/// Returns `EventError::JsonParse` if the document is not valid JSON or does
/// not match the event shape.
pub fn parse_event(json: &str) -> Result<TestEvent, EventError> {
    serde_json::from_str(json).map_err(EventError::from)
}
