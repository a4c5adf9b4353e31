//! Event stream pump
//!
//! Drives a publisher from a line-oriented reader of JSON event documents.
//! Malformed lines are counted and skipped with a warning; only sink
//! failures abort the run.

use std::io::{self, BufRead, Write};

use thiserror::Error;
use tracing::{info, warn};

use crate::publisher::{PublishError, TeamCityPublisher};
use teamscribe_events::parse_event;

/// Pump errors
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Publishing a parsed event failed
    #[error(transparent)]
    Publish(#[from] PublishError),

    /// The event source could not be read
    #[error("failed to read event stream: {0}")]
    Read(#[source] io::Error),
}

/// Statistics from a pumped event stream
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStats {
    /// Non-blank lines consumed
    pub lines_read: usize,
    /// Events successfully parsed and published
    pub events_published: usize,
    /// Lines skipped because they did not parse
    pub parse_errors: usize,
}

impl RunStats {
    /// Merge stats from another stream
    pub fn merge(&mut self, other: &RunStats) {
        self.lines_read += other.lines_read;
        self.events_published += other.events_published;
        self.parse_errors += other.parse_errors;
    }
}

/// Feed every event line from `reader` through `publisher`.
///
/// Blank lines are skipped silently. Lines that fail to parse are logged
/// and counted but never abort the stream: a corrupt record must not take
/// down the rest of the run.
///
/// # Errors
///
/// Returns `PipelineError::Read` when the reader fails and
/// `PipelineError::Publish` when the service message sink fails.
pub fn pump_events<R: BufRead, W: Write>(
    reader: R,
    publisher: &TeamCityPublisher<W>,
) -> Result<RunStats, PipelineError> {
    let mut stats = RunStats::default();

    for line in reader.lines() {
        let line = line.map_err(PipelineError::Read)?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        stats.lines_read += 1;

        match parse_event(line) {
            Ok(event) => {
                publisher.publish(&event)?;
                stats.events_published += 1;
            }
            Err(e) => {
                warn!(error = %e, "skipping malformed event line");
                stats.parse_errors += 1;
            }
        }
    }

    info!(
        lines = stats.lines_read,
        published = stats.events_published,
        parse_errors = stats.parse_errors,
        "event stream drained"
    );
    Ok(stats)
}
