//! Service message writer
//!
//! Formats and writes one complete `##teamcity[...]` line per protocol
//! message. Attribute order within each message type is fixed and must not be
//! reordered: the consumer matches fields positionally, not alphabetically.
//!
//! Every message is rendered into a buffer first and written to the sink as a
//! single locked write, so concurrent callers can interleave only at line
//! granularity: a partially written line is never observable.

use std::io::{self, Write};
use std::sync::{Mutex, PoisonError};

use crate::escape::escape;

/// Writer for TeamCity service messages.
///
/// Wraps an order-preserving sink shared by all event-processing threads. All
/// emit methods take `&self`, return the sink's `io::Result`, and hold the
/// sink lock only for the duration of a single line write.
#[derive(Debug)]
pub struct ServiceMessageWriter<W> {
    sink: Mutex<W>,
}

impl<W: Write> ServiceMessageWriter<W> {
    /// Create a writer over the given sink
    #[must_use]
    pub fn new(sink: W) -> Self {
        Self {
            sink: Mutex::new(sink),
        }
    }

    /// Consume the writer and return the underlying sink
    #[must_use]
    pub fn into_sink(self) -> W {
        self.sink
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Write one fully formatted message line and flush.
    ///
    /// Lines are formatted before the lock is taken; a poisoned lock still
    /// guards a valid sink, so poisoning is recovered rather than propagated.
    fn write_line(&self, line: &str) -> io::Result<()> {
        let mut sink = self.sink.lock().unwrap_or_else(PoisonError::into_inner);
        sink.write_all(line.as_bytes())?;
        sink.write_all(b"\n")?;
        sink.flush()
    }

    /// `testSuiteStarted` for a root suite
    pub fn test_suite_started(&self, name: &str, flow_id: &str) -> io::Result<()> {
        self.write_line(&format!(
            "##teamcity[testSuiteStarted name='{}' flowId='{}']",
            escape(name),
            escape(flow_id)
        ))
    }

    /// `testSuiteFinished` for a root suite
    pub fn test_suite_finished(&self, name: &str, flow_id: &str) -> io::Result<()> {
        self.write_line(&format!(
            "##teamcity[testSuiteFinished name='{}' flowId='{}']",
            escape(name),
            escape(flow_id)
        ))
    }

    /// `flowStarted` announcing a new nested flow under `parent_flow_id`
    pub fn flow_started(&self, flow_id: &str, parent_flow_id: &str) -> io::Result<()> {
        self.write_line(&format!(
            "##teamcity[flowStarted flowId='{}' parent='{}']",
            escape(flow_id),
            escape(parent_flow_id)
        ))
    }

    /// `flowFinished` closing a nested flow
    pub fn flow_finished(&self, flow_id: &str) -> io::Result<()> {
        self.write_line(&format!(
            "##teamcity[flowFinished flowId='{}']",
            escape(flow_id)
        ))
    }

    /// `testStarted`. Output capture is always announced as disabled: captured
    /// output is forwarded explicitly via [`test_std_out`](Self::test_std_out).
    pub fn test_started(&self, name: &str, flow_id: &str) -> io::Result<()> {
        self.write_line(&format!(
            "##teamcity[testStarted name='{}' captureStandardOutput='false' flowId='{}']",
            escape(name),
            escape(flow_id)
        ))
    }

    /// `testFinished` with the duration in whole milliseconds
    pub fn test_finished(&self, name: &str, duration_ms: u64, flow_id: &str) -> io::Result<()> {
        self.write_line(&format!(
            "##teamcity[testFinished name='{}' duration='{}' flowId='{}']",
            escape(name),
            duration_ms,
            escape(flow_id)
        ))
    }

    /// `testStdOut` carrying captured standard output
    pub fn test_std_out(&self, name: &str, out: &str, flow_id: &str) -> io::Result<()> {
        self.write_line(&format!(
            "##teamcity[testStdOut name='{}' out='{}' flowId='{}' tc:tags='tc:parseServiceMessagesInside']",
            escape(name),
            escape(out),
            escape(flow_id)
        ))
    }

    /// `testFailed` with failure message and stack trace
    pub fn test_failed(
        &self,
        name: &str,
        message: &str,
        details: &str,
        flow_id: &str,
    ) -> io::Result<()> {
        self.write_line(&format!(
            "##teamcity[testFailed name='{}' message='{}' details='{}' flowId='{}']",
            escape(name),
            escape(message),
            escape(details),
            escape(flow_id)
        ))
    }

    /// `testIgnored` with the skip reason
    pub fn test_ignored(&self, name: &str, message: &str, flow_id: &str) -> io::Result<()> {
        self.write_line(&format!(
            "##teamcity[testIgnored name='{}' message='{}' flowId='{}']",
            escape(name),
            escape(message),
            escape(flow_id)
        ))
    }
}
