// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Event router and flow resolution
//!
//! [`TeamCityPublisher`] is the entry point of the crate: it classifies each
//! incoming lifecycle event, maintains the open-node registry, resolves the
//! flow identifiers the consumer protocol requires, and dispatches to the
//! service message writer. Events are processed one at a time with no
//! buffering or reordering; output line order equals input event order.
//!
//! Flow resolution happens incrementally, from information accumulated so
//! far only; the stream cannot be walked twice. For events carrying a
//! `parentId` the root ancestor comes from a registry chain walk; for legacy
//! events with no parent attribute it comes from the nesting depth counter
//! and the recorded legacy root id. An event whose id differs from its
//! resolved flow id (and which carries a parent) is *opening* a nested flow,
//! and its lines are bracketed by `flowStarted`/`flowFinished`.
//!
//! # Example
//!
//! ```
//! use teamscribe::publisher::TeamCityPublisher;
//! use teamscribe_events::TestEvent;
//!
//! let publisher = TeamCityPublisher::new(Vec::new());
//! let suite = TestEvent::start_suite("1", "Tests.dll").with_parent("");
//! publisher.publish(&suite).unwrap();
//! let out = String::from_utf8(publisher.into_sink()).unwrap();
//! assert_eq!(out, "##teamcity[testSuiteStarted name='Tests.dll' flowId='1']\n");
//! ```

use std::io::{self, Write};

use thiserror::Error;
use tracing::{debug, trace};

use crate::registry::{LegacyRoot, ParentRegistry};
use teamscribe_events::{EventKind, Parentage, TestEvent, TestStatus};
use teamscribe_protocol::ServiceMessageWriter;

/// Publishing errors
#[derive(Debug, Error)]
pub enum PublishError {
    /// The service message sink failed
    #[error("failed to write service message: {0}")]
    Write(#[from] io::Error),
}

/// Flow identifiers resolved for one event, computed before any state
/// mutation for the event is applied.
#[derive(Debug)]
struct ResolvedFlow {
    /// Grouping flow for this event's subtree; unset when the legacy root
    /// is not currently established
    flow_id: Option<String>,
    /// Flow id written on this event's own test lines
    test_flow_id: String,
    /// When the event opens a new nested flow: the parent flow to announce
    new_flow_parent: Option<String>,
}

/// Translates test lifecycle events into TeamCity service messages.
///
/// All state is owned by the publisher instance: the open-node registry, the
/// legacy nesting counter and the current legacy root id. Everything is
/// created empty at construction and discarded when a `start-run` event
/// marks the beginning of a new run. `publish` takes `&self` and is safe to
/// call concurrently from the worker threads executing tests in parallel.
#[derive(Debug)]
pub struct TeamCityPublisher<W> {
    writer: ServiceMessageWriter<W>,
    registry: ParentRegistry,
    legacy: LegacyRoot,
}

impl<W: Write> TeamCityPublisher<W> {
    /// Create a publisher writing service messages to `sink`
    #[must_use]
    pub fn new(sink: W) -> Self {
        Self {
            writer: ServiceMessageWriter::new(sink),
            registry: ParentRegistry::new(),
            legacy: LegacyRoot::new(),
        }
    }

    /// Read access to the open-node registry
    #[must_use]
    pub fn registry(&self) -> &ParentRegistry {
        &self.registry
    }

    /// Consume the publisher and return the underlying sink
    #[must_use]
    pub fn into_sink(self) -> W {
        self.writer.into_sink()
    }

    /// Process one event, emitting the corresponding service messages.
    ///
    /// Events without a usable `fullname` and events of unknown kind are
    /// discarded without touching any state. Malformed parent references
    /// degrade to the event's own id as its flow id; they never abort the
    /// run.
    ///
    /// # Errors
    ///
    /// Returns `PublishError::Write` when the sink fails. Flow bookkeeping
    /// for the failing event is still completed first, so a transient sink
    /// error cannot leave a flow permanently open.
    pub fn publish(&self, event: &TestEvent) -> Result<(), PublishError> {
        let kind = event.kind();

        // start-run precedes the fullname filter: it carries no name of its
        // own but must still discard every trace of the previous run.
        if kind == EventKind::StartRun {
            self.registry.clear_all();
            self.legacy.reset();
            debug!("run started, prior flow state discarded");
            return Ok(());
        }

        if kind == EventKind::Unknown {
            debug!(kind = %event.kind, "unknown event kind ignored");
            return Ok(());
        }

        if event.full_name.is_empty() {
            debug!(id = %event.id, kind = %event.kind, "event without fullname ignored");
            return Ok(());
        }

        let id = event.id.as_str();
        let flow = self.resolve(id, event.parentage());
        trace!(id, kind = %event.kind, flow = %flow.test_flow_id, "event routed");

        match kind {
            EventKind::StartSuite => {
                self.registry.set(id, parent_value(event));
                self.suite_started(event, &flow)
            }
            EventKind::TestSuite => {
                self.registry.clear(id);
                self.suite_finished(event, &flow)
            }
            EventKind::StartTest => {
                self.registry.set(id, parent_value(event));
                self.test_started(id, &flow, &event.full_name)
            }
            EventKind::TestCase => self.test_case(event, id, &flow),
            EventKind::StartRun | EventKind::Unknown => Ok(()),
        }
    }

    /// Compute `(flow_id, test_flow_id)` for an event, per the resolution
    /// rules in the module docs.
    fn resolve(&self, id: &str, parentage: Parentage<'_>) -> ResolvedFlow {
        let flow_id = match parentage {
            Parentage::Rooted(parent) => Some(
                self.registry
                    .find_root(parent)
                    .unwrap_or_else(|| id.to_string()),
            ),
            Parentage::Unrooted => self.legacy.current_root(),
        };

        let new_flow_parent = match (&flow_id, parentage) {
            (Some(flow), Parentage::Rooted(_)) if flow != id => Some(flow.clone()),
            _ => None,
        };

        let test_flow_id = if new_flow_parent.is_some() {
            id.to_string()
        } else {
            flow_id.clone().unwrap_or_else(|| id.to_string())
        };

        ResolvedFlow {
            flow_id,
            test_flow_id,
            new_flow_parent,
        }
    }

    /// `start-suite`: only root suites produce output.
    ///
    /// Current convention: an empty parent marks the root. Legacy
    /// convention: the root is the suite that takes the nesting depth from
    /// zero to one.
    fn suite_started(&self, event: &TestEvent, flow: &ResolvedFlow) -> Result<(), PublishError> {
        let id = event.id.as_str();
        match event.parentage() {
            Parentage::Rooted(parent) => {
                if parent.is_empty() {
                    let flow_id = flow.flow_id.as_deref().unwrap_or(id);
                    self.writer.test_suite_started(&event.full_name, flow_id)?;
                }
            }
            Parentage::Unrooted => {
                if self.legacy.enter(id) {
                    self.writer.test_suite_started(&event.full_name, id)?;
                }
            }
        }
        Ok(())
    }

    /// `test-suite`: only closing root suites produce output
    fn suite_finished(&self, event: &TestEvent, flow: &ResolvedFlow) -> Result<(), PublishError> {
        let id = event.id.as_str();
        match event.parentage() {
            Parentage::Rooted(parent) => {
                if parent.is_empty() {
                    let flow_id = flow.flow_id.as_deref().unwrap_or(id);
                    self.writer.test_suite_finished(&event.full_name, flow_id)?;
                }
            }
            Parentage::Unrooted => {
                if self.legacy.leave() {
                    self.writer.test_suite_finished(&event.full_name, id)?;
                }
            }
        }
        Ok(())
    }

    /// Start sequence for a test: announce the new flow first when this
    /// test opens one, then the test itself.
    fn test_started(&self, id: &str, flow: &ResolvedFlow, name: &str) -> Result<(), PublishError> {
        if let Some(parent_flow) = &flow.new_flow_parent {
            self.writer.flow_started(id, parent_flow)?;
        }
        self.writer.test_started(name, &flow.test_flow_id)?;
        Ok(())
    }

    /// `test-case`: registry entry is cleared unconditionally, and when this
    /// event's flow was opened by its `start-test`, the matching
    /// `flowFinished` is emitted even if producing the outcome lines failed.
    fn test_case(
        &self,
        event: &TestEvent,
        id: &str,
        flow: &ResolvedFlow,
    ) -> Result<(), PublishError> {
        let was_started = self.registry.clear(id);

        let outcome = self.emit_outcome(event, id, flow, was_started);
        let cleanup = match &flow.new_flow_parent {
            Some(_) => self.writer.flow_finished(id).map_err(PublishError::from),
            None => Ok(()),
        };
        // Report the outcome error first; the cleanup line has been written
        // (or attempted) either way.
        outcome.and(cleanup)
    }

    fn emit_outcome(
        &self,
        event: &TestEvent,
        id: &str,
        flow: &ResolvedFlow,
        was_started: bool,
    ) -> Result<(), PublishError> {
        if !was_started {
            // Finish for a test that never reported a start: emit the start
            // sequence now so the consumer sees a balanced pair.
            self.test_started(id, flow, &event.full_name)?;
        }

        let Some(status) = event.status() else {
            trace!(id, "test-case without usable result");
            return Ok(());
        };

        let name = event.full_name.as_str();
        let flow_id = flow.test_flow_id.as_str();
        match status {
            TestStatus::Passed => self.test_finished(event, name, flow_id),
            TestStatus::Failed => {
                self.writer.test_failed(
                    name,
                    event.failure_message(),
                    event.stack_trace(),
                    flow_id,
                )?;
                self.test_finished(event, name, flow_id)
            }
            TestStatus::Skipped => {
                self.emit_output(event, name, flow_id)?;
                self.writer
                    .test_ignored(name, event.reason_message(), flow_id)?;
                Ok(())
            }
            // The literal reason is fixed for inconclusive outcomes; any
            // reason carried by the event is deliberately not used.
            TestStatus::Inconclusive => {
                self.writer.test_ignored(name, "Inconclusive", flow_id)?;
                Ok(())
            }
        }
    }

    /// Output-then-finished pair shared by the passed and failed paths
    fn test_finished(
        &self,
        event: &TestEvent,
        name: &str,
        flow_id: &str,
    ) -> Result<(), PublishError> {
        self.emit_output(event, name, flow_id)?;
        self.writer
            .test_finished(name, event.duration_millis(), flow_id)?;
        Ok(())
    }

    fn emit_output(&self, event: &TestEvent, name: &str, flow_id: &str) -> Result<(), PublishError> {
        let out = event.output_text();
        if !out.is_empty() {
            self.writer.test_std_out(name, out, flow_id)?;
        }
        Ok(())
    }
}

/// Stored parent value for a registry entry; absence is stored as empty
fn parent_value(event: &TestEvent) -> &str {
    event.parent_id.as_deref().unwrap_or_default()
}
