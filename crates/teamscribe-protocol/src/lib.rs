// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! teamscribe-protocol: TeamCity service message formatting
//!
//! This library crate renders the `##teamcity[...]` text protocol consumed by
//! TeamCity build agents. It owns the two purely textual concerns of the
//! publisher: escaping attribute values and formatting complete message lines.
//!
//! # Example
//!
//! ```
//! use teamscribe_protocol::ServiceMessageWriter;
//!
//! let writer = ServiceMessageWriter::new(Vec::new());
//! writer.test_started("Tests.Fixture.Method", "1").unwrap();
//! let out = String::from_utf8(writer.into_sink()).unwrap();
//! assert!(out.starts_with("##teamcity[testStarted"));
//! ```

pub mod escape;
pub mod writer;

pub use escape::escape;
pub use writer::ServiceMessageWriter;
