// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! teamscribe-events: Test lifecycle event model for teamscribe
//!
//! This library crate provides the structured event records consumed by the
//! teamscribe publisher, together with parsing of newline-delimited JSON
//! event documents.
//!
//! # Example
//!
//! ```
//! use teamscribe_events::{EventKind, parse_event};
//!
//! let event = parse_event(
//!     r#"{"type":"test-case","id":"0-1001","parentId":"0-1000",
//!         "fullname":"Tests.Fixture.Method","result":"passed","duration":"0.123"}"#,
//! ).unwrap();
//! assert_eq!(event.kind(), EventKind::TestCase);
//! assert_eq!(event.duration_millis(), 123);
//! ```

pub mod error;
pub mod event;
pub mod status;

pub use error::EventError;
pub use event::{EventKind, Failure, Parentage, Reason, TestEvent, parse_event};
pub use status::TestStatus;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::error::EventError;
    pub use crate::event::{EventKind, Parentage, TestEvent, parse_event};
    pub use crate::status::TestStatus;
}
