// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Error types for teamscribe-events

use thiserror::Error;

/// Errors that can occur while reading test lifecycle events
#[derive(Debug, Error)]
pub enum EventError {
    /// Error parsing an event document
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// Error reading an event source
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
