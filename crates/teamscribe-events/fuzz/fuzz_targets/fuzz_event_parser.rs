// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Fuzz target for event document parsing
//!
//! Feeds arbitrary bytes through `parse_event` line by line; parsing and the
//! derived accessors must never panic.

#![no_main]

use libfuzzer_sys::fuzz_target;

use teamscribe_events::parse_event;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        for line in input.lines() {
            if let Ok(event) = parse_event(line) {
                let _ = event.kind();
                let _ = event.parentage();
                let _ = event.status();
                let _ = event.duration_millis();
                let _ = event.failure_message();
                let _ = event.reason_message();
            }
        }
    }
});
