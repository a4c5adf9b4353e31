// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Fuzz target for the publisher
//!
//! Runs arbitrary event lines through the full parse-and-publish path; the
//! publisher must never panic, whatever the nesting or parent references
//! look like.

#![no_main]

use libfuzzer_sys::fuzz_target;

use teamscribe::publisher::TeamCityPublisher;
use teamscribe_events::parse_event;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        let publisher = TeamCityPublisher::new(std::io::sink());
        for line in input.lines() {
            if let Ok(event) = parse_event(line) {
                let _ = publisher.publish(&event);
            }
        }
    }
});
