// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Property-based tests for teamscribe-events
//!
//! These tests verify the parsing invariants hold for arbitrary inputs,
//! in particular the duration arithmetic and the absent-versus-empty
//! distinction on the parent attribute.

use proptest::prelude::*;

use teamscribe_events::{Parentage, TestEvent, parse_event};

proptest! {
    #[test]
    fn prop_whole_second_durations_are_exact(secs in 0u64..100_000) {
        let event = TestEvent::test_case("1", "T.M").with_duration(secs.to_string());
        prop_assert_eq!(event.duration_millis(), secs * 1000);
    }

    #[test]
    fn prop_fractional_durations_truncate_within_one_milli(
        secs in 0u64..10_000,
        millis in 0u32..1000,
    ) {
        // Binary floating point cannot represent every decimal exactly, so
        // truncation may land one short of the decimal value; never more.
        let event =
            TestEvent::test_case("1", "T.M").with_duration(format!("{secs}.{millis:03}"));
        let expected = secs * 1000 + u64::from(millis);
        let actual = event.duration_millis();
        prop_assert!(
            actual == expected || actual + 1 == expected,
            "{}.{:03} became {} ms, expected about {}",
            secs, millis, actual, expected
        );
    }

    #[test]
    fn prop_garbage_durations_are_zero(duration in "[a-zA-Z ,;]{0,16}") {
        let event = TestEvent::test_case("1", "T.M").with_duration(duration);
        prop_assert_eq!(event.duration_millis(), 0);
    }

    #[test]
    fn prop_duration_never_panics(duration in ".*") {
        let event = TestEvent::test_case("1", "T.M").with_duration(duration);
        let _ = event.duration_millis();
    }

    #[test]
    fn prop_parent_presence_survives_round_trip(
        parent in proptest::option::of("[a-z0-9-]{0,8}"),
    ) {
        let mut event = TestEvent::start_suite("1", "Tests.dll");
        event.parent_id = parent.clone();
        let json = serde_json::to_string(&event).expect("serialize");
        let reparsed = parse_event(&json).expect("reparse");
        match parent {
            Some(ref p) => prop_assert_eq!(reparsed.parentage(), Parentage::Rooted(p)),
            None => prop_assert_eq!(reparsed.parentage(), Parentage::Unrooted),
        }
    }
}
