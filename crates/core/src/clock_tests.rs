// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use yare::parameterized;

#[test]
fn new_clock_starts_at_zero() {
    let clock = LogicalClock::new();
    assert_eq!(clock.now(), Timestamp::ZERO);
    assert!(clock.now().is_zero());
}

#[test]
fn tick_advances_by_exactly_one() {
    let mut clock = LogicalClock::new();
    assert_eq!(clock.tick(), Timestamp(1));
    assert_eq!(clock.tick(), Timestamp(2));
    assert_eq!(clock.now(), Timestamp(2));
}

#[parameterized(
    incoming_ahead = { 3, 10, 11 },
    incoming_behind = { 10, 3, 11 },
    incoming_equal = { 5, 5, 6 },
    incoming_zero = { 0, 0, 1 },
)]
fn observe_takes_max_plus_one(current: u64, incoming: u64, expected: u64) {
    let mut clock = LogicalClock::new();
    for _ in 0..current {
        clock.tick();
    }
    assert_eq!(clock.observe(Timestamp(incoming)), Timestamp(expected));
    assert_eq!(clock.now(), Timestamp(expected));
}

#[test]
fn copies_do_not_share_state() {
    let mut clock1 = LogicalClock::new();
    let clock2 = clock1;
    clock1.tick();
    assert_eq!(clock1.now(), Timestamp(1));
    assert_eq!(clock2.now(), Timestamp::ZERO);
}

#[test]
fn timestamps_serialize_as_bare_integers() {
    let json = serde_json::to_string(&Timestamp(7)).unwrap();
    assert_eq!(json, "7");
}
