// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use yare::parameterized;

fn explore(processes: u32, rounds: u32) -> ExploreReport {
    Explorer::new(ExploreConfig {
        processes,
        rounds,
        max_states: 500_000,
    })
    .unwrap()
    .run()
}

#[parameterized(
    one_process_three_rounds = { 1, 3 },
    two_processes_one_round = { 2, 1 },
    two_processes_two_rounds = { 2, 2 },
    three_processes_one_round = { 3, 1 },
)]
fn bounded_runs_are_safe_and_deadlock_free(processes: u32, rounds: u32) {
    let report = explore(processes, rounds);
    assert!(report.complete);
    assert!(report.is_clean(), "findings: {:?}", report.counterexamples);
    assert!(report.terminal_states >= 1);
    assert!(report.states > 1);
}

#[test]
fn single_process_space_is_a_line() {
    // request, enter, exit per round, plus the initial state
    let report = explore(1, 2);
    assert_eq!(report.states, 7);
    assert_eq!(report.terminal_states, 1);
    assert_eq!(report.max_depth, 6);
}

#[test]
fn state_cap_marks_report_incomplete() {
    let report = Explorer::new(ExploreConfig {
        processes: 3,
        rounds: 1,
        max_states: 10,
    })
    .unwrap()
    .run();
    assert!(!report.complete);
    assert_eq!(report.states, 10);
}

#[test]
fn zero_processes_is_rejected() {
    let result = Explorer::new(ExploreConfig {
        processes: 0,
        rounds: 1,
        max_states: 10,
    });
    assert!(result.is_err());
}

#[test]
fn trace_reconstruction_follows_parents() {
    let a = Action::Request {
        process: crate::id::ProcessId(1),
    };
    let b = Action::Enter {
        process: crate::id::ProcessId(1),
    };
    let parents = vec![None, Some((0, a)), Some((1, b))];
    assert_eq!(Explorer::trace_to(&parents, 2), vec![a, b]);
    assert!(Explorer::trace_to(&parents, 0).is_empty());
}
