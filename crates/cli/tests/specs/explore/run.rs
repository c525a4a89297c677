//! Explore command specs

use crate::prelude::*;

#[test]
fn single_process_space() {
    mx().args(&["explore", "--processes", "1", "--rounds", "2"])
        .passes()
        .stdout_eq(
            "processes: 1, rounds: 2\n\
             states: 7, transitions: 6, max depth: 6, terminal: 1\n\
             result: clean\n",
        );
}

#[test]
fn two_processes_are_clean() {
    mx().args(&["explore", "--processes", "2", "--rounds", "2"])
        .passes()
        .stdout_has("result: clean\n");
}

#[test]
fn state_limit_warns() {
    mx().args(&["explore", "--processes", "3", "--rounds", "2", "--max-states", "50"])
        .passes()
        .stdout_has("states: 50,")
        .stdout_has("result: clean so far (state limit reached)")
        .stderr_has("exploration stopped early");
}

#[test]
fn json_report() {
    mx().args(&["explore", "--processes", "1", "--rounds", "1", "--output", "json"])
        .passes()
        .stdout_has("\"complete\": true")
        .stdout_has("\"counterexamples\": []");
}

#[test]
fn empty_cluster_fails() {
    mx().args(&["explore", "--processes", "0"])
        .fails()
        .stderr_has("error:");
}
