//! Help output specs

use crate::prelude::*;

#[test]
fn help_lists_subcommands() {
    mx().args(&["--help"])
        .passes()
        .stdout_has("simulate")
        .stdout_has("explore")
        .stdout_has("config")
        .stdout_has("completions");
}

#[test]
fn simulate_help_lists_overrides() {
    mx().args(&["simulate", "--help"])
        .passes()
        .stdout_has("--processes")
        .stdout_has("--rounds")
        .stdout_has("--hold")
        .stdout_has("--output");
}

#[test]
fn version_flag() {
    mx().args(&["--version"]).passes().stdout_has("mx ");
}

#[test]
fn completions_for_bash() {
    mx().args(&["completions", "bash"])
        .passes()
        .stdout_has("_mx");
}

#[test]
fn specs_run_against_the_built_binary() {
    assert!(std::path::Path::new(MX_BIN).is_file(), "{MX_BIN} missing");
    mx().args(&["--help"]).passes().stdout_has("Usage: mx");
}
