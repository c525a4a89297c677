//! Error reporting specs

use crate::prelude::*;

#[test]
fn unknown_subcommand_fails() {
    mx().args(&["frobnicate"]).fails().stderr_has("frobnicate");
}

#[test]
fn missing_config_file_explains_itself() {
    let temp = Project::empty();
    temp.mx()
        .args(&["simulate", "--config", "absent.toml"])
        .fails()
        .stderr_has("error: Cannot use config 'absent.toml'")
        .stderr_has("suggestions:")
        .stderr_has("1. Print a valid starting point: mx config > mx.toml");
}

#[test]
fn duplicate_processes_are_rejected() {
    let temp = Project::empty();
    temp.file("mx.toml", "processes = [1, 1]\n");
    temp.mx()
        .args(&["simulate", "--config", "mx.toml"])
        .fails()
        .stderr_has("p1");
}

#[test]
fn zero_rounds_are_rejected() {
    mx().args(&["simulate", "--rounds", "0"])
        .fails()
        .stderr_has("rounds must be at least 1");
}

#[test]
fn unknown_config_keys_are_rejected() {
    let temp = Project::empty();
    temp.file("mx.toml", "processes = [1]\nretries = 3\n");
    temp.mx()
        .args(&["simulate", "--config", "mx.toml"])
        .fails()
        .stderr_has("retries");
}
