//! Config command specs

use crate::prelude::*;

#[test]
fn config_prints_default_toml() {
    mx().args(&["config"])
        .passes()
        .stderr_empty()
        .stdout_has("processes = [")
        .stdout_has("rounds = 2")
        .stdout_has("hold = \"5ms\"")
        .stdout_has("request_timeout = \"10s\"")
        .stdout_has("[transport]")
        .stdout_has("fifo = true");
}

#[test]
fn printed_config_is_accepted_by_simulate() {
    let temp = Project::empty();
    let rendered = temp.mx().args(&["config"]).passes().stdout();
    temp.file("mx.toml", &rendered);

    temp.mx()
        .args(&["simulate", "--config", "mx.toml", "--hold", "0ms"])
        .passes()
        .stdout_has("6 entries by 3 processes");
}
