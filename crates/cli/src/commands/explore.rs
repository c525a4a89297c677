// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Exhaustive state exploration

use crate::error::MxError;
use crate::output::{self, OutputFormat};
use anyhow::Result;
use clap::Args;
use mx_core::verify::{ExploreConfig, ExploreReport, Explorer};
use serde::Serialize;
use std::fmt;

#[derive(Args, Debug)]
pub struct ExploreArgs {
    /// Number of processes, identified 1..=N
    #[arg(long, default_value_t = 2)]
    pub processes: u32,
    /// Requests each process may issue
    #[arg(long, default_value_t = 2)]
    pub rounds: u32,
    /// Stop after visiting this many distinct states
    #[arg(long, default_value_t = 200_000)]
    pub max_states: usize,
    #[arg(long, value_enum, default_value_t)]
    pub output: OutputFormat,
}

#[derive(Debug, Serialize)]
pub struct ExploreSummary {
    pub config: ExploreConfig,
    #[serde(flatten)]
    pub report: ExploreReport,
}

impl fmt::Display for ExploreSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let report = &self.report;
        writeln!(
            f,
            "processes: {}, rounds: {}",
            self.config.processes, self.config.rounds
        )?;
        writeln!(
            f,
            "states: {}, transitions: {}, max depth: {}, terminal: {}",
            report.states, report.transitions, report.max_depth, report.terminal_states
        )?;
        for cx in &report.counterexamples {
            writeln!(f, "counterexample: {}", cx.finding)?;
            for (step, action) in cx.trace.iter().enumerate() {
                writeln!(f, "  {:>3}. {}", step + 1, action)?;
            }
        }
        let verdict = match (report.is_clean(), report.complete) {
            (false, _) => "violations found",
            (true, true) => "clean",
            (true, false) => "clean so far (state limit reached)",
        };
        write!(f, "result: {}", verdict)
    }
}

pub fn run(args: ExploreArgs) -> Result<()> {
    let summary = explore(ExploreConfig {
        processes: args.processes,
        rounds: args.rounds,
        max_states: args.max_states,
    })?;
    output::print(&summary, args.output)?;

    if !summary.report.complete {
        tracing::warn!(max_states = args.max_states, "exploration stopped early");
    }
    if !summary.report.is_clean() {
        return Err(MxError::protocol_unsafe(&summary.report.counterexamples).into());
    }
    Ok(())
}

pub fn explore(config: ExploreConfig) -> Result<ExploreSummary> {
    let report = Explorer::new(config)?.run();
    Ok(ExploreSummary { config, report })
}

#[cfg(test)]
#[path = "explore_tests.rs"]
mod tests;
