// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Live cluster simulation
//!
//! Starts one node per process over the in-memory mesh, has every process
//! enter the critical section `rounds` times, and reports the entry order
//! recorded on the event bus.

use crate::error::MxError;
use crate::output::{self, OutputFormat};
use anyhow::Result;
use clap::Args;
use mx_adapters::{MemoryTransport, TracedTransport};
use mx_core::{ClusterConfig, Event, EventBus, ProcessId, ProcessSet, Subscription, Timestamp};
use mx_engine::{Cluster, MutexHandle, RuntimeError};
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;
use tokio::task::JoinHandle;

#[derive(Args, Debug, Default)]
pub struct SimulateArgs {
    /// Cluster configuration file (TOML)
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Number of processes, identified 1..=N
    #[arg(long)]
    pub processes: Option<u32>,
    /// Critical-section entries per process
    #[arg(long)]
    pub rounds: Option<u32>,
    /// Time spent inside the critical section, e.g. "5ms"
    #[arg(long, value_parser = humantime::parse_duration)]
    pub hold: Option<Duration>,
    #[arg(long, value_enum, default_value_t)]
    pub output: OutputFormat,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntryRecord {
    pub seq: usize,
    pub process: ProcessId,
    pub timestamp: Timestamp,
}

#[derive(Debug, Serialize)]
pub struct SimulationReport {
    pub processes: ProcessSet,
    pub rounds: u32,
    pub entries: Vec<EntryRecord>,
}

impl fmt::Display for SimulationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:<6} {:<8} TIMESTAMP", "SEQ", "PROCESS")?;
        for entry in &self.entries {
            writeln!(
                f,
                "{:<6} {:<8} {}",
                entry.seq,
                entry.process.to_string(),
                entry.timestamp
            )?;
        }
        write!(
            f,
            "{} entries by {} processes, no overlap",
            self.entries.len(),
            self.processes.len()
        )
    }
}

pub async fn run(args: SimulateArgs) -> Result<()> {
    let config = resolve_config(&args)?;
    let report = simulate(&config).await?;
    output::print(&report, args.output)
}

/// File (or default) configuration with command-line overrides applied
pub fn resolve_config(args: &SimulateArgs) -> Result<ClusterConfig> {
    let mut config = match &args.config {
        Some(path) => ClusterConfig::load(path).map_err(|e| MxError::bad_config(path, e))?,
        None => ClusterConfig::default(),
    };
    if let Some(count) = args.processes {
        config.processes = ProcessSet::numbered(count)?;
    }
    if let Some(rounds) = args.rounds {
        config.rounds = rounds;
    }
    if let Some(hold) = args.hold {
        config.hold = hold;
    }
    config.validate()?;
    Ok(config)
}

pub async fn simulate(config: &ClusterConfig) -> Result<SimulationReport> {
    let bus = EventBus::new();
    let mut log = bus.subscribe(Subscription::new(
        "simulate",
        &["mutex:entered", "mutex:exited"],
    ));

    let (mesh, inboxes) = MemoryTransport::mesh(&config.processes);
    let cluster = match Cluster::start(config, TracedTransport::new(mesh), inboxes, bus) {
        Ok(cluster) => cluster,
        Err(RuntimeError::TransportFailure(e)) => {
            return Err(MxError::transport_rejected(e).into())
        }
        Err(e) => return Err(e.into()),
    };
    tracing::info!(rounds = config.rounds, hold = ?config.hold, "simulation started");

    let workers = cluster
        .handles()
        .cloned()
        .map(|handle| tokio::spawn(worker(handle, config.rounds, config.hold)))
        .collect();

    let outcome = tokio::select! {
        result = join_workers(workers) => result,
        _ = tokio::signal::ctrl_c() => Err(MxError::new("Interrupted").into()),
    };
    let stopped = cluster.shutdown().await;
    outcome?;
    stopped?;

    let mut events = Vec::new();
    while let Ok(event) = log.try_recv() {
        events.push(event);
    }
    let entries = entry_log(events)?;
    Ok(SimulationReport {
        processes: config.processes.clone(),
        rounds: config.rounds,
        entries,
    })
}

async fn worker(handle: MutexHandle, rounds: u32, hold: Duration) -> Result<(), RuntimeError> {
    let process = handle.process();
    for round in 1..=rounds {
        let timestamp = handle.request_entry().await?;
        tracing::debug!(%process, round, %timestamp, "holding");
        tokio::time::sleep(hold).await;
        handle.release_entry().await?;
    }
    Ok(())
}

async fn join_workers(workers: Vec<JoinHandle<Result<(), RuntimeError>>>) -> Result<()> {
    for worker in workers {
        match worker.await? {
            Ok(()) => {}
            Err(e @ RuntimeError::Timeout { .. }) => return Err(MxError::stalled(e).into()),
            Err(e) => return Err(e.into()),
        }
    }
    Ok(())
}

/// Number the entries in bus order, failing if two ever overlap
pub fn entry_log(events: Vec<Event>) -> Result<Vec<EntryRecord>> {
    let mut holder: Option<ProcessId> = None;
    let mut entries = Vec::new();
    for event in events {
        match event {
            Event::Entered { process, timestamp } => {
                if let Some(inside) = holder {
                    return Err(MxError::new("Mutual exclusion violated")
                        .with_context(format!("{process} entered while {inside} was inside"))
                        .into());
                }
                holder = Some(process);
                entries.push(EntryRecord {
                    seq: entries.len() + 1,
                    process,
                    timestamp,
                });
            }
            Event::Exited { process, .. } if holder == Some(process) => holder = None,
            _ => {}
        }
    }
    Ok(entries)
}

#[cfg(test)]
#[path = "simulate_tests.rs"]
mod tests;
