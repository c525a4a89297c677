// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Deterministic fair scheduler
//!
//! Visits processes round-robin. On its turn a process takes one enabled
//! action, rotating through its own candidates so no enabled action is
//! starved. Each process requests until it has entered `rounds` times.

use super::invariants::{check_invariants, InvariantViolation};
use crate::clock::Timestamp;
use crate::effect::Event;
use crate::error::MutexError;
use crate::id::ProcessId;
use crate::mutex::{Action, MutexEngine};
use serde::Serialize;
use std::collections::BTreeMap;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error("no process can move after {steps} steps")]
    Stalled { steps: usize },
    #[error("step limit of {limit} reached before every process finished")]
    StepLimit { limit: usize },
    #[error("invariant violated after {action}: {violation}")]
    Invariant {
        action: Action,
        violation: InvariantViolation,
    },
    #[error("engine rejected an enabled action: {0}")]
    Engine(#[from] MutexError),
}

/// One critical-section entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Entry {
    pub process: ProcessId,
    pub timestamp: Timestamp,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScheduleOutcome {
    pub entries: Vec<Entry>,
    pub steps: usize,
}

pub struct FairScheduler {
    engine: MutexEngine,
    rounds: u32,
    max_steps: usize,
    issued: BTreeMap<ProcessId, u32>,
    offsets: BTreeMap<ProcessId, usize>,
}

impl FairScheduler {
    pub fn new(engine: MutexEngine, rounds: u32) -> Self {
        let issued = engine.members().iter().map(|p| (p, 0)).collect();
        let offsets = engine.members().iter().map(|p| (p, 0)).collect();
        Self {
            engine,
            rounds,
            max_steps: 100_000,
            issued,
            offsets,
        }
    }

    pub fn with_max_steps(mut self, max_steps: usize) -> Self {
        self.max_steps = max_steps;
        self
    }

    pub fn engine(&self) -> &MutexEngine {
        &self.engine
    }

    fn candidates(&self, process: ProcessId) -> Vec<Action> {
        self.engine
            .enabled_actions()
            .into_iter()
            .filter(|a| a.process() == process)
            .filter(|a| match a {
                Action::Request { process } => {
                    self.issued.get(process).copied().unwrap_or(0) < self.rounds
                }
                _ => true,
            })
            .collect()
    }

    fn finished(&self) -> bool {
        self.issued.values().all(|n| *n >= self.rounds)
            && self.engine.occupants().is_empty()
            && self.engine.processes().all(|s| s.own_request().is_none())
            && self.engine.channels().is_quiescent()
    }

    /// Run until every process has entered and left `rounds` times
    pub fn run(&mut self) -> Result<ScheduleOutcome, ScheduleError> {
        let members: Vec<ProcessId> = self.engine.members().iter().collect();
        let mut entries = Vec::new();
        let mut steps = 0;
        let mut turn = 0;

        while !self.finished() {
            if steps >= self.max_steps {
                return Err(ScheduleError::StepLimit {
                    limit: self.max_steps,
                });
            }

            // Find the next process, in turn order, that can move
            let mut chosen = None;
            for i in 0..members.len() {
                let process = members[(turn + i) % members.len()];
                let candidates = self.candidates(process);
                if !candidates.is_empty() {
                    let offset = self.offsets.entry(process).or_insert(0);
                    chosen = Some(candidates[*offset % candidates.len()]);
                    *offset = offset.wrapping_add(1);
                    turn = (turn + i + 1) % members.len();
                    break;
                }
            }
            let Some(action) = chosen else {
                return Err(ScheduleError::Stalled { steps });
            };

            let events = self.engine.apply(&action)?;
            steps += 1;

            if let Action::Request { process } = action {
                *self.issued.entry(process).or_insert(0) += 1;
            }
            for event in events {
                if let Event::Entered { process, timestamp } = event {
                    entries.push(Entry { process, timestamp });
                }
            }
            if let Some(violation) = check_invariants(&self.engine).into_iter().next() {
                return Err(ScheduleError::Invariant { action, violation });
            }
        }

        Ok(ScheduleOutcome { entries, steps })
    }
}

#[cfg(test)]
#[path = "scheduler_tests.rs"]
mod tests;
