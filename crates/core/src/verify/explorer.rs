// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Exhaustive state exploration
//!
//! Breadth-first search over every interleaving of the six transitions for a
//! fixed process set. Each process may issue at most `rounds` requests, which
//! keeps clocks bounded and the state space finite. Every reached state is
//! checked against the safety invariants, and any state where a process is
//! still requesting but nothing can move is reported as a deadlock.

use super::invariants::{check_invariants, InvariantViolation};
use crate::id::{MembershipError, ProcessId, ProcessSet};
use crate::mutex::{Action, MutexEngine};
use crate::process::Phase;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, VecDeque};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExploreConfig {
    /// Number of processes, identified `1..=processes`
    pub processes: u32,
    /// Requests each process may issue
    pub rounds: u32,
    /// Stop after visiting this many distinct states
    pub max_states: usize,
}

impl Default for ExploreConfig {
    fn default() -> Self {
        Self {
            processes: 2,
            rounds: 2,
            max_states: 200_000,
        }
    }
}

/// What went wrong in a reached state
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Finding {
    Invariant { violation: InvariantViolation },
    Deadlock,
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Finding::Invariant { violation } => write!(f, "{}", violation),
            Finding::Deadlock => write!(f, "deadlock: a request can never be granted"),
        }
    }
}

/// A finding plus the action sequence that reaches it from the initial state
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Counterexample {
    pub finding: Finding,
    pub trace: Vec<Action>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExploreReport {
    pub states: usize,
    pub transitions: usize,
    pub max_depth: usize,
    /// States where every process finished its rounds and the channels drained
    pub terminal_states: usize,
    /// False if the search stopped at `max_states`
    pub complete: bool,
    pub counterexamples: Vec<Counterexample>,
}

impl ExploreReport {
    pub fn is_clean(&self) -> bool {
        self.counterexamples.is_empty()
    }
}

/// A model state: the engine plus how many requests each process has issued
#[derive(Clone, PartialEq, Eq, Hash)]
struct Node {
    engine: MutexEngine,
    issued: Vec<u32>,
}

pub struct Explorer {
    config: ExploreConfig,
    members: ProcessSet,
}

impl Explorer {
    pub fn new(config: ExploreConfig) -> Result<Self, MembershipError> {
        let members = ProcessSet::numbered(config.processes)?;
        Ok(Self { config, members })
    }

    /// Successor actions allowed under the round bound
    fn allowed(&self, node: &Node) -> Vec<Action> {
        node.engine
            .enabled_actions()
            .into_iter()
            .filter(|action| match action {
                Action::Request { process } => self
                    .index_of(*process)
                    .is_some_and(|i| node.issued[i] < self.config.rounds),
                _ => true,
            })
            .collect()
    }

    fn index_of(&self, process: ProcessId) -> Option<usize> {
        self.members.iter().position(|q| q == process)
    }

    fn trace_to(parents: &[Option<(usize, Action)>], mut index: usize) -> Vec<Action> {
        let mut trace = Vec::new();
        while let Some((parent, action)) = parents[index] {
            trace.push(action);
            index = parent;
        }
        trace.reverse();
        trace
    }

    pub fn run(&self) -> ExploreReport {
        let initial = Node {
            engine: MutexEngine::new(self.members.clone()),
            issued: vec![0; self.members.len()],
        };

        let mut report = ExploreReport::default();
        let mut visited: HashMap<Node, usize> = HashMap::new();
        let mut parents: Vec<Option<(usize, Action)>> = vec![None];
        let mut queue: VecDeque<(usize, usize, Node)> = VecDeque::new();

        visited.insert(initial.clone(), 0);
        queue.push_back((0, 0, initial));
        report.complete = true;

        while let Some((index, depth, node)) = queue.pop_front() {
            report.max_depth = report.max_depth.max(depth);

            for violation in check_invariants(&node.engine) {
                report.counterexamples.push(Counterexample {
                    finding: Finding::Invariant { violation },
                    trace: Self::trace_to(&parents, index),
                });
            }

            let actions = self.allowed(&node);
            if actions.is_empty() {
                let stuck = node
                    .engine
                    .processes()
                    .any(|s| s.phase() != Phase::Idle);
                if stuck {
                    report.counterexamples.push(Counterexample {
                        finding: Finding::Deadlock,
                        trace: Self::trace_to(&parents, index),
                    });
                } else {
                    report.terminal_states += 1;
                }
                continue;
            }

            for action in actions {
                let mut next = node.clone();
                if next.engine.apply(&action).is_err() {
                    continue;
                }
                if let Action::Request { process } = action {
                    if let Some(i) = self.index_of(process) {
                        next.issued[i] += 1;
                    }
                }
                report.transitions += 1;

                if visited.contains_key(&next) {
                    continue;
                }
                if visited.len() >= self.config.max_states {
                    report.complete = false;
                    continue;
                }
                let next_index = parents.len();
                parents.push(Some((index, action)));
                visited.insert(next.clone(), next_index);
                queue.push_back((next_index, depth + 1, next));
            }
        }

        report.states = visited.len();
        tracing::debug!(
            states = report.states,
            transitions = report.transitions,
            complete = report.complete,
            findings = report.counterexamples.len(),
            "exploration finished"
        );
        report
    }
}

#[cfg(test)]
#[path = "explorer_tests.rs"]
mod tests;
