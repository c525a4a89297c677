// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Safety invariants checked on engine snapshots

use crate::id::ProcessId;
use crate::message::MessageKind;
use crate::mutex::MutexEngine;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "invariant", rename_all = "snake_case")]
pub enum InvariantViolation {
    #[error("mutual exclusion violated: {occupants:?} are all in the critical section")]
    MutualExclusion { occupants: Vec<ProcessId> },
    #[error("channel {process} -> {process} holds a message")]
    SelfChannel { process: ProcessId },
    #[error("channel {from} -> {to} holds {count} pending {kind} messages")]
    DuplicatePending {
        from: ProcessId,
        to: ProcessId,
        kind: MessageKind,
        count: usize,
    },
    #[error("{process} has an outstanding request but has not acknowledged itself")]
    MissingSelfAck { process: ProcessId },
}

/// Check every safety invariant, returning all that fail
pub fn check_invariants(engine: &MutexEngine) -> Vec<InvariantViolation> {
    let mut violations = Vec::new();

    let occupants = engine.occupants();
    if occupants.len() > 1 {
        violations.push(InvariantViolation::MutualExclusion { occupants });
    }

    for process in engine.members().iter() {
        if engine.channels().pending(process, process).next().is_some() {
            violations.push(InvariantViolation::SelfChannel { process });
        }
    }

    for (from, to) in engine.members().ordered_pairs() {
        for kind in MessageKind::ALL {
            let count = engine.channels().pending_of_kind(from, to, kind);
            if count > 1 {
                violations.push(InvariantViolation::DuplicatePending {
                    from,
                    to,
                    kind,
                    count,
                });
            }
        }
    }

    for state in engine.processes() {
        if state.own_request().is_some() && !state.has_ack_from(state.id()) {
            violations.push(InvariantViolation::MissingSelfAck {
                process: state.id(),
            });
        }
    }

    violations
}
