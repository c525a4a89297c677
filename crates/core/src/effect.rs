// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Effects and events produced by process transitions

use crate::clock::Timestamp;
use crate::id::ProcessId;
use crate::message::Message;
use serde::{Deserialize, Serialize};

/// Side effects a transition asks its driver to perform
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Enqueue a message from the transitioning process to `to`
    Send { to: ProcessId, message: Message },
    /// Emit an event for other components to observe
    Emit(Event),
}

/// Events emitted by process transitions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum Event {
    Requested {
        process: ProcessId,
        timestamp: Timestamp,
    },
    Entered {
        process: ProcessId,
        timestamp: Timestamp,
    },
    Exited {
        process: ProcessId,
        timestamp: Timestamp,
    },
    RequestRecorded {
        process: ProcessId,
        from: ProcessId,
        timestamp: Timestamp,
    },
    AckReceived {
        process: ProcessId,
        from: ProcessId,
    },
    ReleaseReceived {
        process: ProcessId,
        from: ProcessId,
    },
}

impl Event {
    /// Get the event name for pattern matching
    /// Format: "category:action"
    pub fn name(&self) -> String {
        match self {
            Event::Requested { .. } => "mutex:requested".to_string(),
            Event::Entered { .. } => "mutex:entered".to_string(),
            Event::Exited { .. } => "mutex:exited".to_string(),
            Event::RequestRecorded { .. } => "mutex:request-recorded".to_string(),
            Event::AckReceived { .. } => "mutex:ack-received".to_string(),
            Event::ReleaseReceived { .. } => "mutex:release-received".to_string(),
        }
    }

    /// Process whose state changed
    pub fn process(&self) -> ProcessId {
        match self {
            Event::Requested { process, .. }
            | Event::Entered { process, .. }
            | Event::Exited { process, .. }
            | Event::RequestRecorded { process, .. }
            | Event::AckReceived { process, .. }
            | Event::ReleaseReceived { process, .. } => *process,
        }
    }
}

/// Split effects into outbound messages and emitted events
pub fn partition(effects: Vec<Effect>) -> (Vec<(ProcessId, Message)>, Vec<Event>) {
    let mut sends = Vec::new();
    let mut events = Vec::new();
    for effect in effects {
        match effect {
            Effect::Send { to, message } => sends.push((to, message)),
            Effect::Emit(event) => events.push(event),
        }
    }
    (sends, events)
}

#[cfg(test)]
#[path = "effect_tests.rs"]
mod tests;
