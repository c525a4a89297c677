// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use crate::id::ProcessId;
use crate::message::MessageKind;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the six guarded transitions, named by the process that takes it
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    Request { process: ProcessId },
    Enter { process: ProcessId },
    Exit { process: ProcessId },
    ReceiveRequest { process: ProcessId, from: ProcessId },
    ReceiveAck { process: ProcessId, from: ProcessId },
    ReceiveRelease { process: ProcessId, from: ProcessId },
}

impl Action {
    /// Delivery action matching the message kind at the head of `from -> process`
    pub fn receive(process: ProcessId, from: ProcessId, kind: MessageKind) -> Self {
        match kind {
            MessageKind::Request => Action::ReceiveRequest { process, from },
            MessageKind::Ack => Action::ReceiveAck { process, from },
            MessageKind::Release => Action::ReceiveRelease { process, from },
        }
    }

    /// Process whose state the action changes
    pub fn process(&self) -> ProcessId {
        match self {
            Action::Request { process }
            | Action::Enter { process }
            | Action::Exit { process }
            | Action::ReceiveRequest { process, .. }
            | Action::ReceiveAck { process, .. }
            | Action::ReceiveRelease { process, .. } => *process,
        }
    }

    /// Sender and expected head kind, for delivery actions
    pub fn delivery(&self) -> Option<(ProcessId, MessageKind)> {
        match self {
            Action::ReceiveRequest { from, .. } => Some((*from, MessageKind::Request)),
            Action::ReceiveAck { from, .. } => Some((*from, MessageKind::Ack)),
            Action::ReceiveRelease { from, .. } => Some((*from, MessageKind::Release)),
            Action::Request { .. } | Action::Enter { .. } | Action::Exit { .. } => None,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Request { process } => write!(f, "request({})", process),
            Action::Enter { process } => write!(f, "enter({})", process),
            Action::Exit { process } => write!(f, "exit({})", process),
            Action::ReceiveRequest { process, from } => {
                write!(f, "receive_request({} <- {})", process, from)
            }
            Action::ReceiveAck { process, from } => write!(f, "receive_ack({} <- {})", process, from),
            Action::ReceiveRelease { process, from } => {
                write!(f, "receive_release({} <- {})", process, from)
            }
        }
    }
}
