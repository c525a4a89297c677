// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Wire messages exchanged between processes

use crate::clock::Timestamp;
use crate::id::ProcessId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A protocol message
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Message {
    /// Claim on the critical section, stamped with the sender's clock
    Request { timestamp: Timestamp },
    /// Acknowledges the receiver's outstanding request
    Ack,
    /// Sender has left the critical section
    Release,
}

impl Message {
    pub fn kind(&self) -> MessageKind {
        match self {
            Message::Request { .. } => MessageKind::Request,
            Message::Ack => MessageKind::Ack,
            Message::Release => MessageKind::Release,
        }
    }
}

/// Tag of a message, without payload
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    Request,
    Ack,
    Release,
}

impl MessageKind {
    pub const ALL: [MessageKind; 3] = [MessageKind::Request, MessageKind::Ack, MessageKind::Release];
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageKind::Request => write!(f, "request"),
            MessageKind::Ack => write!(f, "ack"),
            MessageKind::Release => write!(f, "release"),
        }
    }
}

/// A message in flight with its endpoints
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope {
    pub from: ProcessId,
    pub to: ProcessId,
    pub message: Message,
}

impl Envelope {
    pub fn new(from: ProcessId, to: ProcessId, message: Message) -> Self {
        Self { from, to, message }
    }
}
