// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for protocol transitions

use crate::channel::ChannelError;
use crate::clock::Timestamp;
use crate::id::ProcessId;
use crate::message::MessageKind;
use thiserror::Error;

/// A transition was attempted while its precondition was false
///
/// Returned before any state is touched.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProtocolViolation {
    #[error("{process} is not idle: request {timestamp} is still outstanding")]
    NotIdle {
        process: ProcessId,
        timestamp: Timestamp,
    },
    #[error("{process} has no outstanding request")]
    NotRequesting { process: ProcessId },
    #[error("{process} is already in the critical section")]
    AlreadyInCriticalSection { process: ProcessId },
    #[error("{process} is missing acknowledgements from {missing:?}")]
    AcksIncomplete {
        process: ProcessId,
        missing: Vec<ProcessId>,
    },
    #[error("{process} is ordered behind {peer}'s request {peer_timestamp}")]
    Outranked {
        process: ProcessId,
        peer: ProcessId,
        peer_timestamp: Timestamp,
    },
    #[error("{process} is not in the critical section")]
    NotInCriticalSection { process: ProcessId },
    #[error("{process} received a message from non-peer {from}")]
    UnknownPeer { process: ProcessId, from: ProcessId },
}

/// Errors from applying an action to the system model
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MutexError {
    #[error("protocol violation: {0}")]
    Protocol(#[from] ProtocolViolation),
    #[error("channel error: {0}")]
    Channel(#[from] ChannelError),
    #[error("unknown process: {0}")]
    UnknownProcess(ProcessId),
    #[error("head of channel {from} -> {to} is {found}, expected {expected}")]
    UnexpectedHead {
        from: ProcessId,
        to: ProcessId,
        expected: MessageKind,
        found: MessageKind,
    },
}
