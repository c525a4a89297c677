// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use crate::id::ProcessId;
use crate::message::Message;

/// Inputs that drive a single process's transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessInput {
    /// Application asks for the critical section
    Request,
    /// Take the critical section once acknowledged by everyone and first in order
    Enter,
    /// Application leaves the critical section
    Exit,
    /// A message arrived from a peer
    Deliver { from: ProcessId, message: Message },
}
