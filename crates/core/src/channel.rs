// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! FIFO channels between every ordered pair of processes

use crate::id::{ProcessId, ProcessSet};
use crate::message::{Message, MessageKind};
use std::collections::{BTreeMap, VecDeque};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ChannelError {
    #[error("invalid channel: {0} cannot address itself")]
    InvalidChannel(ProcessId),
    #[error("unknown process: {0}")]
    UnknownProcess(ProcessId),
    #[error("channel {from} -> {to} is empty")]
    ChannelEmpty { from: ProcessId, to: ProcessId },
}

/// Undelivered messages, one queue per ordered pair `(sender, receiver)`
///
/// Queues are created for every pair up front and never removed. No queue
/// exists for `(p, p)`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Channels {
    queues: BTreeMap<(ProcessId, ProcessId), VecDeque<Message>>,
}

impl Channels {
    pub fn new(processes: &ProcessSet) -> Self {
        let queues = processes
            .ordered_pairs()
            .map(|pair| (pair, VecDeque::new()))
            .collect();
        Self { queues }
    }

    fn queue(&self, from: ProcessId, to: ProcessId) -> Result<&VecDeque<Message>, ChannelError> {
        if from == to {
            return Err(ChannelError::InvalidChannel(from));
        }
        self.queues
            .get(&(from, to))
            .ok_or_else(|| self.unknown_endpoint(from, to))
    }

    fn queue_mut(
        &mut self,
        from: ProcessId,
        to: ProcessId,
    ) -> Result<&mut VecDeque<Message>, ChannelError> {
        if from == to {
            return Err(ChannelError::InvalidChannel(from));
        }
        let unknown = self.unknown_endpoint(from, to);
        self.queues.get_mut(&(from, to)).ok_or(unknown)
    }

    fn unknown_endpoint(&self, from: ProcessId, to: ProcessId) -> ChannelError {
        let known = self.queues.keys().any(|(p, _)| *p == from);
        ChannelError::UnknownProcess(if known { to } else { from })
    }

    /// Append `message` to the tail of `Channel(from, to)`
    pub fn send(
        &mut self,
        from: ProcessId,
        to: ProcessId,
        message: Message,
    ) -> Result<(), ChannelError> {
        self.queue_mut(from, to)?.push_back(message);
        Ok(())
    }

    /// Tag of the oldest undelivered message on `Channel(from, to)`
    pub fn head_kind(&self, from: ProcessId, to: ProcessId) -> Option<MessageKind> {
        self.queue(from, to)
            .ok()
            .and_then(|q| q.front())
            .map(Message::kind)
    }

    /// Remove the head of `Channel(sender, receiver)` on behalf of `receiver`
    pub fn receive(
        &mut self,
        receiver: ProcessId,
        sender: ProcessId,
    ) -> Result<Message, ChannelError> {
        self.queue_mut(sender, receiver)?
            .pop_front()
            .ok_or(ChannelError::ChannelEmpty {
                from: sender,
                to: receiver,
            })
    }

    /// Undelivered messages on `Channel(from, to)`, oldest first
    pub fn pending(&self, from: ProcessId, to: ProcessId) -> impl Iterator<Item = &Message> {
        self.queue(from, to).ok().into_iter().flatten()
    }

    /// Number of undelivered messages of `kind` on `Channel(from, to)`
    pub fn pending_of_kind(&self, from: ProcessId, to: ProcessId, kind: MessageKind) -> usize {
        self.pending(from, to).filter(|m| m.kind() == kind).count()
    }

    /// Total undelivered messages across all channels
    pub fn in_flight(&self) -> usize {
        self.queues.values().map(VecDeque::len).sum()
    }

    pub fn is_quiescent(&self) -> bool {
        self.in_flight() == 0
    }

    /// Channels with at least one pending message, as `(from, to)` pairs
    pub fn non_empty(&self) -> impl Iterator<Item = (ProcessId, ProcessId)> + '_ {
        self.queues
            .iter()
            .filter(|(_, q)| !q.is_empty())
            .map(|(pair, _)| *pair)
    }
}

#[cfg(test)]
#[path = "channel_tests.rs"]
mod tests;
