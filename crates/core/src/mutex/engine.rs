// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Whole-system engine: every process state plus the channels between them

use super::action::Action;
use super::input::ProcessInput;
use crate::channel::Channels;
use crate::effect::{partition, Event};
use crate::error::MutexError;
use crate::id::{ProcessId, ProcessSet};
use crate::message::MessageKind;
use crate::process::ProcessState;
use std::collections::BTreeMap;

/// Drives the six guarded transitions over a closed set of processes
///
/// Actions are applied one at a time. Each either applies completely or
/// returns an error and leaves the engine unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MutexEngine {
    members: ProcessSet,
    processes: BTreeMap<ProcessId, ProcessState>,
    channels: Channels,
}

impl MutexEngine {
    pub fn new(members: ProcessSet) -> Self {
        let processes = members
            .iter()
            .map(|id| (id, ProcessState::new(id, members.clone())))
            .collect();
        let channels = Channels::new(&members);
        Self {
            members,
            processes,
            channels,
        }
    }

    pub fn members(&self) -> &ProcessSet {
        &self.members
    }

    pub fn process(&self, id: ProcessId) -> Option<&ProcessState> {
        self.processes.get(&id)
    }

    pub fn processes(&self) -> impl Iterator<Item = &ProcessState> {
        self.processes.values()
    }

    pub fn channels(&self) -> &Channels {
        &self.channels
    }

    /// Processes currently inside the critical section
    ///
    /// A read-only projection over per-process flags, used for verification.
    pub fn occupants(&self) -> Vec<ProcessId> {
        self.processes
            .values()
            .filter(|s| s.in_critical_section())
            .map(ProcessState::id)
            .collect()
    }

    /// Every action whose guard currently holds
    pub fn enabled_actions(&self) -> Vec<Action> {
        let mut actions = Vec::new();
        for state in self.processes.values() {
            let process = state.id();
            if state.in_critical_section() {
                actions.push(Action::Exit { process });
            } else if state.own_request().is_none() {
                actions.push(Action::Request { process });
            } else if state.can_enter() {
                actions.push(Action::Enter { process });
            }
            for from in self.members.peers_of(process) {
                if let Some(kind) = self.channels.head_kind(from, process) {
                    actions.push(Action::receive(process, from, kind));
                }
            }
        }
        actions
    }

    pub fn is_enabled(&self, action: &Action) -> bool {
        self.clone().apply(action).is_ok()
    }

    /// Apply one action, returning the events it emitted
    pub fn apply(&mut self, action: &Action) -> Result<Vec<Event>, MutexError> {
        let process = action.process();
        let state = self
            .processes
            .get(&process)
            .ok_or(MutexError::UnknownProcess(process))?;

        let mut channels = self.channels.clone();
        let input = match action {
            Action::Request { .. } => ProcessInput::Request,
            Action::Enter { .. } => ProcessInput::Enter,
            Action::Exit { .. } => ProcessInput::Exit,
            Action::ReceiveRequest { from, .. } => {
                Self::take_head(&mut channels, process, *from, MessageKind::Request)?
            }
            Action::ReceiveAck { from, .. } => {
                Self::take_head(&mut channels, process, *from, MessageKind::Ack)?
            }
            Action::ReceiveRelease { from, .. } => {
                Self::take_head(&mut channels, process, *from, MessageKind::Release)?
            }
        };

        let (next, effects) = state.transition(&input)?;
        let (sends, events) = partition(effects);
        for (to, message) in sends {
            channels.send(process, to, message)?;
        }

        tracing::trace!(%action, in_flight = channels.in_flight(), "applied");
        self.processes.insert(process, next);
        self.channels = channels;
        Ok(events)
    }

    /// Pop the head of `sender -> receiver` if it carries `expected`
    fn take_head(
        channels: &mut Channels,
        receiver: ProcessId,
        sender: ProcessId,
        expected: MessageKind,
    ) -> Result<ProcessInput, MutexError> {
        match channels.head_kind(sender, receiver) {
            Some(found) if found != expected => Err(MutexError::UnexpectedHead {
                from: sender,
                to: receiver,
                expected,
                found,
            }),
            _ => {
                let message = channels.receive(receiver, sender)?;
                Ok(ProcessInput::Deliver {
                    from: sender,
                    message,
                })
            }
        }
    }

    pub fn request(&mut self, process: ProcessId) -> Result<Vec<Event>, MutexError> {
        self.apply(&Action::Request { process })
    }

    pub fn enter(&mut self, process: ProcessId) -> Result<Vec<Event>, MutexError> {
        self.apply(&Action::Enter { process })
    }

    pub fn exit(&mut self, process: ProcessId) -> Result<Vec<Event>, MutexError> {
        self.apply(&Action::Exit { process })
    }

    pub fn receive_request(
        &mut self,
        process: ProcessId,
        from: ProcessId,
    ) -> Result<Vec<Event>, MutexError> {
        self.apply(&Action::ReceiveRequest { process, from })
    }

    pub fn receive_ack(
        &mut self,
        process: ProcessId,
        from: ProcessId,
    ) -> Result<Vec<Event>, MutexError> {
        self.apply(&Action::ReceiveAck { process, from })
    }

    pub fn receive_release(
        &mut self,
        process: ProcessId,
        from: ProcessId,
    ) -> Result<Vec<Event>, MutexError> {
        self.apply(&Action::ReceiveRelease { process, from })
    }

    /// Apply every enabled delivery until the channels drain
    ///
    /// Local actions are not taken. Returns the number of deliveries made.
    pub fn deliver_all(&mut self) -> Result<usize, MutexError> {
        let mut delivered = 0;
        loop {
            let next = self
                .enabled_actions()
                .into_iter()
                .find(|a| a.delivery().is_some());
            let Some(action) = next else {
                return Ok(delivered);
            };
            self.apply(&action)?;
            delivered += 1;
        }
    }
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
