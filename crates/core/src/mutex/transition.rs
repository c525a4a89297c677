// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Guarded per-process transitions
//!
//! Each transition checks its guard against the current state and either
//! returns the successor state plus effects, or a [`ProtocolViolation`]
//! leaving the caller's state untouched.

use super::input::ProcessInput;
use super::order::{beats, Claim};
use crate::clock::Timestamp;
use crate::effect::{Effect, Event};
use crate::error::ProtocolViolation;
use crate::id::ProcessId;
use crate::message::Message;
use crate::process::ProcessState;

impl ProcessState {
    /// Own claim, if a request is outstanding
    pub fn claim(&self) -> Option<Claim> {
        self.own_request().map(|t| Claim::new(t, self.id))
    }

    /// First peer whose recorded request is ordered before ours
    ///
    /// A peer with no recorded request (stamp zero) never outranks us.
    pub fn outranked_by(&self) -> Option<(ProcessId, Timestamp)> {
        let mine = self.claim()?;
        self.members
            .peers_of(self.id)
            .map(|q| (q, self.request_of(q)))
            .filter(|(_, t)| !t.is_zero())
            .find(|(q, t)| !beats(mine, Claim::new(*t, *q)))
    }

    /// Guard for [`ProcessInput::Enter`]
    pub fn check_enter(&self) -> Result<(), ProtocolViolation> {
        let process = self.id;
        if self.in_critical_section {
            return Err(ProtocolViolation::AlreadyInCriticalSection { process });
        }
        if self.own_request().is_none() {
            return Err(ProtocolViolation::NotRequesting { process });
        }
        let missing = self.missing_acks();
        if !missing.is_empty() {
            return Err(ProtocolViolation::AcksIncomplete { process, missing });
        }
        if let Some((peer, peer_timestamp)) = self.outranked_by() {
            return Err(ProtocolViolation::Outranked {
                process,
                peer,
                peer_timestamp,
            });
        }
        Ok(())
    }

    pub fn can_enter(&self) -> bool {
        self.check_enter().is_ok()
    }

    /// Pure state transition function
    pub fn transition(
        &self,
        input: &ProcessInput,
    ) -> Result<(ProcessState, Vec<Effect>), ProtocolViolation> {
        match *input {
            ProcessInput::Request => self.request(),
            ProcessInput::Enter => self.enter(),
            ProcessInput::Exit => self.exit(),
            ProcessInput::Deliver { from, message } => self.deliver(from, message),
        }
    }

    fn request(&self) -> Result<(ProcessState, Vec<Effect>), ProtocolViolation> {
        if self.in_critical_section {
            return Err(ProtocolViolation::AlreadyInCriticalSection { process: self.id });
        }
        if let Some(timestamp) = self.own_request() {
            return Err(ProtocolViolation::NotIdle {
                process: self.id,
                timestamp,
            });
        }

        let mut next = self.clone();
        let timestamp = next.clock.tick();
        next.requests.insert(self.id, timestamp);
        next.acks.clear();
        next.acks.insert(self.id);

        let mut effects: Vec<Effect> = self
            .members
            .peers_of(self.id)
            .map(|to| Effect::Send {
                to,
                message: Message::Request { timestamp },
            })
            .collect();
        effects.push(Effect::Emit(Event::Requested {
            process: self.id,
            timestamp,
        }));

        Ok((next, effects))
    }

    fn enter(&self) -> Result<(ProcessState, Vec<Effect>), ProtocolViolation> {
        self.check_enter()?;

        let mut next = self.clone();
        next.in_critical_section = true;
        let effects = vec![Effect::Emit(Event::Entered {
            process: self.id,
            timestamp: self.request_of(self.id),
        })];

        Ok((next, effects))
    }

    fn exit(&self) -> Result<(ProcessState, Vec<Effect>), ProtocolViolation> {
        if !self.in_critical_section {
            return Err(ProtocolViolation::NotInCriticalSection { process: self.id });
        }

        let timestamp = self.request_of(self.id);
        let mut next = self.clone();
        next.in_critical_section = false;
        next.requests.insert(self.id, Timestamp::ZERO);
        next.acks.clear();

        let mut effects: Vec<Effect> = self
            .members
            .peers_of(self.id)
            .map(|to| Effect::Send {
                to,
                message: Message::Release,
            })
            .collect();
        effects.push(Effect::Emit(Event::Exited {
            process: self.id,
            timestamp,
        }));

        Ok((next, effects))
    }

    fn deliver(
        &self,
        from: ProcessId,
        message: Message,
    ) -> Result<(ProcessState, Vec<Effect>), ProtocolViolation> {
        if from == self.id || !self.members.contains(from) {
            return Err(ProtocolViolation::UnknownPeer {
                process: self.id,
                from,
            });
        }

        let mut next = self.clone();
        let effects = match message {
            // Acknowledge unconditionally; ordering is settled at Enter
            Message::Request { timestamp } => {
                next.requests.insert(from, timestamp);
                next.clock.observe(timestamp);
                vec![
                    Effect::Send {
                        to: from,
                        message: Message::Ack,
                    },
                    Effect::Emit(Event::RequestRecorded {
                        process: self.id,
                        from,
                        timestamp,
                    }),
                ]
            }
            Message::Ack => {
                next.acks.insert(from);
                vec![Effect::Emit(Event::AckReceived {
                    process: self.id,
                    from,
                })]
            }
            Message::Release => {
                next.requests.insert(from, Timestamp::ZERO);
                vec![Effect::Emit(Event::ReleaseReceived {
                    process: self.id,
                    from,
                })]
            }
        };

        Ok((next, effects))
    }
}

#[cfg(test)]
#[path = "transition_tests.rs"]
mod tests;
