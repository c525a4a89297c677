// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-process task
//!
//! A node owns one [`ProcessState`] and serializes every step: application
//! commands and inbound envelopes are taken one at a time, and after each
//! step the node enters the critical section if the guard holds.

use crate::error::RuntimeError;
use mx_adapters::{Inbox, Transport};
use mx_core::effect::partition;
use mx_core::{Effect, Envelope, EventBus, ProcessInput, ProcessState, Timestamp};
use tokio::sync::{mpsc, oneshot, watch};

/// Reply slot for a pending entry request
pub(crate) type EntryReply = oneshot::Sender<Result<Timestamp, RuntimeError>>;

/// Application commands accepted by a node
pub(crate) enum Command {
    Request(EntryReply),
    Release(oneshot::Sender<Result<(), RuntimeError>>),
}

pub(crate) struct Node<T> {
    state: ProcessState,
    transport: T,
    inbox: Inbox,
    commands: mpsc::Receiver<Command>,
    shutdown: watch::Receiver<bool>,
    occupancy: watch::Sender<bool>,
    bus: EventBus,
    waiter: Option<EntryReply>,
}

impl<T: Transport> Node<T> {
    pub(crate) fn new(
        state: ProcessState,
        transport: T,
        inbox: Inbox,
        commands: mpsc::Receiver<Command>,
        shutdown: watch::Receiver<bool>,
        occupancy: watch::Sender<bool>,
        bus: EventBus,
    ) -> Self {
        Self {
            state,
            transport,
            inbox,
            commands,
            shutdown,
            occupancy,
            bus,
            waiter: None,
        }
    }

    /// Drive the node until shutdown or a fatal error
    ///
    /// Rejected application commands are answered and do not stop the node.
    /// Transport failures and malformed deliveries do.
    pub(crate) async fn run(mut self) -> Result<(), RuntimeError> {
        let process = self.state.id();
        tracing::debug!(%process, "node started");

        loop {
            let step = tokio::select! {
                biased;
                _ = self.shutdown.changed() => break,
                command = self.commands.recv() => match command {
                    Some(command) => self.handle_command(command).await,
                    None => break,
                },
                frame = self.inbox.recv() => match frame {
                    Some(Ok(envelope)) => self.handle_envelope(envelope).await,
                    Some(Err(e)) => Err(e.into()),
                    None => break,
                },
            };

            let result = match step {
                Ok(()) => self.try_enter().await,
                Err(e) => Err(e),
            };
            if let Err(e) = result {
                // Peers stop in arbitrary order during shutdown
                if *self.shutdown.borrow() {
                    break;
                }
                tracing::error!(%process, error = %e, "node failed");
                return Err(e);
            }
        }

        tracing::debug!(%process, "node stopped");
        Ok(())
    }

    async fn handle_command(&mut self, command: Command) -> Result<(), RuntimeError> {
        let process = self.state.id();
        match command {
            Command::Request(reply) => match self.state.transition(&ProcessInput::Request) {
                Ok((next, effects)) => {
                    self.commit(next, effects).await?;
                    self.waiter = Some(reply);
                }
                Err(violation) => {
                    tracing::warn!(%process, %violation, "request rejected");
                    let _ = reply.send(Err(violation.into()));
                }
            },
            Command::Release(reply) => match self.state.transition(&ProcessInput::Exit) {
                Ok((next, effects)) => {
                    self.commit(next, effects).await?;
                    let _ = reply.send(Ok(()));
                }
                Err(violation) => {
                    tracing::warn!(%process, %violation, "release rejected");
                    let _ = reply.send(Err(violation.into()));
                }
            },
        }
        Ok(())
    }

    async fn handle_envelope(&mut self, envelope: Envelope) -> Result<(), RuntimeError> {
        tracing::trace!(
            process = %self.state.id(),
            peer = %envelope.from,
            kind = %envelope.message.kind(),
            "received"
        );
        let input = ProcessInput::Deliver {
            from: envelope.from,
            message: envelope.message,
        };
        let (next, effects) = self.state.transition(&input)?;
        self.commit(next, effects).await
    }

    async fn try_enter(&mut self) -> Result<(), RuntimeError> {
        if !self.state.can_enter() {
            return Ok(());
        }
        let (next, effects) = self.state.transition(&ProcessInput::Enter)?;
        self.commit(next, effects).await?;

        let timestamp = self.state.own_request().unwrap_or(Timestamp::ZERO);
        if let Some(reply) = self.waiter.take() {
            if reply.send(Ok(timestamp)).is_err() {
                tracing::warn!(
                    process = %self.state.id(),
                    %timestamp,
                    "entered after the requester stopped waiting; release_entry still required"
                );
            }
        }
        Ok(())
    }

    /// Install the new state, then execute its effects
    async fn commit(
        &mut self,
        next: ProcessState,
        effects: Vec<Effect>,
    ) -> Result<(), RuntimeError> {
        self.state = next;
        let inside = self.state.in_critical_section();
        self.occupancy.send_if_modified(|current| {
            let changed = *current != inside;
            *current = inside;
            changed
        });

        // Observers must see an exit before the entry it unblocks
        let from = self.state.id();
        let (sends, events) = partition(effects);
        for event in &events {
            tracing::info!(process = %from, event = %event.name(), "emitted");
            self.bus.publish(event);
        }
        for (to, message) in sends {
            self.transport.send(Envelope::new(from, to, message)).await?;
        }
        Ok(())
    }
}
