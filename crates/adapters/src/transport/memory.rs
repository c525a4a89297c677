// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! In-process transport over tokio channels
//!
//! Each process owns one unbounded inbox. Frames from a given sender enter
//! that inbox in send order, so per-pair FIFO holds as long as each process
//! sends from a single task.

use super::{codec, Transport, TransportError};
use async_trait::async_trait;
use mx_core::{Envelope, ProcessId, ProcessSet, TransportCapabilities};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tokio::sync::mpsc;

type Frame = Vec<u8>;

/// Full mesh between a fixed set of processes
#[derive(Clone)]
pub struct MemoryTransport {
    routes: Arc<HashMap<ProcessId, mpsc::UnboundedSender<Frame>>>,
}

impl MemoryTransport {
    /// Build the mesh, returning the shared sender and one inbox per process
    pub fn mesh(members: &ProcessSet) -> (Self, BTreeMap<ProcessId, Inbox>) {
        let mut routes = HashMap::new();
        let mut inboxes = BTreeMap::new();
        for id in members.iter() {
            let (tx, rx) = mpsc::unbounded_channel();
            routes.insert(id, tx);
            inboxes.insert(id, Inbox { owner: id, rx });
        }
        let transport = Self {
            routes: Arc::new(routes),
        };
        (transport, inboxes)
    }
}

#[async_trait]
impl Transport for MemoryTransport {
    fn capabilities(&self) -> TransportCapabilities {
        TransportCapabilities::REQUIRED
    }

    async fn send(&self, envelope: Envelope) -> Result<(), TransportError> {
        if envelope.from == envelope.to {
            return Err(TransportError::SelfAddressed(envelope.from));
        }
        let route = self
            .routes
            .get(&envelope.to)
            .ok_or(TransportError::UnknownDestination(envelope.to))?;
        let frame = codec::encode(&envelope)?;
        route
            .send(frame)
            .map_err(|_| TransportError::Closed(envelope.to))
    }
}

/// Receiving end for one process
pub struct Inbox {
    owner: ProcessId,
    rx: mpsc::UnboundedReceiver<Frame>,
}

impl Inbox {
    pub fn owner(&self) -> ProcessId {
        self.owner
    }

    /// Next envelope addressed to the owner; `None` once every sender is gone
    pub async fn recv(&mut self) -> Option<Result<Envelope, TransportError>> {
        let frame = self.rx.recv().await?;
        Some(codec::decode(&frame))
    }

    /// Next envelope if one is already queued
    pub fn try_recv(&mut self) -> Option<Result<Envelope, TransportError>> {
        let frame = self.rx.try_recv().ok()?;
        Some(codec::decode(&frame))
    }
}

#[cfg(test)]
#[path = "memory_tests.rs"]
mod tests;
