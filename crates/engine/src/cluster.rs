// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Cluster startup and shutdown

use crate::error::RuntimeError;
use crate::handle::MutexHandle;
use crate::node::Node;
use mx_adapters::{negotiate, Inbox, Transport};
use mx_core::{ClusterConfig, EventBus, ProcessId, ProcessState};
use std::collections::BTreeMap;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

const COMMAND_BUFFER: usize = 16;

/// A running set of processes sharing one transport
pub struct Cluster {
    handles: BTreeMap<ProcessId, MutexHandle>,
    tasks: Vec<(ProcessId, JoinHandle<Result<(), RuntimeError>>)>,
    shutdown: watch::Sender<bool>,
    bus: EventBus,
}

impl Cluster {
    /// Negotiate transport guarantees and spawn one node per process
    ///
    /// Must be called from within a tokio runtime. Fails without spawning
    /// anything if the transport lacks a guarantee listed in
    /// `config.transport` or an inbox is missing.
    pub fn start<T: Transport>(
        config: &ClusterConfig,
        transport: T,
        mut inboxes: BTreeMap<ProcessId, Inbox>,
        bus: EventBus,
    ) -> Result<Self, RuntimeError> {
        config.validate()?;
        negotiate(&transport, &config.transport).map_err(RuntimeError::TransportFailure)?;

        let mut owned = Vec::with_capacity(config.processes.len());
        for id in config.process_ids() {
            let inbox = inboxes.remove(&id).ok_or(RuntimeError::MissingInbox(id))?;
            owned.push((id, inbox));
        }

        let (shutdown, _) = watch::channel(false);
        let mut handles = BTreeMap::new();
        let mut tasks = Vec::with_capacity(owned.len());
        for (id, inbox) in owned {
            let (command_tx, command_rx) = mpsc::channel(COMMAND_BUFFER);
            let (occupancy_tx, occupancy_rx) = watch::channel(false);
            let node = Node::new(
                ProcessState::new(id, config.processes.clone()),
                transport.clone(),
                inbox,
                command_rx,
                shutdown.subscribe(),
                occupancy_tx,
                bus.clone(),
            );
            tasks.push((id, tokio::spawn(node.run())));
            handles.insert(
                id,
                MutexHandle::new(id, command_tx, occupancy_rx, config.request_timeout),
            );
        }

        tracing::info!(processes = %config.processes, "cluster started");
        Ok(Self {
            handles,
            tasks,
            shutdown,
            bus,
        })
    }

    pub fn handle(&self, id: ProcessId) -> Result<MutexHandle, RuntimeError> {
        self.handles
            .get(&id)
            .cloned()
            .ok_or(RuntimeError::UnknownProcess(id))
    }

    pub fn handles(&self) -> impl Iterator<Item = &MutexHandle> {
        self.handles.values()
    }

    pub fn bus(&self) -> &EventBus {
        &self.bus
    }

    /// Processes currently inside the critical section
    pub fn occupants(&self) -> Vec<ProcessId> {
        self.handles
            .values()
            .filter(|h| h.in_critical_section())
            .map(MutexHandle::process)
            .collect()
    }

    /// Stop every node and wait for it to finish
    ///
    /// Returns the first node failure, if any.
    pub async fn shutdown(self) -> Result<(), RuntimeError> {
        self.shutdown.send_replace(true);

        let mut first_error = None;
        for (process, task) in self.tasks {
            let outcome = match task.await {
                Ok(result) => result,
                Err(e) => Err(RuntimeError::Join {
                    process,
                    message: e.to_string(),
                }),
            };
            if let Err(e) = outcome {
                first_error.get_or_insert(e);
            }
        }
        tracing::info!("cluster stopped");
        first_error.map_or(Ok(()), Err)
    }
}

#[cfg(test)]
#[path = "cluster_tests.rs"]
mod tests;
