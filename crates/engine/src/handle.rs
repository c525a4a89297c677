// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Application-facing handle to one process

use crate::error::RuntimeError;
use crate::node::Command;
use mx_core::{ProcessId, Timestamp};
use std::time::Duration;
use tokio::sync::{mpsc, oneshot, watch};

/// Requests and releases the critical section on behalf of one process
///
/// Cloning yields another handle to the same process.
#[derive(Clone)]
pub struct MutexHandle {
    process: ProcessId,
    commands: mpsc::Sender<Command>,
    occupancy: watch::Receiver<bool>,
    request_timeout: Duration,
}

impl MutexHandle {
    pub(crate) fn new(
        process: ProcessId,
        commands: mpsc::Sender<Command>,
        occupancy: watch::Receiver<bool>,
        request_timeout: Duration,
    ) -> Self {
        Self {
            process,
            commands,
            occupancy,
            request_timeout,
        }
    }

    pub fn process(&self) -> ProcessId {
        self.process
    }

    /// Whether the process is inside the critical section right now
    pub fn in_critical_section(&self) -> bool {
        *self.occupancy.borrow()
    }

    /// Request the critical section and wait until this process has entered
    ///
    /// Resolves with the timestamp of the granted request. A request is never
    /// withdrawn: after [`RuntimeError::Timeout`] the process still enters once
    /// the guard holds, and the caller must call [`release_entry`] to leave.
    /// Until then every peer stays locked out.
    ///
    /// [`release_entry`]: MutexHandle::release_entry
    pub async fn request_entry(&self) -> Result<Timestamp, RuntimeError> {
        let (reply, entered) = oneshot::channel();
        self.send(Command::Request(reply)).await?;
        match tokio::time::timeout(self.request_timeout, entered).await {
            Ok(Ok(result)) => result,
            Ok(Err(_)) => Err(RuntimeError::Stopped(self.process)),
            Err(_) => Err(RuntimeError::Timeout {
                process: self.process,
                after: self.request_timeout,
            }),
        }
    }

    /// Leave the critical section
    pub async fn release_entry(&self) -> Result<(), RuntimeError> {
        let (reply, released) = oneshot::channel();
        self.send(Command::Release(reply)).await?;
        released
            .await
            .map_err(|_| RuntimeError::Stopped(self.process))?
    }

    async fn send(&self, command: Command) -> Result<(), RuntimeError> {
        self.commands
            .send(command)
            .await
            .map_err(|_| RuntimeError::Stopped(self.process))
    }
}
