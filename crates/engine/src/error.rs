// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for the engine runtime

use mx_adapters::TransportError;
use mx_core::{ConfigError, ProcessId, ProtocolViolation};
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur in the runtime
#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("transport rejected: {0}")]
    TransportFailure(#[source] TransportError),
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),
    #[error(transparent)]
    Protocol(#[from] ProtocolViolation),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("no inbox for {0}")]
    MissingInbox(ProcessId),
    #[error("{0} is not a cluster member")]
    UnknownProcess(ProcessId),
    #[error("{0} has stopped")]
    Stopped(ProcessId),
    #[error("{process} did not enter within {after:?}")]
    Timeout { process: ProcessId, after: Duration },
    #[error("task for {process} failed: {message}")]
    Join { process: ProcessId, message: String },
}

