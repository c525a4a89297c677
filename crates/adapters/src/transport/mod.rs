// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Message transports

pub mod codec;
mod memory;

pub use memory::{Inbox, MemoryTransport};

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::FakeTransport;

use async_trait::async_trait;
use mx_core::{Envelope, ProcessId, TransportCapabilities};
use thiserror::Error;

/// Errors from transport operations
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("transport lacks required guarantees: {}", missing.join(", "))]
    Unsupported { missing: Vec<&'static str> },
    #[error("no route to {0}")]
    UnknownDestination(ProcessId),
    #[error("{0} cannot send to itself")]
    SelfAddressed(ProcessId),
    #[error("inbox of {0} is closed")]
    Closed(ProcessId),
    #[error("malformed frame: {0}")]
    Codec(#[from] serde_json::Error),
}

/// Carries envelopes from one process to another
///
/// Implementations must deliver every envelope sent from `p` to `q` exactly
/// once and in send order, and must advertise that through
/// [`Transport::capabilities`].
#[async_trait]
pub trait Transport: Clone + Send + Sync + 'static {
    /// Delivery guarantees this transport provides
    fn capabilities(&self) -> TransportCapabilities;

    /// Hand an envelope to the transport for delivery to `envelope.to`
    async fn send(&self, envelope: Envelope) -> Result<(), TransportError>;
}

/// Reject a transport that does not offer the required guarantees
///
/// The protocol has no per-message recovery, so this is checked once at
/// startup and treated as fatal.
pub fn negotiate(
    transport: &impl Transport,
    required: &TransportCapabilities,
) -> Result<(), TransportError> {
    let missing = transport.capabilities().missing(required);
    if missing.is_empty() {
        Ok(())
    } else {
        Err(TransportError::Unsupported { missing })
    }
}
