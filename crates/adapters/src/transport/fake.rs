// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake transport for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{Transport, TransportError};
use async_trait::async_trait;
use mx_core::{Envelope, ProcessId, TransportCapabilities};
use std::collections::HashSet;
use std::sync::{Arc, Mutex};

/// Records every envelope instead of delivering it
#[derive(Clone)]
pub struct FakeTransport {
    capabilities: TransportCapabilities,
    sent: Arc<Mutex<Vec<Envelope>>>,
    unreachable: Arc<Mutex<HashSet<ProcessId>>>,
}

impl Default for FakeTransport {
    fn default() -> Self {
        Self {
            capabilities: TransportCapabilities::REQUIRED,
            sent: Arc::default(),
            unreachable: Arc::default(),
        }
    }
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advertise different guarantees, e.g. to exercise negotiation failures
    pub fn with_capabilities(mut self, capabilities: TransportCapabilities) -> Self {
        self.capabilities = capabilities;
        self
    }

    /// Make sends to `id` fail with `Closed`
    pub fn disconnect(&self, id: ProcessId) {
        self.unreachable
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(id);
    }

    /// Get all recorded envelopes
    pub fn sent(&self) -> Vec<Envelope> {
        self.sent.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Recorded envelopes addressed to `to`
    pub fn sent_to(&self, to: ProcessId) -> Vec<Envelope> {
        self.sent().into_iter().filter(|e| e.to == to).collect()
    }

    pub fn clear(&self) {
        self.sent.lock().unwrap_or_else(|e| e.into_inner()).clear();
    }
}

#[async_trait]
impl Transport for FakeTransport {
    fn capabilities(&self) -> TransportCapabilities {
        self.capabilities
    }

    async fn send(&self, envelope: Envelope) -> Result<(), TransportError> {
        if envelope.from == envelope.to {
            return Err(TransportError::SelfAddressed(envelope.from));
        }
        let unreachable = self
            .unreachable
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .contains(&envelope.to);
        if unreachable {
            return Err(TransportError::Closed(envelope.to));
        }
        self.sent
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(envelope);
        Ok(())
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
