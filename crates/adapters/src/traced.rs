// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Traced transport wrapper for consistent observability

use crate::transport::{Transport, TransportError};
use async_trait::async_trait;
use mx_core::{Envelope, Message, TransportCapabilities};
use tracing::Instrument;

/// Wrapper that adds tracing to any Transport
#[derive(Clone)]
pub struct TracedTransport<T> {
    inner: T,
}

impl<T> TracedTransport<T> {
    pub fn new(inner: T) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &T {
        &self.inner
    }
}

#[async_trait]
impl<T: Transport> Transport for TracedTransport<T> {
    fn capabilities(&self) -> TransportCapabilities {
        self.inner.capabilities()
    }

    async fn send(&self, envelope: Envelope) -> Result<(), TransportError> {
        let span = tracing::debug_span!(
            "transport.send",
            from = %envelope.from,
            to = %envelope.to,
            kind = %envelope.message.kind()
        );

        async move {
            if let Message::Request { timestamp } = envelope.message {
                tracing::trace!(%timestamp, "sending");
            } else {
                tracing::trace!("sending");
            }

            let result = self.inner.send(envelope).await;
            match &result {
                Ok(()) => tracing::debug!("sent"),
                Err(e) => tracing::error!(error = %e, "send failed"),
            }
            result
        }
        .instrument(span)
        .await
    }
}

#[cfg(test)]
#[path = "traced_tests.rs"]
mod tests;
