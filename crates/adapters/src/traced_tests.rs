// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::transport::FakeTransport;
use mx_core::{ProcessId, Timestamp};
use std::sync::{Arc, Mutex};
use tracing_subscriber::fmt::MakeWriter;

/// A writer that captures log output for testing
#[derive(Clone, Default)]
struct CapturedLogs {
    logs: Arc<Mutex<Vec<u8>>>,
}

impl CapturedLogs {
    fn contents(&self) -> String {
        let logs = self.logs.lock().unwrap();
        String::from_utf8_lossy(&logs).to_string()
    }
}

impl std::io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.logs.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for CapturedLogs {
    type Writer = CapturedLogs;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// Run a test with captured tracing output
fn with_tracing<F, Fut>(f: F) -> (String, Fut::Output)
where
    F: FnOnce() -> Fut,
    Fut: std::future::Future,
{
    let logs = CapturedLogs::default();

    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_writer(logs.clone())
        .with_ansi(false)
        .without_time()
        .finish();

    let result = tracing::subscriber::with_default(subscriber, || {
        tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap()
            .block_on(f())
    });

    (logs.contents(), result)
}

#[test]
fn traced_send_logs_span_and_outcome() {
    let fake = FakeTransport::new();
    let traced = TracedTransport::new(fake.clone());

    let (logs, result) = with_tracing(|| async move {
        traced
            .send(Envelope::new(
                ProcessId(1),
                ProcessId(2),
                Message::Request {
                    timestamp: Timestamp(4),
                },
            ))
            .await
    });

    assert!(result.is_ok());
    assert!(logs.contains("transport.send"), "logs:\n{}", logs);
    assert!(logs.contains("from=p1"), "logs:\n{}", logs);
    assert!(logs.contains("kind=request"), "logs:\n{}", logs);
    assert!(logs.contains("timestamp=4"), "logs:\n{}", logs);
    assert!(logs.contains("sent"), "logs:\n{}", logs);
    assert_eq!(fake.sent().len(), 1);
}

#[test]
fn traced_send_logs_failures() {
    let fake = FakeTransport::new();
    fake.disconnect(ProcessId(2));
    let traced = TracedTransport::new(fake);

    let (logs, result) = with_tracing(|| async move {
        traced
            .send(Envelope::new(ProcessId(1), ProcessId(2), Message::Ack))
            .await
    });

    assert!(result.is_err());
    assert!(logs.contains("send failed"), "logs:\n{}", logs);
}

#[test]
fn traced_transport_forwards_capabilities() {
    let caps = TransportCapabilities {
        reliable: true,
        fifo: false,
        exactly_once: true,
    };
    let traced = TracedTransport::new(FakeTransport::new().with_capabilities(caps));
    assert_eq!(traced.capabilities(), caps);
}
