// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use mx_adapters::{FakeTransport, MemoryTransport, TracedTransport, TransportError};
use mx_core::{Event, ProtocolViolation, Subscription, Timestamp, TransportCapabilities};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

fn config(count: u32) -> ClusterConfig {
    ClusterConfig::numbered(count)
        .unwrap()
        .with_request_timeout(Duration::from_secs(5))
}

fn start_mesh(config: &ClusterConfig) -> (Cluster, EventBus) {
    let (mesh, inboxes) = MemoryTransport::mesh(&config.processes);
    let bus = EventBus::new();
    let cluster = Cluster::start(config, TracedTransport::new(mesh), inboxes, bus.clone()).unwrap();
    (cluster, bus)
}

#[tokio::test]
async fn single_process_enters_without_traffic() {
    let config = config(1);
    let (mesh, inboxes) = MemoryTransport::mesh(&config.processes);
    let fake = FakeTransport::new();
    let cluster = Cluster::start(&config, fake.clone(), inboxes, EventBus::new()).unwrap();
    let handle = cluster.handle(ProcessId(1)).unwrap();

    assert_eq!(handle.request_entry().await.unwrap(), Timestamp(1));
    assert!(handle.in_critical_section());
    assert_eq!(cluster.occupants(), vec![ProcessId(1)]);

    handle.release_entry().await.unwrap();
    assert!(!handle.in_critical_section());
    assert!(cluster.occupants().is_empty());
    assert!(fake.sent().is_empty());

    cluster.shutdown().await.unwrap();
    drop(mesh);
}

#[tokio::test]
async fn release_while_idle_is_rejected_and_node_survives() {
    let config = config(1);
    let (mesh, inboxes) = MemoryTransport::mesh(&config.processes);
    let cluster = Cluster::start(&config, mesh, inboxes, EventBus::new()).unwrap();
    let handle = cluster.handle(ProcessId(1)).unwrap();

    let err = handle.release_entry().await.unwrap_err();
    assert!(matches!(
        err,
        RuntimeError::Protocol(ProtocolViolation::NotInCriticalSection { process }) if process == ProcessId(1)
    ));

    assert_eq!(handle.request_entry().await.unwrap(), Timestamp(1));
    handle.release_entry().await.unwrap();
    cluster.shutdown().await.unwrap();
}

#[tokio::test]
async fn second_request_while_waiting_is_rejected() {
    let config = config(2);
    let (mesh, inboxes) = MemoryTransport::mesh(&config.processes);
    let fake = FakeTransport::new();
    let cluster = Cluster::start(&config, fake.clone(), inboxes, EventBus::new()).unwrap();
    let handle = cluster.handle(ProcessId(1)).unwrap();

    // No acks ever arrive through the fake, so the first request stays pending
    let waiting = tokio::spawn({
        let handle = handle.clone();
        async move { handle.request_entry().await }
    });
    tokio::task::yield_now().await;

    let err = handle.request_entry().await.unwrap_err();
    assert!(matches!(
        err,
        RuntimeError::Protocol(ProtocolViolation::NotIdle { .. })
    ));
    assert_eq!(fake.sent_to(ProcessId(2)).len(), 1);

    waiting.abort();
    cluster.shutdown().await.unwrap();
    drop(mesh);
}

#[tokio::test]
async fn request_times_out_without_acks() {
    let config = config(2).with_request_timeout(Duration::from_millis(20));
    let (mesh, inboxes) = MemoryTransport::mesh(&config.processes);
    let cluster = Cluster::start(&config, FakeTransport::new(), inboxes, EventBus::new()).unwrap();

    let err = cluster
        .handle(ProcessId(2))
        .unwrap()
        .request_entry()
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        RuntimeError::Timeout { process, .. } if process == ProcessId(2)
    ));

    cluster.shutdown().await.unwrap();
    drop(mesh);
}

#[tokio::test]
async fn weak_transport_is_rejected_at_startup() {
    let config = config(2);
    let (_mesh, inboxes) = MemoryTransport::mesh(&config.processes);
    let fake = FakeTransport::new().with_capabilities(TransportCapabilities {
        reliable: true,
        fifo: false,
        exactly_once: true,
    });

    let err = Cluster::start(&config, fake, inboxes, EventBus::new())
        .err()
        .unwrap();
    assert!(matches!(
        &err,
        RuntimeError::TransportFailure(TransportError::Unsupported { missing }) if missing == &vec!["fifo"]
    ));
    assert!(err.to_string().contains("fifo"));
}

#[tokio::test]
async fn missing_inbox_is_rejected_at_startup() {
    let config = config(2);
    let (mesh, mut inboxes) = MemoryTransport::mesh(&config.processes);
    inboxes.remove(&ProcessId(2));

    let err = Cluster::start(&config, mesh, inboxes, EventBus::new())
        .err()
        .unwrap();
    assert!(matches!(err, RuntimeError::MissingInbox(id) if id == ProcessId(2)));
}

#[tokio::test]
async fn unknown_process_has_no_handle() {
    let (cluster, _) = start_mesh(&config(2));
    assert!(matches!(
        cluster.handle(ProcessId(9)),
        Err(RuntimeError::UnknownProcess(_))
    ));
    cluster.shutdown().await.unwrap();
}

#[tokio::test]
async fn transport_failure_stops_the_node() {
    let config = config(2);
    let (mesh, inboxes) = MemoryTransport::mesh(&config.processes);
    let fake = FakeTransport::new();
    fake.disconnect(ProcessId(2));
    let cluster = Cluster::start(&config, fake, inboxes, EventBus::new()).unwrap();

    let err = cluster
        .handle(ProcessId(1))
        .unwrap()
        .request_entry()
        .await
        .unwrap_err();
    assert!(matches!(err, RuntimeError::Stopped(id) if id == ProcessId(1)));

    let err = cluster.shutdown().await.unwrap_err();
    assert!(matches!(
        err,
        RuntimeError::Transport(TransportError::Closed(_))
    ));
    drop(mesh);
}

#[tokio::test]
async fn handles_fail_after_shutdown() {
    let (cluster, _) = start_mesh(&config(2));
    let handle = cluster.handle(ProcessId(1)).unwrap();
    cluster.shutdown().await.unwrap();

    assert!(matches!(
        handle.request_entry().await,
        Err(RuntimeError::Stopped(_))
    ));
}

#[tokio::test]
async fn waiting_peer_enters_after_release() {
    let (cluster, bus) = start_mesh(&config(2));
    let mut entered = bus.subscribe(Subscription::new("test", &["mutex:entered"]));
    let first = cluster.handle(ProcessId(1)).unwrap();
    let second = cluster.handle(ProcessId(2)).unwrap();

    first.request_entry().await.unwrap();
    let waiting = tokio::spawn(async move { second.request_entry().await });

    // p2 cannot enter while p1 holds the section
    tokio::time::sleep(Duration::from_millis(20)).await;
    assert_eq!(cluster.occupants(), vec![ProcessId(1)]);

    first.release_entry().await.unwrap();
    waiting.await.unwrap().unwrap();
    assert_eq!(cluster.occupants(), vec![ProcessId(2)]);

    let order: Vec<ProcessId> = [entered.recv().await, entered.recv().await]
        .into_iter()
        .flatten()
        .map(|e| e.process())
        .collect();
    assert_eq!(order, vec![ProcessId(1), ProcessId(2)]);

    cluster.handle(ProcessId(2)).unwrap().release_entry().await.unwrap();
    cluster.shutdown().await.unwrap();
}

#[tokio::test]
async fn timed_out_requester_still_enters_and_must_release() {
    let (cluster, bus) = start_mesh(&config(2).with_request_timeout(Duration::from_millis(200)));
    let mut entered = bus.subscribe(Subscription::new("test", &["mutex:entered"]));
    let first = cluster.handle(ProcessId(1)).unwrap();
    let second = cluster.handle(ProcessId(2)).unwrap();

    first.request_entry().await.unwrap();
    let err = second.request_entry().await.unwrap_err();
    assert!(matches!(
        err,
        RuntimeError::Timeout { process, .. } if process == ProcessId(2)
    ));
    assert!(!second.in_critical_section());

    first.release_entry().await.unwrap();
    let order: Vec<ProcessId> = [entered.recv().await, entered.recv().await]
        .into_iter()
        .flatten()
        .map(|e| e.process())
        .collect();
    assert_eq!(order, vec![ProcessId(1), ProcessId(2)]);

    // the abandoned request was granted and holds the section until released
    assert_eq!(cluster.occupants(), vec![ProcessId(2)]);
    assert!(second.in_critical_section());
    second.release_entry().await.unwrap();
    assert!(cluster.occupants().is_empty());

    cluster.shutdown().await.unwrap();
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn contending_processes_never_overlap() {
    const ROUNDS: usize = 5;
    let (cluster, bus) = start_mesh(&config(4));
    let mut log = bus.subscribe(Subscription::new("log", &["mutex:entered", "mutex:exited"]));
    let inside = Arc::new(AtomicUsize::new(0));

    let mut workers = Vec::new();
    for handle in cluster.handles().cloned() {
        let inside = Arc::clone(&inside);
        workers.push(tokio::spawn(async move {
            for _ in 0..ROUNDS {
                handle.request_entry().await.unwrap();
                assert_eq!(inside.fetch_add(1, Ordering::SeqCst), 0);
                tokio::time::sleep(Duration::from_millis(1)).await;
                inside.fetch_sub(1, Ordering::SeqCst);
                handle.release_entry().await.unwrap();
            }
        }));
    }
    for worker in workers {
        worker.await.unwrap();
    }
    cluster.shutdown().await.unwrap();

    // Entries and exits strictly alternate in the event log
    let mut holder = None;
    let mut entries = 0;
    while let Ok(event) = log.try_recv() {
        match event {
            Event::Entered { process, .. } => {
                assert_eq!(holder, None);
                holder = Some(process);
                entries += 1;
            }
            Event::Exited { process, .. } => {
                assert_eq!(holder, Some(process));
                holder = None;
            }
            other => panic!("unexpected event {other:?}"),
        }
    }
    assert_eq!(entries, 4 * ROUNDS);
}
