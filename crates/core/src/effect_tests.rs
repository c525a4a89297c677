// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn partition_keeps_send_order() {
    let effects = vec![
        Effect::Send {
            to: ProcessId(2),
            message: Message::Request {
                timestamp: Timestamp(1),
            },
        },
        Effect::Emit(Event::Requested {
            process: ProcessId(1),
            timestamp: Timestamp(1),
        }),
        Effect::Send {
            to: ProcessId(3),
            message: Message::Request {
                timestamp: Timestamp(1),
            },
        },
    ];

    let (sends, events) = partition(effects);
    let targets: Vec<ProcessId> = sends.iter().map(|(to, _)| *to).collect();
    assert_eq!(targets, vec![ProcessId(2), ProcessId(3)]);
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].name(), "mutex:requested");
}

#[test]
fn events_serialize_with_snake_case_tag() {
    let event = Event::AckReceived {
        process: ProcessId(1),
        from: ProcessId(2),
    };
    assert_eq!(
        serde_json::to_string(&event).unwrap(),
        r#"{"event":"ack_received","process":1,"from":2}"#
    );
    assert_eq!(event.name(), "mutex:ack-received");
    assert_eq!(event.process(), ProcessId(1));
}
