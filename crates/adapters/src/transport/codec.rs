// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! JSON frame encoding for envelopes
//!
//! One envelope per frame, newline terminated:
//! `{"from":1,"to":2,"message":{"type":"request","timestamp":3}}\n`

use super::TransportError;
use mx_core::Envelope;

pub fn encode(envelope: &Envelope) -> Result<Vec<u8>, TransportError> {
    let mut frame = serde_json::to_vec(envelope)?;
    frame.push(b'\n');
    Ok(frame)
}

pub fn decode(frame: &[u8]) -> Result<Envelope, TransportError> {
    let body = frame.strip_suffix(b"\n").unwrap_or(frame);
    Ok(serde_json::from_slice(body)?)
}
