// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Process phase definitions

use serde::{Deserialize, Serialize};
use std::fmt;

/// Where a process stands with respect to the critical section
///
/// Derived from the request table and the membership flag, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// No outstanding request
    Idle,
    /// Request broadcast, waiting for acknowledgements and priority
    Requesting,
    /// Executing inside the critical section
    InCriticalSection,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Idle => write!(f, "idle"),
            Phase::Requesting => write!(f, "requesting"),
            Phase::InCriticalSection => write!(f, "in-critical-section"),
        }
    }
}
