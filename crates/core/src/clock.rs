// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Logical clock for ordering requests without a shared physical time source

use serde::{Deserialize, Serialize};
use std::fmt;

/// A Lamport timestamp
///
/// Zero is reserved: a request table entry of zero means "not requesting".
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Timestamp(pub u64);

impl Timestamp {
    pub const ZERO: Timestamp = Timestamp(0);

    pub fn is_zero(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Per-process logical clock
///
/// Owned exclusively by one process. Both operations advance the clock, so
/// every value handed out is strictly greater than the previous one.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct LogicalClock {
    current: Timestamp,
}

impl LogicalClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current value without advancing
    pub fn now(&self) -> Timestamp {
        self.current
    }

    /// Record a local event
    pub fn tick(&mut self) -> Timestamp {
        self.current = Timestamp(self.current.0.saturating_add(1));
        self.current
    }

    /// Record receipt of a message stamped `incoming`
    pub fn observe(&mut self, incoming: Timestamp) -> Timestamp {
        let base = self.current.max(incoming);
        self.current = Timestamp(base.0.saturating_add(1));
        self.current
    }
}

#[cfg(test)]
#[path = "clock_tests.rs"]
mod tests;
