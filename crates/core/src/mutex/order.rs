// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Tie-break order between competing requests

use crate::clock::Timestamp;
use crate::id::ProcessId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A request ranked by timestamp, then by requester identity
///
/// Field order drives the derived `Ord`: lexicographic on
/// `(timestamp, process)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Claim {
    pub timestamp: Timestamp,
    pub process: ProcessId,
}

impl Claim {
    pub fn new(timestamp: Timestamp, process: ProcessId) -> Self {
        Self { timestamp, process }
    }
}

impl fmt::Display for Claim {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.timestamp, self.process)
    }
}

/// True iff `mine` is ordered strictly before `theirs`
///
/// For claims from distinct processes exactly one of `beats(a, b)` and
/// `beats(b, a)` holds.
pub fn beats(mine: Claim, theirs: Claim) -> bool {
    mine < theirs
}
