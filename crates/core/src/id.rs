// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Process identities and membership

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::num::NonZeroU32;
use thiserror::Error;

/// Identity of one participating process
///
/// Identities are totally ordered; the order breaks ties between requests
/// carrying the same timestamp.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProcessId(pub u32);

impl ProcessId {
    pub fn new(id: u32) -> Self {
        Self(id)
    }
}

impl fmt::Display for ProcessId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "p{}", self.0)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MembershipError {
    #[error("process set must not be empty")]
    Empty,
    #[error("duplicate process identity: {0}")]
    Duplicate(ProcessId),
}

/// Fixed membership of the system, sorted by identity
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<ProcessId>", into = "Vec<ProcessId>")]
pub struct ProcessSet {
    members: Vec<ProcessId>,
}

impl ProcessSet {
    pub fn new(ids: impl IntoIterator<Item = ProcessId>) -> Result<Self, MembershipError> {
        let mut seen = BTreeSet::new();
        for id in ids {
            if !seen.insert(id) {
                return Err(MembershipError::Duplicate(id));
            }
        }
        if seen.is_empty() {
            return Err(MembershipError::Empty);
        }
        Ok(Self {
            members: seen.into_iter().collect(),
        })
    }

    /// Processes `1..=count`
    pub fn numbered(count: u32) -> Result<Self, MembershipError> {
        NonZeroU32::new(count)
            .map(Self::range)
            .ok_or(MembershipError::Empty)
    }

    /// Processes `1..=count`, infallible for a non-zero count
    pub fn range(count: NonZeroU32) -> Self {
        Self {
            members: (1..=count.get()).map(ProcessId).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Always false for a constructed set; provided for API symmetry
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn contains(&self, id: ProcessId) -> bool {
        self.members.binary_search(&id).is_ok()
    }

    pub fn iter(&self) -> impl Iterator<Item = ProcessId> + '_ {
        self.members.iter().copied()
    }

    /// Every member except `id`
    pub fn peers_of(&self, id: ProcessId) -> impl Iterator<Item = ProcessId> + '_ {
        self.iter().filter(move |q| *q != id)
    }

    /// Every ordered pair `(p, q)` with `p != q`
    pub fn ordered_pairs(&self) -> impl Iterator<Item = (ProcessId, ProcessId)> + '_ {
        self.iter()
            .flat_map(move |p| self.peers_of(p).map(move |q| (p, q)))
    }
}

impl TryFrom<Vec<ProcessId>> for ProcessSet {
    type Error = MembershipError;

    fn try_from(ids: Vec<ProcessId>) -> Result<Self, Self::Error> {
        Self::new(ids)
    }
}

impl From<ProcessSet> for Vec<ProcessId> {
    fn from(set: ProcessSet) -> Self {
        set.members
    }
}

impl fmt::Display for ProcessSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<String> = self.members.iter().map(ToString::to_string).collect();
        write!(f, "{{{}}}", names.join(", "))
    }
}

#[cfg(test)]
#[path = "id_tests.rs"]
mod tests;
