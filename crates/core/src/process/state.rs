// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Process state: clock, request table, ack set, membership flag

use super::phase::Phase;
use crate::clock::{LogicalClock, Timestamp};
use crate::id::{ProcessId, ProcessSet};
use std::collections::{BTreeMap, BTreeSet};

/// Everything one process knows
///
/// Only the owning process mutates this; transitions live in
/// [`crate::mutex`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProcessState {
    pub(crate) id: ProcessId,
    pub(crate) members: ProcessSet,
    pub(crate) clock: LogicalClock,
    /// Last known request stamp per process, zero meaning "not requesting"
    pub(crate) requests: BTreeMap<ProcessId, Timestamp>,
    /// Processes that acknowledged the outstanding request
    pub(crate) acks: BTreeSet<ProcessId>,
    pub(crate) in_critical_section: bool,
}

impl ProcessState {
    /// Fresh state for `id`; every request entry starts at zero
    pub fn new(id: ProcessId, members: ProcessSet) -> Self {
        let requests = members.iter().map(|q| (q, Timestamp::ZERO)).collect();
        Self {
            id,
            members,
            clock: LogicalClock::new(),
            requests,
            acks: BTreeSet::new(),
            in_critical_section: false,
        }
    }

    pub fn id(&self) -> ProcessId {
        self.id
    }

    pub fn members(&self) -> &ProcessSet {
        &self.members
    }

    pub fn clock(&self) -> Timestamp {
        self.clock.now()
    }

    /// Last request stamp recorded for `q`; zero if none or unknown
    pub fn request_of(&self, q: ProcessId) -> Timestamp {
        self.requests.get(&q).copied().unwrap_or_default()
    }

    /// Own outstanding request stamp, if any
    pub fn own_request(&self) -> Option<Timestamp> {
        let t = self.request_of(self.id);
        (!t.is_zero()).then_some(t)
    }

    pub fn requests(&self) -> impl Iterator<Item = (ProcessId, Timestamp)> + '_ {
        self.requests.iter().map(|(q, t)| (*q, *t))
    }

    pub fn acks(&self) -> &BTreeSet<ProcessId> {
        &self.acks
    }

    pub fn has_ack_from(&self, q: ProcessId) -> bool {
        self.acks.contains(&q)
    }

    /// Members that have not yet acknowledged the outstanding request
    pub fn missing_acks(&self) -> Vec<ProcessId> {
        self.members.iter().filter(|q| !self.acks.contains(q)).collect()
    }

    pub fn in_critical_section(&self) -> bool {
        self.in_critical_section
    }

    pub fn phase(&self) -> Phase {
        if self.in_critical_section {
            Phase::InCriticalSection
        } else if self.own_request().is_some() {
            Phase::Requesting
        } else {
            Phase::Idle
        }
    }
}
