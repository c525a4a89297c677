// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Verification over the whole-system model
//!
//! This module provides:
//! - **invariants** - Safety checks on a single engine snapshot
//! - **Explorer** - Exhaustive breadth-first search over bounded runs
//! - **FairScheduler** - Deterministic round-robin driver for liveness runs

mod explorer;
mod invariants;
mod scheduler;

pub use explorer::{Counterexample, ExploreConfig, ExploreReport, Explorer, Finding};
pub use invariants::{check_invariants, InvariantViolation};
pub use scheduler::{Entry, FairScheduler, ScheduleError, ScheduleOutcome};
