// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Mutual exclusion protocol
//!
//! This module provides:
//! - **Claim / beats** - The `(timestamp, identity)` tie-break order
//! - **ProcessInput** - The inputs a single process reacts to
//! - **ProcessState::transition** - Pure per-process guarded transitions
//! - **MutexEngine** - All processes plus channels, driven one action at a time

mod action;
mod engine;
mod input;
mod order;
mod transition;

pub use action::Action;
pub use engine::MutexEngine;
pub use input::ProcessInput;
pub use order::{beats, Claim};
