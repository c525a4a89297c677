// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-process protocol state

mod phase;
mod state;

pub use phase::Phase;
pub use state::ProcessState;
