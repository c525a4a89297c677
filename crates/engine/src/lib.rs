// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Live mutual exclusion runtime
//!
//! Runs one task per process over a [`mx_adapters::Transport`] and exposes a
//! [`MutexHandle`] per process to the application.

mod cluster;
mod error;
mod handle;
mod node;

pub use cluster::Cluster;
pub use error::RuntimeError;
pub use handle::MutexHandle;
