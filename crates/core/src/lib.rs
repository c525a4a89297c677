// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! mx-core: distributed mutual exclusion over FIFO message passing
//!
//! This crate provides:
//! - Logical clocks, process identities, and wire messages
//! - FIFO channels between every ordered pair of processes
//! - Pure per-process transitions returning effects
//! - A whole-system engine plus invariant checks, exhaustive exploration,
//!   and a fair scheduler for verification
//! - Cluster configuration and an event bus for observers

pub mod channel;
pub mod clock;
pub mod config;
pub mod effect;
pub mod error;
pub mod events;
pub mod id;
pub mod message;
pub mod mutex;
pub mod process;
pub mod verify;

pub use channel::{ChannelError, Channels};
pub use clock::{LogicalClock, Timestamp};
pub use config::{ClusterConfig, ConfigError, TransportCapabilities};
pub use effect::{Effect, Event};
pub use error::{MutexError, ProtocolViolation};
pub use events::{EventBus, EventPattern, Subscription};
pub use id::{MembershipError, ProcessId, ProcessSet};
pub use message::{Envelope, Message, MessageKind};
pub use mutex::{beats, Action, Claim, MutexEngine, ProcessInput};
pub use process::{Phase, ProcessState};
