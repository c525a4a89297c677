// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Cluster configuration
//!
//! Loaded from TOML. Durations use humantime syntax (`"5ms"`, `"10s"`).

use crate::id::{MembershipError, ProcessId, ProcessSet};
use serde::{Deserialize, Serialize};
use std::num::NonZeroU32;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("failed to render config: {0}")]
    Render(#[from] toml::ser::Error),
    #[error("invalid membership: {0}")]
    Membership(#[from] MembershipError),
    #[error("rounds must be at least 1")]
    NoRounds,
}

/// Delivery guarantees a transport offers, or the protocol requires
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TransportCapabilities {
    /// Messages are never lost
    pub reliable: bool,
    /// Messages between a pair arrive in send order
    pub fifo: bool,
    /// Messages are never duplicated
    pub exactly_once: bool,
}

impl TransportCapabilities {
    /// The guarantees the mutual exclusion protocol depends on
    pub const REQUIRED: TransportCapabilities = TransportCapabilities {
        reliable: true,
        fifo: true,
        exactly_once: true,
    };

    /// Names of required guarantees that `self` lacks
    pub fn missing(&self, required: &TransportCapabilities) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if required.reliable && !self.reliable {
            missing.push("reliable");
        }
        if required.fifo && !self.fifo {
            missing.push("fifo");
        }
        if required.exactly_once && !self.exactly_once {
            missing.push("exactly_once");
        }
        missing
    }

    pub fn satisfies(&self, required: &TransportCapabilities) -> bool {
        self.missing(required).is_empty()
    }
}

impl Default for TransportCapabilities {
    fn default() -> Self {
        Self::REQUIRED
    }
}

/// Settings for a cluster run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClusterConfig {
    pub processes: ProcessSet,
    /// Critical-section entries each process performs
    #[serde(default = "default_rounds")]
    pub rounds: u32,
    /// Time spent inside the critical section per entry
    #[serde(default = "default_hold", with = "humantime_serde")]
    pub hold: Duration,
    /// Give up waiting for an entry after this long
    #[serde(default = "default_request_timeout", with = "humantime_serde")]
    pub request_timeout: Duration,
    /// Guarantees the transport must offer
    #[serde(default)]
    pub transport: TransportCapabilities,
}

fn default_rounds() -> u32 {
    1
}

fn default_hold() -> Duration {
    Duration::from_millis(5)
}

fn default_request_timeout() -> Duration {
    Duration::from_secs(10)
}

impl ClusterConfig {
    pub fn new(processes: ProcessSet) -> Self {
        Self {
            processes,
            rounds: default_rounds(),
            hold: default_hold(),
            request_timeout: default_request_timeout(),
            transport: TransportCapabilities::default(),
        }
    }

    /// Processes `1..=count`
    pub fn numbered(count: u32) -> Result<Self, ConfigError> {
        Ok(Self::new(ProcessSet::numbered(count)?))
    }

    pub fn with_rounds(mut self, rounds: u32) -> Self {
        self.rounds = rounds;
        self
    }

    pub fn with_hold(mut self, hold: Duration) -> Self {
        self.hold = hold;
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: ClusterConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rounds == 0 {
            return Err(ConfigError::NoRounds);
        }
        Ok(())
    }

    pub fn process_ids(&self) -> impl Iterator<Item = ProcessId> + '_ {
        self.processes.iter()
    }
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self::new(ProcessSet::range(NonZeroU32::MIN.saturating_add(2))).with_rounds(2)
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
