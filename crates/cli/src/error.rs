// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! User-friendly error display with context and suggestions.
//!
//! An [`MxError`] carries what went wrong, why it might have happened, and
//! how to fix it.

use mx_core::verify::Counterexample;
use mx_core::ConfigError;
use std::fmt;
use std::path::Path;

/// Error with context and recovery suggestions for user-friendly display.
#[derive(Debug)]
pub struct MxError {
    /// What went wrong
    pub message: String,
    /// Why it might have happened
    pub context: Vec<String>,
    /// How to fix it
    pub suggestions: Vec<String>,
    /// Original error if any
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl MxError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            context: Vec::new(),
            suggestions: Vec::new(),
            source: None,
        }
    }

    pub fn with_context(mut self, ctx: impl Into<String>) -> Self {
        self.context.push(ctx.into());
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    pub fn with_source<E: std::error::Error + Send + Sync + 'static>(mut self, source: E) -> Self {
        self.source = Some(Box::new(source));
        self
    }
}

impl fmt::Display for MxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "error: {}", self.message)?;

        if !self.context.is_empty() {
            writeln!(f)?;
            for ctx in &self.context {
                writeln!(f, "  -> {}", ctx)?;
            }
        }

        if !self.suggestions.is_empty() {
            writeln!(f)?;
            writeln!(f, "suggestions:")?;
            for (i, suggestion) in self.suggestions.iter().enumerate() {
                writeln!(f, "  {}. {}", i + 1, suggestion)?;
            }
        }

        Ok(())
    }
}

impl std::error::Error for MxError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Builders for the failures users actually hit.
impl MxError {
    /// A configuration file could not be loaded.
    pub fn bad_config(path: &Path, err: ConfigError) -> Self {
        MxError::new(format!("Cannot use config '{}'", path.display()))
            .with_context(err.to_string())
            .with_suggestion("Print a valid starting point: mx config > mx.toml")
            .with_source(err)
    }

    /// The transport lacks a guarantee the protocol depends on.
    pub fn transport_rejected(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        MxError::new("Transport rejected at startup")
            .with_context(err.to_string())
            .with_context("The protocol needs reliable, exactly-once, per-pair FIFO delivery")
            .with_suggestion("Use a transport that offers every guarantee in [transport]")
            .with_source(err)
    }

    /// The explorer found a reachable bad state.
    pub fn protocol_unsafe(counterexamples: &[Counterexample]) -> Self {
        let mut err = MxError::new(format!(
            "Exploration found {} counterexample(s)",
            counterexamples.len()
        ));
        for cx in counterexamples {
            err = err.with_context(format!("{} after {} step(s)", cx.finding, cx.trace.len()));
        }
        err.with_suggestion("Re-run with --output json to see the full traces")
    }

    /// A live run did not finish in time.
    pub fn stalled(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        MxError::new("Simulation stalled")
            .with_context(err.to_string())
            .with_suggestion("Raise request_timeout in the config")
            .with_suggestion("Lower --hold or --rounds")
            .with_source(err)
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
