// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Pipeline configuration.
//!
//! Precedence is left to the caller: explicit value, then `HANDOFF_CAPACITY`,
//! then [`DEFAULT_CAPACITY`].

use std::num::NonZeroUsize;

use crate::error::{ConfigError, QueueError};

/// Environment variable holding the queue capacity.
pub const CAPACITY_VAR: &str = "HANDOFF_CAPACITY";

/// Capacity used when nothing else is configured.
pub const DEFAULT_CAPACITY: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineConfig {
    /// Maximum number of items pending between producer and consumer.
    pub capacity: usize,
}

impl PipelineConfig {
    pub fn new(capacity: usize) -> Self {
        Self { capacity }
    }

    /// Read `HANDOFF_CAPACITY`, falling back to the default when unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an injectable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let capacity = match lookup(CAPACITY_VAR) {
            Some(value) => parse_capacity(CAPACITY_VAR, &value)?,
            None => DEFAULT_CAPACITY,
        };
        let config = Self { capacity };
        config.validate()?;
        Ok(config)
    }

    /// Check the capacity is at least 1.
    pub fn validate(&self) -> Result<(), QueueError> {
        self.non_zero_capacity().map(|_| ())
    }

    pub fn non_zero_capacity(&self) -> Result<NonZeroUsize, QueueError> {
        NonZeroUsize::new(self.capacity).ok_or(QueueError::InvalidConfiguration {
            capacity: self.capacity,
        })
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
        }
    }
}

/// Parse a capacity string. `source` names where it came from, for errors.
///
/// Zero parses fine here; range checking belongs to [`PipelineConfig::validate`].
pub fn parse_capacity(source: &'static str, value: &str) -> Result<usize, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::Parse {
        var: source,
        value: value.to_string(),
    })
}
