// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Error types for queue construction, configuration and pipeline runs.

use thiserror::Error;

use crate::spawn::JoinError;

/// Rejected queue parameters. Raised at construction, never mid-operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueueError {
    #[error("invalid configuration: capacity must be at least 1, got {capacity}")]
    InvalidConfiguration { capacity: usize },
}

/// A configuration value that could not be read or is out of range.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{var}: expected a positive integer, got `{value}`")]
    Parse { var: &'static str, value: String },

    #[error(transparent)]
    Invalid(#[from] QueueError),
}

/// Why a pipeline run did not complete.
///
/// A destination that differs from the source is not an error; it shows up
/// as `success == false` on the outcome.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Config(#[from] QueueError),

    #[error("{task} task failed: {source}")]
    Task {
        task: &'static str,
        #[source]
        source: JoinError,
    },
}
