// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Handoff runtime: a bounded blocking queue and the single-producer /
//! single-consumer pipeline built on it.
//!
//! Components:
//! - queue    — fixed-capacity FIFO with blocking put/take (mutex + condvars)
//! - message  — `Item(T) | EndOfStream` stream elements
//! - pipeline — producer/consumer tasks, end-of-stream handshake, verification
//! - spawn    — named OS-thread tasks with panic capture
//! - timeout  — bounded waits for deadlock detection in tests
//! - config   — capacity from defaults or `HANDOFF_CAPACITY`
//! - trace    — tracing subscriber setup

pub mod config;
pub mod error;
pub mod message;
pub mod pipeline;
pub mod queue;
pub mod spawn;
pub mod timeout;
pub mod trace;

pub use config::PipelineConfig;
pub use error::{ConfigError, PipelineError, QueueError};
pub use message::Message;
pub use pipeline::{consume, produce, run_pipeline, Pipeline, PipelineOutcome};
pub use queue::{BoundedQueue, QueueState, TryPutError, TryTakeError};
pub use spawn::{spawn_named, JoinError, TaskHandle};
pub use timeout::{with_timeout, Elapsed};
