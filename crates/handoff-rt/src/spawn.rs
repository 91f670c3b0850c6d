// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Named task spawn/join on OS threads.
//!
//! A panic inside the task is caught on its own thread and handed back from
//! `join()` as `JoinError::Panicked`.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::thread::{self, JoinHandle};

use thiserror::Error;

/// Error returned by `join()` when the task did not produce a value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JoinError {
    /// Task panicked with the given message.
    #[error("task panicked: {0}")]
    Panicked(String),
    /// The OS refused to start the thread.
    #[error("failed to spawn thread: {0}")]
    Spawn(String),
}

/// Handle to a running task. Consumed by `join()`.
///
/// Dropping it without joining detaches the thread.
#[derive(Debug)]
pub struct TaskHandle<T> {
    name: String,
    handle: JoinHandle<Result<T, String>>,
}

impl<T> TaskHandle<T> {
    /// Thread name given at spawn.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// True once the task has returned or panicked. Never blocks.
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Wait for the task to complete, returning its result.
    pub fn join(self) -> Result<T, JoinError> {
        match self.handle.join() {
            Ok(Ok(val)) => Ok(val),
            Ok(Err(msg)) => Err(JoinError::Panicked(msg)),
            Err(payload) => Err(JoinError::Panicked(panic_message(payload.as_ref()))),
        }
    }
}

/// Spawn `f` on a new OS thread called `name`.
pub fn spawn_named<T, F>(name: &str, f: F) -> Result<TaskHandle<T>, JoinError>
where
    T: Send + 'static,
    F: FnOnce() -> T + Send + 'static,
{
    let handle = thread::Builder::new()
        .name(name.to_string())
        .spawn(move || {
            panic::catch_unwind(AssertUnwindSafe(f)).map_err(|e| panic_message(e.as_ref()))
        })
        .map_err(|e| JoinError::Spawn(e.to_string()))?;

    Ok(TaskHandle {
        name: name.to_string(),
        handle,
    })
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
