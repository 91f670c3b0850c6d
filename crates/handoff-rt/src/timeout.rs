// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Bounded waits.
//!
//! Nothing in a pipeline run needs a timeout to terminate; these exist so a
//! test that would deadlock fails instead of hanging.

use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;

use crate::queue::BoundedQueue;

/// Run a closure with a timeout. Returns `Err(Elapsed)` if the closure
/// doesn't complete within `duration`.
///
/// The closure runs on a helper thread and hands its result over a
/// single-slot queue. On timeout the helper is left running detached.
pub fn with_timeout<T, F>(duration: Duration, f: F) -> Result<T, Elapsed>
where
    T: Send + 'static,
    F: FnOnce() -> T + Send + 'static,
{
    let slot = Arc::new(BoundedQueue::with_capacity(NonZeroUsize::MIN));
    let tx = Arc::clone(&slot);
    std::thread::spawn(move || tx.put(f()));

    slot.take_timeout(duration).map_err(|_| Elapsed(duration))
}

/// Timeout error, carrying the limit that was exceeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("operation timed out after {0:?}")]
pub struct Elapsed(pub Duration);
