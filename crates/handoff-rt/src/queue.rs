// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Bounded blocking FIFO queue.
//!
//! Monitor pattern: one mutex around a `VecDeque`, two condition variables
//! (`not_full`, `not_empty`) always waited on with that mutex's guard. Every
//! wait sits in a predicate loop, so spurious wakeups only cost a re-check.
//!
//! `put` blocks while the queue holds `capacity` items, `take` blocks while it
//! holds none. Nothing else suspends.

use std::collections::VecDeque;
use std::fmt;
use std::num::NonZeroUsize;
use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use thiserror::Error;
use tracing::{debug, trace};

use crate::error::QueueError;

/// Occupancy of a queue at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueueState {
    /// No pending items; `take` blocks.
    Empty,
    /// Between 1 and `capacity - 1` items.
    Partial,
    /// `capacity` items; `put` blocks.
    Full,
}

impl QueueState {
    fn of(len: usize, capacity: usize) -> Self {
        if len == 0 {
            QueueState::Empty
        } else if len >= capacity {
            QueueState::Full
        } else {
            QueueState::Partial
        }
    }
}

/// Error from a non-blocking or deadline-bounded put. Hands the item back.
#[derive(Debug, PartialEq, Eq, Error)]
pub enum TryPutError<T> {
    /// Queue is at capacity.
    #[error("queue is full")]
    Full(T),
    /// Queue stayed at capacity until the deadline.
    #[error("timed out waiting for queue space")]
    TimedOut(T),
}

impl<T> TryPutError<T> {
    /// Recover the item that could not be queued.
    pub fn into_inner(self) -> T {
        match self {
            TryPutError::Full(item) | TryPutError::TimedOut(item) => item,
        }
    }
}

/// Error from a non-blocking or deadline-bounded take.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TryTakeError {
    /// No item available right now.
    #[error("queue is empty")]
    Empty,
    /// Queue stayed empty until the deadline.
    #[error("timed out waiting for an item")]
    TimedOut,
}

/// Fixed-capacity FIFO shared by one producer and one consumer.
///
/// Share it behind an `Arc`. Items come out of `take` in exactly the order
/// they went into `put`; none are dropped or duplicated.
pub struct BoundedQueue<T> {
    items: Mutex<VecDeque<T>>,
    not_full: Condvar,
    not_empty: Condvar,
    capacity: usize,
}

impl<T> BoundedQueue<T> {
    /// Create an empty queue holding at most `capacity` items.
    ///
    /// Fails with [`QueueError::InvalidConfiguration`] when `capacity` is 0.
    pub fn new(capacity: usize) -> Result<Self, QueueError> {
        NonZeroUsize::new(capacity)
            .map(Self::with_capacity)
            .ok_or(QueueError::InvalidConfiguration { capacity })
    }

    /// Infallible constructor for a capacity already known to be positive.
    pub fn with_capacity(capacity: NonZeroUsize) -> Self {
        let capacity = capacity.get();
        Self {
            items: Mutex::new(VecDeque::with_capacity(capacity)),
            not_full: Condvar::new(),
            not_empty: Condvar::new(),
            capacity,
        }
    }

    // Every mutation is a single VecDeque call, so a poisoned lock still
    // guards a consistent deque.
    fn lock(&self) -> MutexGuard<'_, VecDeque<T>> {
        self.items.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Append `item` at the tail, blocking while the queue is full.
    pub fn put(&self, item: T) {
        let mut items = self.lock();
        while items.len() >= self.capacity {
            debug!(capacity = self.capacity, "put blocked on full queue");
            items = self
                .not_full
                .wait(items)
                .unwrap_or_else(PoisonError::into_inner);
        }
        self.push_locked(&mut items, item);
    }

    /// Remove and return the head, blocking while the queue is empty.
    pub fn take(&self) -> T {
        let mut items = self.lock();
        loop {
            if let Some(item) = self.pop_locked(&mut items) {
                return item;
            }
            debug!("take blocked on empty queue");
            items = self
                .not_empty
                .wait(items)
                .unwrap_or_else(PoisonError::into_inner);
        }
    }

    /// Append without blocking. Gives the item back if the queue is full.
    pub fn try_put(&self, item: T) -> Result<(), TryPutError<T>> {
        let mut items = self.lock();
        if items.len() >= self.capacity {
            return Err(TryPutError::Full(item));
        }
        self.push_locked(&mut items, item);
        Ok(())
    }

    /// Remove the head without blocking.
    pub fn try_take(&self) -> Result<T, TryTakeError> {
        let mut items = self.lock();
        self.pop_locked(&mut items).ok_or(TryTakeError::Empty)
    }

    /// Like [`put`](Self::put), but gives up once `timeout` has elapsed.
    pub fn put_timeout(&self, item: T, timeout: Duration) -> Result<(), TryPutError<T>> {
        let deadline = Instant::now().checked_add(timeout);
        let mut items = self.lock();
        while items.len() >= self.capacity {
            items = match wait_until(&self.not_full, items, deadline) {
                Some(guard) => guard,
                None => return Err(TryPutError::TimedOut(item)),
            };
        }
        self.push_locked(&mut items, item);
        Ok(())
    }

    /// Like [`take`](Self::take), but gives up once `timeout` has elapsed.
    pub fn take_timeout(&self, timeout: Duration) -> Result<T, TryTakeError> {
        let deadline = Instant::now().checked_add(timeout);
        let mut items = self.lock();
        loop {
            if let Some(item) = self.pop_locked(&mut items) {
                return Ok(item);
            }
            items = match wait_until(&self.not_empty, items, deadline) {
                Some(guard) => guard,
                None => return Err(TryTakeError::TimedOut),
            };
        }
    }

    fn push_locked(&self, items: &mut VecDeque<T>, item: T) {
        debug_assert!(items.len() < self.capacity);
        items.push_back(item);
        // Wake before logging: the handoff is complete even if a subscriber panics.
        self.not_empty.notify_one();
        trace!(
            len = items.len(),
            state = ?QueueState::of(items.len(), self.capacity),
            "put"
        );
    }

    fn pop_locked(&self, items: &mut VecDeque<T>) -> Option<T> {
        let item = items.pop_front()?;
        self.not_full.notify_one();
        trace!(
            len = items.len(),
            state = ?QueueState::of(items.len(), self.capacity),
            "take"
        );
        Some(item)
    }

    /// Maximum number of pending items.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of pending items at this instant.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.lock().len() >= self.capacity
    }

    /// Snapshot of the queue's occupancy.
    pub fn state(&self) -> QueueState {
        QueueState::of(self.lock().len(), self.capacity)
    }
}

impl<T> fmt::Debug for BoundedQueue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoundedQueue")
            .field("len", &self.len())
            .field("capacity", &self.capacity)
            .finish()
    }
}

/// Wait on `condvar` until notified or `deadline` passes.
///
/// Returns `None` once the deadline has passed; callers re-check their
/// predicate on every `Some`. No deadline means wait indefinitely.
fn wait_until<'a, T>(
    condvar: &Condvar,
    guard: MutexGuard<'a, T>,
    deadline: Option<Instant>,
) -> Option<MutexGuard<'a, T>> {
    let Some(deadline) = deadline else {
        return Some(condvar.wait(guard).unwrap_or_else(PoisonError::into_inner));
    };
    let remaining = deadline.saturating_duration_since(Instant::now());
    if remaining.is_zero() {
        return None;
    }
    let (guard, _) = condvar
        .wait_timeout(guard, remaining)
        .unwrap_or_else(PoisonError::into_inner);
    Some(guard)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn put_and_take_single_item() {
        let q = BoundedQueue::new(2).unwrap();
        q.put(42);
        assert_eq!(q.take(), 42);
        assert_eq!(q.len(), 0);
    }

    #[test]
    fn zero_capacity_rejected() {
        let err = BoundedQueue::<i32>::new(0).unwrap_err();
        assert_eq!(err, QueueError::InvalidConfiguration { capacity: 0 });
    }

    #[test]
    fn fill_to_capacity() {
        let q = BoundedQueue::new(2).unwrap();
        q.put("a");
        q.put("b");
        assert_eq!(q.len(), 2);
        assert!(q.is_full());
        assert!(matches!(q.try_put("c"), Err(TryPutError::Full("c"))));
        assert_eq!(q.len(), 2);
    }

    #[test]
    fn fifo_order() {
        let q = BoundedQueue::new(5).unwrap();
        for i in 0..5 {
            q.put(i);
        }
        let out: Vec<_> = (0..5).map(|_| q.take()).collect();
        assert_eq!(out, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn state_transitions() {
        let q = BoundedQueue::new(2).unwrap();
        assert_eq!(q.state(), QueueState::Empty);
        q.put(1);
        assert_eq!(q.state(), QueueState::Partial);
        q.put(2);
        assert_eq!(q.state(), QueueState::Full);
        q.take();
        assert_eq!(q.state(), QueueState::Partial);
        q.take();
        assert_eq!(q.state(), QueueState::Empty);
    }

    #[test]
    fn capacity_one_has_no_partial_state() {
        let q = BoundedQueue::new(1).unwrap();
        assert_eq!(q.state(), QueueState::Empty);
        q.put(());
        assert_eq!(q.state(), QueueState::Full);
    }

    #[test]
    fn try_take_empty() {
        let q = BoundedQueue::<i32>::new(1).unwrap();
        assert_eq!(q.try_take(), Err(TryTakeError::Empty));
    }

    #[test]
    fn take_timeout_expires_on_empty_queue() {
        let q = BoundedQueue::<i32>::new(1).unwrap();
        let start = Instant::now();
        assert_eq!(
            q.take_timeout(Duration::from_millis(20)),
            Err(TryTakeError::TimedOut)
        );
        assert!(start.elapsed() >= Duration::from_millis(19));
    }

    #[test]
    fn put_timeout_returns_item_on_full_queue() {
        let q = BoundedQueue::new(1).unwrap();
        q.put(1);
        let err = q.put_timeout(2, Duration::from_millis(20)).unwrap_err();
        assert_eq!(err.into_inner(), 2);
        assert_eq!(q.take(), 1);
    }

    #[test]
    fn try_errors_are_std_errors() {
        let put: Box<dyn std::error::Error> = Box::new(TryPutError::Full(1));
        assert_eq!(put.to_string(), "queue is full");
        assert_eq!(
            TryPutError::TimedOut("x").to_string(),
            "timed out waiting for queue space"
        );
        let take: Box<dyn std::error::Error> = Box::new(TryTakeError::TimedOut);
        assert_eq!(take.to_string(), "timed out waiting for an item");
        assert_eq!(TryTakeError::Empty.to_string(), "queue is empty");
    }

    #[test]
    fn put_blocks_until_take() {
        let q = Arc::new(BoundedQueue::new(1).unwrap());
        q.put(1);

        let producer = {
            let q = Arc::clone(&q);
            thread::spawn(move || q.put(2))
        };

        thread::sleep(Duration::from_millis(20));
        assert!(!producer.is_finished());
        assert_eq!(q.len(), 1);

        assert_eq!(q.take(), 1);
        producer.join().unwrap();
        assert_eq!(q.take_timeout(Duration::from_secs(5)), Ok(2));
    }

    #[test]
    fn take_blocks_until_put() {
        let q = Arc::new(BoundedQueue::<i32>::new(1).unwrap());

        let consumer = {
            let q = Arc::clone(&q);
            thread::spawn(move || q.take())
        };

        thread::sleep(Duration::from_millis(20));
        assert!(!consumer.is_finished());

        q.put(7);
        assert_eq!(consumer.join().unwrap(), 7);
    }

    #[test]
    fn concurrent_transfer_keeps_order() {
        let q = Arc::new(BoundedQueue::new(3).unwrap());
        let producer = {
            let q = Arc::clone(&q);
            thread::spawn(move || {
                for i in 0..1000 {
                    q.put(i);
                }
            })
        };
        let received: Vec<_> = (0..1000).map(|_| q.take()).collect();
        producer.join().unwrap();
        assert_eq!(received, (0..1000).collect::<Vec<_>>());
    }

    #[test]
    fn survives_poisoned_lock() {
        let q = Arc::new(BoundedQueue::new(2).unwrap());
        q.put(1);
        {
            let q = Arc::clone(&q);
            let _ = thread::spawn(move || {
                let _guard = q.items.lock().unwrap();
                panic!("poison");
            })
            .join();
        }
        q.put(2);
        assert_eq!(q.take(), 1);
        assert_eq!(q.take(), 2);
    }
}
