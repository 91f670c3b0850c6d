// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Single-producer/single-consumer pipeline over a [`BoundedQueue`].
//!
//! The producer puts every source item in order and then exactly one
//! [`Message::EndOfStream`]. The consumer takes until it sees that marker,
//! never deciding it is done from an empty queue.
//!
//! A failed task never strands the other one: the producer sends the end
//! marker even when its source panics, and if the consumer dies the
//! orchestrator keeps taking from the queue until the producer has exited.

use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::config::PipelineConfig;
use crate::error::{PipelineError, QueueError};
use crate::message::Message;
use crate::queue::BoundedQueue;
use crate::spawn::{spawn_named, TaskHandle};

/// How long the orchestrator waits per take while standing in for a failed
/// consumer before re-checking the producer.
const DRAIN_POLL: Duration = Duration::from_millis(10);

/// Producer side: put each item, then the end marker. Returns items sent.
///
/// If iterating `source` panics, the end marker is still put before the
/// panic resumes, so a consumer on the other side stops.
pub fn produce<T, I>(queue: &BoundedQueue<Message<T>>, source: I) -> usize
where
    I: IntoIterator<Item = T>,
{
    let mut sent = 0;
    let fed = panic::catch_unwind(AssertUnwindSafe(|| {
        for item in source {
            queue.put(Message::Item(item));
            sent += 1;
        }
    }));
    queue.put(Message::EndOfStream);
    if let Err(payload) = fed {
        warn!(sent, "producer failed; end-of-stream sent early");
        panic::resume_unwind(payload);
    }
    debug!(sent, "producer sent end-of-stream");
    sent
}

/// Consumer side: collect items in arrival order until the end marker.
pub fn consume<T>(queue: &BoundedQueue<Message<T>>) -> Vec<T> {
    let mut destination = Vec::new();
    while let Message::Item(item) = queue.take() {
        destination.push(item);
    }
    debug!(received = destination.len(), "consumer saw end-of-stream");
    destination
}

/// Result of a completed run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineOutcome<T> {
    pub source: Vec<T>,
    pub destination: Vec<T>,
    /// Destination matched source in content and order.
    pub success: bool,
}

impl<T: PartialEq> PipelineOutcome<T> {
    /// Re-compare destination against source.
    pub fn verify(&self) -> bool {
        self.source == self.destination
    }
}

/// One producer task and one consumer task around a shared queue.
///
/// The queue is built (and its capacity checked) in the constructor, so a
/// bad capacity is reported before any thread starts.
pub struct Pipeline<T> {
    queue: Arc<BoundedQueue<Message<T>>>,
}

impl<T> Pipeline<T>
where
    T: Send + 'static,
{
    pub fn new(config: &PipelineConfig) -> Result<Self, QueueError> {
        let capacity = config.non_zero_capacity()?;
        Ok(Self {
            queue: Arc::new(BoundedQueue::with_capacity(capacity)),
        })
    }

    pub fn with_capacity(capacity: usize) -> Result<Self, QueueError> {
        Self::new(&PipelineConfig::new(capacity))
    }

    pub fn capacity(&self) -> usize {
        self.queue.capacity()
    }

    /// The shared queue, for observing occupancy while a run is in flight.
    pub fn queue(&self) -> Arc<BoundedQueue<Message<T>>> {
        Arc::clone(&self.queue)
    }

    /// Move `source` through the queue and wait for both tasks to finish.
    pub fn run(self, source: Vec<T>) -> Result<PipelineOutcome<T>, PipelineError>
    where
        T: Clone + PartialEq,
    {
        info!(
            capacity = self.capacity(),
            items = source.len(),
            "pipeline starting"
        );
        let expected = source.clone();

        let consumer_queue = Arc::clone(&self.queue);
        let consumer = spawn_named("consumer", move || consume(&consumer_queue))
            .map_err(|source| PipelineError::Task {
                task: "consumer",
                source,
            })?;

        let producer_queue = Arc::clone(&self.queue);
        let producer = match spawn_named("producer", move || produce(&producer_queue, source)) {
            Ok(handle) => handle,
            Err(source) => {
                // Release the consumer; the queue is still empty.
                self.queue.put(Message::EndOfStream);
                let _ = consumer.join();
                return Err(PipelineError::Task {
                    task: "producer",
                    source,
                });
            }
        };

        // Both tasks are joined before any error is returned.
        let consumed = consumer.join();
        if consumed.is_err() {
            warn!("consumer failed; draining queue until producer exits");
            drain_until_finished(&self.queue, &producer);
        }
        let produced = producer.join();

        let destination = consumed.map_err(|source| PipelineError::Task {
            task: "consumer",
            source,
        })?;
        let sent = produced.map_err(|source| PipelineError::Task {
            task: "producer",
            source,
        })?;

        let outcome = PipelineOutcome {
            success: destination == expected,
            source: expected,
            destination,
        };
        if outcome.success {
            info!(sent, "pipeline complete");
        } else {
            warn!(
                sent,
                received = outcome.destination.len(),
                "destination does not match source"
            );
        }
        Ok(outcome)
    }
}

/// Take and discard until `producer` has exited, so it never blocks on a
/// queue nobody reads.
fn drain_until_finished<T>(queue: &BoundedQueue<Message<T>>, producer: &TaskHandle<usize>) {
    while !producer.is_finished() {
        let _ = queue.take_timeout(DRAIN_POLL);
    }
}

/// Build a pipeline with `capacity` and run `source` through it.
pub fn run_pipeline<T>(source: Vec<T>, capacity: usize) -> Result<PipelineOutcome<T>, PipelineError>
where
    T: Clone + PartialEq + Send + 'static,
{
    Pipeline::with_capacity(capacity)?.run(source)
}
