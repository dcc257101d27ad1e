//! Bounded-concurrency admission queue
//!
//! A single FIFO waiting list plus a running counter, both under one lock.
//! Tasks move `Queued -> Running -> Done`; there is no cancellation once a
//! task is running. Completion (success, error or panic) frees the slot and
//! admits the next waiting task.

use std::collections::VecDeque;
use std::future::Future;
use std::sync::Arc;

use parking_lot::Mutex;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, error, warn};

/// Default concurrency ceiling
pub const DEFAULT_MAX_CONCURRENT: usize = 10;

/// Failure reported by a task; logged at the queue boundary, never propagated.
#[derive(Debug, Clone, Error)]
pub enum QueueTaskError {
    #[error("task failed: {0}")]
    Failed(String),
}

/// A deferred unit of work.
///
/// The task carries its own inputs and its own completion channel; the queue
/// only decides when it starts.
pub trait QueueTask: Send + 'static {
    fn run(self) -> impl Future<Output = Result<(), QueueTaskError>> + Send;
}

/// Snapshot of queue occupancy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueueStats {
    pub running: usize,
    pub waiting: usize,
    pub max_concurrent: usize,
}

struct QueueState<T> {
    waiting: VecDeque<T>,
    running: usize,
}

struct Inner<T> {
    state: Mutex<QueueState<T>>,
    max_concurrent: usize,
}

/// FIFO admission queue admitting at most `max_concurrent` running tasks.
///
/// Must be used from within a tokio runtime: admitted tasks are spawned.
pub struct AdmissionQueue<T> {
    inner: Arc<Inner<T>>,
}

impl<T> Clone for AdmissionQueue<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: QueueTask> AdmissionQueue<T> {
    /// Create a queue; a ceiling of zero is raised to one.
    pub fn new(max_concurrent: usize) -> Self {
        Self {
            inner: Arc::new(Inner {
                state: Mutex::new(QueueState {
                    waiting: VecDeque::new(),
                    running: 0,
                }),
                max_concurrent: max_concurrent.max(1),
            }),
        }
    }

    /// Enqueue `task` at the tail and admit as many tasks as the ceiling allows.
    pub fn submit(&self, task: T) {
        {
            let mut state = self.inner.state.lock();
            state.waiting.push_back(task);
            debug!(
                waiting = state.waiting.len(),
                running = state.running,
                "Task queued"
            );
        }
        Inner::drain(&self.inner);
    }

    pub fn stats(&self) -> QueueStats {
        let state = self.inner.state.lock();
        QueueStats {
            running: state.running,
            waiting: state.waiting.len(),
            max_concurrent: self.inner.max_concurrent,
        }
    }

    pub fn max_concurrent(&self) -> usize {
        self.inner.max_concurrent
    }
}

impl<T: QueueTask> Inner<T> {
    /// Admit waiting tasks while slots are free. Iterative: completions call
    /// back in from their own tokio task, so the stack never grows.
    fn drain(this: &Arc<Self>) {
        loop {
            let task = {
                let mut state = this.state.lock();
                if state.running >= this.max_concurrent {
                    break;
                }
                match state.waiting.pop_front() {
                    Some(task) => {
                        state.running += 1;
                        debug!(
                            waiting = state.waiting.len(),
                            running = state.running,
                            "Task admitted"
                        );
                        task
                    }
                    None => break,
                }
            };

            let inner = Arc::clone(this);
            tokio::spawn(async move {
                // Run on a separate task so a panic surfaces as a JoinError
                match tokio::spawn(task.run()).await {
                    Ok(Ok(())) => {}
                    Ok(Err(e)) => warn!(error = %e, "Queue task failed"),
                    Err(e) => error!(error = %e, "Queue task panicked"),
                }
                inner.finish();
            });
        }
    }

    fn finish(self: &Arc<Self>) {
        {
            let mut state = self.state.lock();
            state.running -= 1;
            debug!(
                waiting = state.waiting.len(),
                running = state.running,
                "Task finished"
            );
        }
        Self::drain(self);
    }
}
