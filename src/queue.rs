//! The dynamically-discovered job queue: a closeable, FIFO stream of
//! jobs delivered to the executor.
//!
//! The producer needs an explicit, queryable `close()` rather than a signal
//! implied by a dropped sender, so this is a mutex-guarded deque with a
//! condition variable instead of an `mpsc` channel.

use std::collections::VecDeque;
use std::sync::{Arc, Condvar, Mutex};

use crate::job::Job;

struct State<Payload> {
    jobs: VecDeque<Job<Payload>>,
    open: bool,
}

struct Inner<Payload> {
    state: Mutex<State<Payload>>,
    condvar: Condvar,
}

/// A single-producer, multi-consumer closeable job queue.
///
/// Cheap to clone: clones share the same underlying queue (an `Arc`
/// handle), which is how both the scheduler (producer) and the executor
/// (consumer, possibly on another thread) hold on to it.
pub struct JobQueue<Payload> {
    inner: Arc<Inner<Payload>>,
}

impl<Payload> Clone for JobQueue<Payload> {
    fn clone(&self) -> Self {
        JobQueue { inner: self.inner.clone() }
    }
}

impl<Payload> Default for JobQueue<Payload> {
    fn default() -> Self {
        JobQueue::new()
    }
}

impl<Payload> JobQueue<Payload> {
    pub fn new() -> JobQueue<Payload> {
        JobQueue {
            inner: Arc::new(Inner {
                state: Mutex::new(State { jobs: VecDeque::new(), open: true }),
                condvar: Condvar::new(),
            }),
        }
    }

    pub fn is_open(&self) -> bool {
        self.inner.state.lock().unwrap().open
    }

    /// Append one job. Valid while open; the one sanctioned exception (late
    /// post-compile jobs) is handled by the scheduler, not here — this
    /// method always pushes and notifies waiters.
    pub fn append(&self, job: Job<Payload>) {
        let mut state = self.inner.state.lock().unwrap();
        state.jobs.push_back(job);
        self.inner.condvar.notify_all();
    }

    /// Append several jobs, preserving their relative order.
    pub fn append_all(&self, jobs: impl IntoIterator<Item = Job<Payload>>) {
        let mut state = self.inner.state.lock().unwrap();
        state.jobs.extend(jobs);
        self.inner.condvar.notify_all();
    }

    /// Mark the queue terminal. Idempotent; consumers observing an empty
    /// closed queue exit.
    pub fn close(&self) {
        let mut state = self.inner.state.lock().unwrap();
        state.open = false;
        self.inner.condvar.notify_all();
    }

    /// Block until a job is available, or the queue is closed and drained
    /// (in which case this returns `None`).
    pub fn next(&self) -> Option<Job<Payload>> {
        let mut state = self.inner.state.lock().unwrap();
        loop {
            if let Some(job) = state.jobs.pop_front() {
                return Some(job);
            }
            if !state.open {
                return None;
            }
            state = self.inner.condvar.wait(state).unwrap();
        }
    }

    /// Non-blocking variant of `next`, for consumers that poll instead of
    /// parking a thread.
    pub fn try_next(&self) -> Option<Job<Payload>> {
        self.inner.state.lock().unwrap().jobs.pop_front()
    }
}
