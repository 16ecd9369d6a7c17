// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

use std::collections::VecDeque;
use std::time::Duration;

use parking_lot::{Condvar, Mutex};

use super::Job;

/// Unbounded multi-producer job queue.
///
/// Consumers never block on the lock for longer than a push takes. When the
/// queue is empty they wait out a backoff, but a push (or shutdown) cuts the
/// wait short, so a fresh job does not sit idle for the whole interval.
#[derive(Debug, Default)]
pub(crate) struct JobQueue {
    jobs: Mutex<VecDeque<Job>>,
    pushed: Condvar,
}

impl JobQueue {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&self, job: Job) {
        self.jobs.lock().push_back(job);
        self.pushed.notify_one();
    }

    pub(crate) fn try_pop(&self) -> Option<Job> {
        self.jobs.lock().pop_front()
    }

    pub(crate) fn len(&self) -> usize {
        self.jobs.lock().len()
    }

    /// Wait up to `backoff` for the queue to become non-empty.
    pub(crate) fn wait_for_job(&self, backoff: Duration) {
        let mut jobs = self.jobs.lock();
        if jobs.is_empty() {
            // Spurious and timed-out wakeups are fine: the caller re-polls
            let _ = self.pushed.wait_for(&mut jobs, backoff);
        }
    }

    /// Wake every waiting consumer.
    pub(crate) fn wake_all(&self) {
        let _guard = self.jobs.lock();
        self.pushed.notify_all();
    }
}
