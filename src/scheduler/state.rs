// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

use std::sync::Arc;

use parking_lot::{Condvar, Mutex};

/// Counters and the shutdown flag, behind one lock.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct Counters {
    in_flight: usize,
    shutdown: bool,
    completed: usize,
    failed: usize,
}

/// Shared state of one scheduler run.
///
/// The shutdown flag is one-way: once set it stays set. Every dispatch is
/// matched by exactly one completion, recorded through [`InFlightGuard`].
#[derive(Debug, Default)]
pub(crate) struct SchedulerState {
    counters: Mutex<Counters>,
    settled: Condvar,
}

impl SchedulerState {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn request_shutdown(&self) {
        self.counters.lock().shutdown = true;
    }

    pub(crate) fn is_shutdown(&self) -> bool {
        self.counters.lock().shutdown
    }

    pub(crate) fn in_flight(&self) -> usize {
        self.counters.lock().in_flight
    }

    /// Count one dispatched job. Completion is recorded when the guard drops.
    pub(crate) fn dispatch(self: &Arc<Self>) -> InFlightGuard {
        self.counters.lock().in_flight += 1;
        InFlightGuard {
            state: Arc::clone(self),
            succeeded: false,
        }
    }

    /// Jobs that ran to completion and jobs that failed, so far.
    pub(crate) fn totals(&self) -> (usize, usize) {
        let counters = self.counters.lock();
        (counters.completed, counters.failed)
    }

    /// Block until no job is in flight.
    pub(crate) fn wait_idle(&self) {
        let mut counters = self.counters.lock();
        while counters.in_flight > 0 {
            self.settled.wait(&mut counters);
        }
    }

    fn finish(&self, succeeded: bool) {
        let mut counters = self.counters.lock();
        counters.in_flight -= 1;
        if succeeded {
            counters.completed += 1;
        } else {
            counters.failed += 1;
        }
        if counters.in_flight == 0 {
            self.settled.notify_all();
        }
    }
}

/// Decrements the in-flight count when dropped.
///
/// A job that panics or returns early without calling
/// [`succeed`](Self::succeed) counts as failed.
#[derive(Debug)]
pub(crate) struct InFlightGuard {
    state: Arc<SchedulerState>,
    succeeded: bool,
}

impl InFlightGuard {
    pub(crate) fn succeed(mut self) {
        self.succeeded = true;
    }
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.state.finish(self.succeeded);
    }
}
