// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Turns a stream of "history file ready" events into stored results.
//!
//! ```text
//!  fetch stage                 ComputationScheduler
//! ┌────────────┐  enqueue   ┌──────────┐  try_pop  ┌──────────┐
//! │  producer  │──────────▶│ JobQueue │─────────▶│ worker 0 │──▶ engine.run
//! └────────────┘            └──────────┘    ...    │ worker N │──▶ engine.run
//!        │ shutdown               ▲                └──────────┘
//!        └────────────────▶ SchedulerState ◀── in-flight guard
//! ```
//!
//! Producers never block: the queue is unbounded. Each worker polls the
//! queue, runs what it finds, and on an empty queue waits out the backoff
//! (cut short by the next push). After shutdown a worker keeps going until
//! it sees the queue empty, so everything enqueued before the signal gets
//! processed.
//!
//! Jobs are independent. A failed or panicking job is counted and logged and
//! the worker moves on. Two jobs for the same response both run; the later
//! write wins.

mod job;
mod queue;
mod state;

pub use job::*;

use std::panic::{self, AssertUnwindSafe};
use std::path::PathBuf;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use rayon::{ThreadPool, ThreadPoolBuilder};

use crate::engine::EditDistanceEngine;
use crate::error::{Error, Result};
use queue::JobQueue;
use state::SchedulerState;

/// Default wait between polls of an empty queue.
pub const DEFAULT_BACKOFF: Duration = Duration::from_millis(10);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SchedulerConfig {
    pub workers: usize,
    pub backoff: Duration,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            workers: thread::available_parallelism().map_or(1, |n| n.get()),
            backoff: DEFAULT_BACKOFF,
        }
    }
}

/// Outcome of one [`ComputationScheduler::run`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SchedulerReport {
    pub completed: usize,
    pub failed: usize,
}

impl SchedulerReport {
    pub fn total(&self) -> usize {
        self.completed + self.failed
    }
}

/// Fixed-size worker pool draining a shared job queue.
pub struct ComputationScheduler {
    engine: Arc<EditDistanceEngine>,
    config: SchedulerConfig,
    queue: Arc<JobQueue>,
    state: Arc<SchedulerState>,
    pool: ThreadPool,
}

impl ComputationScheduler {
    pub fn new(engine: EditDistanceEngine, config: SchedulerConfig) -> Result<Self> {
        if config.workers == 0 {
            return Err(Error::InvalidConfig("workers must be at least 1".into()));
        }

        let pool = ThreadPoolBuilder::new()
            .num_threads(config.workers)
            .thread_name(|i| format!("lzedit-worker-{}", i))
            .build()
            .map_err(|e| Error::InvalidConfig(format!("cannot start worker pool: {}", e)))?;

        Ok(Self {
            engine: Arc::new(engine),
            config,
            queue: Arc::new(JobQueue::new()),
            state: Arc::new(SchedulerState::new()),
            pool,
        })
    }

    pub fn config(&self) -> SchedulerConfig {
        self.config
    }

    /// A handle for producers. Cheap to clone and safe to send to other threads.
    pub fn handle(&self) -> SchedulerHandle {
        SchedulerHandle {
            queue: Arc::clone(&self.queue),
            state: Arc::clone(&self.state),
        }
    }

    /// Process jobs until shutdown is signalled and the queue is drained.
    ///
    /// Blocks the calling thread. Returns once every dispatched job has
    /// finished, so the in-flight count is zero on return.
    pub fn run(&self) -> SchedulerReport {
        let (completed_before, failed_before) = self.state.totals();
        tracing::info!(
            workers = self.config.workers,
            backoff_ms = self.config.backoff.as_millis() as u64,
            strategy = %self.engine.strategy(),
            "scheduler running"
        );

        self.pool.scope(|scope| {
            for worker in 0..self.config.workers {
                scope.spawn(move |_| self.worker_loop(worker));
            }
        });
        self.state.wait_idle();

        let (completed, failed) = self.state.totals();
        let report = SchedulerReport {
            completed: completed - completed_before,
            failed: failed - failed_before,
        };
        tracing::info!(
            completed = report.completed,
            failed = report.failed,
            "scheduler drained"
        );
        report
    }

    fn worker_loop(&self, worker: usize) {
        loop {
            if let Some(job) = self.queue.try_pop() {
                self.execute(worker, job);
                continue;
            }
            if self.state.is_shutdown() {
                // A job pushed before the signal must still be seen here
                match self.queue.try_pop() {
                    Some(job) => {
                        self.execute(worker, job);
                        continue;
                    }
                    None => break,
                }
            }
            self.queue.wait_for_job(self.config.backoff);
        }
        tracing::debug!(worker, "worker exiting");
    }

    fn execute(&self, worker: usize, job: Job) {
        let guard = self.state.dispatch();
        tracing::debug!(worker, job = %job, "dispatching job");

        match panic::catch_unwind(AssertUnwindSafe(|| self.engine.run(&job))) {
            Ok(Ok(_)) => guard.succeed(),
            Ok(Err(e)) if e.is_fatal() => {
                // Raised by this job's input against the engine's settings;
                // the job fails, the run continues
                tracing::error!(
                    worker,
                    job = %job,
                    kind = ?e.kind(),
                    error = %e,
                    "configuration error while running job"
                );
            }
            Ok(Err(e)) => {
                tracing::warn!(worker, job = %job, kind = ?e.kind(), "job failed");
            }
            Err(payload) => {
                let message = payload
                    .downcast_ref::<&str>()
                    .map(|s| s.to_string())
                    .or_else(|| payload.downcast_ref::<String>().cloned())
                    .unwrap_or_default();
                tracing::error!(worker, job = %job, panic = %message, "job panicked");
            }
        }
    }
}

impl std::fmt::Debug for ComputationScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComputationScheduler")
            .field("config", &self.config)
            .field("pending", &self.queue.len())
            .field("in_flight", &self.state.in_flight())
            .finish_non_exhaustive()
    }
}

/// Producer side of a scheduler.
#[derive(Clone, Debug)]
pub struct SchedulerHandle {
    queue: Arc<JobQueue>,
    state: Arc<SchedulerState>,
}

impl SchedulerHandle {
    /// Queue the history at `base_path/relative_path`. Never blocks.
    pub fn enqueue(&self, base_path: impl Into<PathBuf>, relative_path: impl Into<PathBuf>) {
        self.submit(Job::new(base_path, relative_path));
    }

    pub fn submit(&self, job: Job) {
        if self.state.is_shutdown() {
            tracing::warn!(job = %job, "job enqueued after shutdown; it runs only if a worker is still draining");
        }
        self.queue.push(job);
    }

    /// Signal that no more jobs will arrive. Cannot be undone.
    pub fn shutdown(&self) {
        self.state.request_shutdown();
        self.queue.wake_all();
    }

    pub fn is_shutdown(&self) -> bool {
        self.state.is_shutdown()
    }

    pub fn in_flight(&self) -> usize {
        self.state.in_flight()
    }

    /// Jobs waiting for a worker.
    pub fn pending(&self) -> usize {
        self.queue.len()
    }
}
