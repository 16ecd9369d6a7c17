// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Edit distances between versions of a document, via LZ77 factorization.
//!
//! A response's version history is concatenated into one symbol sequence,
//! with a fresh separator after every version. The greedy LZ77 parse of that
//! sequence, computed from its suffix array, splits each version into
//! phrases that are either copied from earlier text or brand new. The phrase
//! count of a version approximates how much it changed.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌──────────────┐     ┌─────────────┐     ┌────────────┐
//! │ history.rs  │────▶│  corpus/     │────▶│  index/     │────▶│   lz/      │
//! │ (Version-   │     │ (assemble,   │     │ (suffix     │     │ (LPF,      │
//! │  Record)    │     │  separators) │     │  array, LCP)│     │  factorize)│
//! └─────────────┘     └──────────────┘     └─────────────┘     └────────────┘
//!        ▲                                                            │
//!        │                  ┌──────────────┐     ┌─────────────┐      ▼
//!        └──────────────────│  engine.rs   │────▶│  record.rs  │◀── result
//!                           │ (one job)    │     │ (store)     │
//!                           └──────────────┘     └─────────────┘
//!                                  ▲
//!                           ┌──────────────┐
//!                           │ scheduler/   │  queue, workers, drain
//!                           └──────────────┘
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use lzedit::{Config, ComputationScheduler, Job};
//!
//! let config = Config::load(path)?.validate()?;
//! let scheduler = ComputationScheduler::new(config.engine(), config.scheduler)?;
//! let handle = scheduler.handle();
//! handle.enqueue(&config.responses_dir, "12/3/45/6789.json");
//! handle.shutdown();
//! let report = scheduler.run();
//! ```

// Module declarations
pub mod config;
pub mod contracts;
pub mod corpus;
mod engine;
pub mod error;
pub mod history;
mod index;
mod lz;
pub mod record;
pub mod scheduler;
pub mod testing;

// Re-exports for public API
pub use config::{Config, ValidatedConfig};
pub use corpus::{Corpus, CorpusAssembler, SeparatorAlphabet};
pub use engine::EditDistanceEngine;
pub use error::{Error, ErrorKind, Result};
pub use history::{discover_responses, HistorySource, JsonHistorySource, ResponseId, VersionRecord};
pub use index::{
    common_prefix_len, lcp_array, naive_suffix_array, rank_doubling_suffix_array,
    SuffixArrayStrategy,
};
pub use lz::{factorize, longest_previous_factor, Factorization};
pub use record::{reconcile, EditDistanceResult, ResultStore};
pub use scheduler::{
    ComputationScheduler, Job, SchedulerConfig, SchedulerHandle, SchedulerReport,
};
