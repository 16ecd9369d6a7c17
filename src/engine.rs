// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! One response in, one result record out.
//!
//! ```text
//! history ──▶ assemble ──▶ suffix array ──▶ LCP ──▶ LPF ──▶ factorize
//!                │                                              │
//!                └── n = 0: empty record                        ▼
//!                                                   check ──▶ persist
//! ```
//!
//! Every buffer belongs to the single call that built it; the engine itself
//! is immutable and shared by all workers. A failure at any stage leaves the
//! store untouched: the record is only written once the result has passed
//! its checks, and the write itself is atomic.

use std::path::PathBuf;
use std::sync::Arc;

use crate::contracts::{
    check_lcp_len, check_lpf_bounds, check_separators_valid, check_suffix_array_permutation,
    check_suffix_array_sorted,
};
use crate::corpus::CorpusAssembler;
use crate::error::{Error, Result};
use crate::history::{HistorySource, JsonHistorySource, VersionRecord};
use crate::index::{lcp_array, SuffixArrayStrategy};
use crate::lz::{factorize, longest_previous_factor, Factorization};
use crate::record::{EditDistanceResult, ResultStore};
use crate::scheduler::Job;

/// Computes and stores edit distances for responses.
#[derive(Clone)]
pub struct EditDistanceEngine {
    strategy: SuffixArrayStrategy,
    assembler: CorpusAssembler,
    source: Arc<dyn HistorySource>,
    store: ResultStore,
}

impl EditDistanceEngine {
    /// An engine reading JSON histories and writing into `store`.
    pub fn new(strategy: SuffixArrayStrategy, store: ResultStore) -> Self {
        Self {
            strategy,
            assembler: CorpusAssembler::default(),
            source: Arc::new(JsonHistorySource),
            store,
        }
    }

    pub fn with_assembler(mut self, assembler: CorpusAssembler) -> Self {
        self.assembler = assembler;
        self
    }

    pub fn with_source(mut self, source: Arc<dyn HistorySource>) -> Self {
        self.source = source;
        self
    }

    pub fn strategy(&self) -> SuffixArrayStrategy {
        self.strategy
    }

    pub fn assembler(&self) -> &CorpusAssembler {
        &self.assembler
    }

    pub fn store(&self) -> &ResultStore {
        &self.store
    }

    /// Factorize one history without touching the store.
    ///
    /// `response` only labels errors and log lines.
    pub fn compute(&self, response: &str, history: &[VersionRecord]) -> Result<EditDistanceResult> {
        let corpus = self.assembler.assemble(history)?;
        if corpus.is_empty() {
            tracing::debug!(response, "no version has content");
            return Ok(EditDistanceResult::empty());
        }

        let n = corpus.len();
        let versions = corpus.version_count();
        let lengths = corpus.version_lengths().to_vec();
        check_separators_valid(corpus.symbols(), corpus.separators());
        tracing::debug!(response, versions, symbols = n, strategy = %self.strategy, "assembled corpus");

        let (text, separators) = corpus.into_parts();
        let sa = self.strategy.build(&text);
        check_suffix_array_permutation(&sa, n);
        check_suffix_array_sorted(&text, &sa);

        let lcp = lcp_array(&text, &sa);
        check_lcp_len(&lcp, n);

        let lpf = longest_previous_factor(sa, lcp);
        check_lpf_bounds(&lpf);

        let factorization = factorize(&lpf, &separators);
        check_factorization(response, &factorization, versions, &lengths)?;

        Ok(EditDistanceResult::from_factorization(factorization))
    }

    /// Load, compute and persist the record for one job.
    ///
    /// Returns where the record was written. Failures are logged here with
    /// the job's paths and returned to the caller.
    pub fn run(&self, job: &Job) -> Result<PathBuf> {
        let source = job.source_path();
        self.run_inner(job).map_err(|e| {
            tracing::error!(
                job = %job,
                source = %source.display(),
                kind = ?e.kind(),
                error = %e,
                "edit distance computation failed"
            );
            e
        })
    }

    fn run_inner(&self, job: &Job) -> Result<PathBuf> {
        let id = job.response_id()?;
        let source = job.source_path();
        let response = id.to_string();
        tracing::info!(response = %response, source = %source.display(), "computing edit distances");

        let history = self.source.load(&source)?;
        let result = self.compute(&response, &history)?;
        let destination = self.store.write(&id, &result)?;

        tracing::info!(
            response = %response,
            destination = %destination.display(),
            versions = result.edit_distances.len(),
            max = result.max,
            "stored edit distances"
        );
        Ok(destination)
    }
}

impl std::fmt::Debug for EditDistanceEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditDistanceEngine")
            .field("strategy", &self.strategy)
            .field("assembler", &self.assembler)
            .field("store", &self.store)
            .finish_non_exhaustive()
    }
}

/// One list per version, each covering exactly that version's content.
fn check_factorization(
    response: &str,
    factorization: &Factorization,
    versions: usize,
    lengths: &[usize],
) -> Result<()> {
    let violation = |detail: String| Error::InvariantViolation {
        response: response.to_string(),
        detail,
    };

    if factorization.len() != versions {
        return Err(violation(format!(
            "{} phrase lists for {} versions",
            factorization.len(),
            versions
        )));
    }

    let covered = factorization.covered_lengths();
    if let Some(index) = covered.iter().zip(lengths).position(|(c, l)| c != l) {
        return Err(violation(format!(
            "version {} phrases cover {} symbols, content has {}",
            index, covered[index], lengths[index]
        )));
    }

    Ok(())
}
