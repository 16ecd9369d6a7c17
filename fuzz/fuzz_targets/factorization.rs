// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target: factorization laws on arbitrary version histories.
//!
//! One list per version, each list covering exactly its version's content,
//! and the edit-distance record agreeing with the lists.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use lzedit::testing::version;
use lzedit::{CorpusAssembler, EditDistanceEngine, ResultStore, SuffixArrayStrategy};

#[derive(Arbitrary, Debug)]
struct Input {
    versions: Vec<Option<String>>,
    naive: bool,
}

fuzz_target!(|input: Input| {
    let total: usize = input.versions.iter().flatten().map(String::len).sum();
    if total > 2_048 {
        return;
    }

    let history: Vec<_> = input.versions.iter().map(|v| version(v.as_deref())).collect();
    let assembler = CorpusAssembler::new().with_strip_markup(false);
    let corpus = assembler.assemble(&history).expect("full alphabet never runs dry");

    let strategy = if input.naive {
        SuffixArrayStrategy::Naive
    } else {
        SuffixArrayStrategy::RankDoubling
    };
    let engine =
        EditDistanceEngine::new(strategy, ResultStore::new("unused")).with_assembler(assembler);
    // compute runs its own invariant checks and reports a violation as Err
    let result = engine.compute("fuzz", &history).expect("factorization invariants hold");

    if corpus.is_empty() {
        assert!(result.factorization.is_empty());
        assert_eq!(result.edit_distances, vec![0]);
        return;
    }
    assert_eq!(result.factorization.len(), corpus.version_count());
    assert_eq!(result.factorization.covered_lengths(), corpus.version_lengths());
    assert_eq!(result.edit_distances, result.factorization.phrase_counts());
    assert_eq!(result.max, result.edit_distances.iter().copied().max().unwrap_or(0));
});
