//! Factorization property tests over assembled corpora.
//!
//! - Reconstruction: phrases and separators tile the corpus exactly
//! - Every phrase longer than one symbol is a copy of earlier text
//! - One phrase list per version, none crossing a version boundary
//! - The fast pipeline agrees with the greedy oracle

use super::common::{assemble, factorize_symbols};
use super::oracles::oracle_factorize;
use lzedit::{EditDistanceResult, SuffixArrayStrategy};
use proptest::prelude::*;

// ============================================================================
// STRATEGIES
// ============================================================================

/// A version history: some versions absent, the rest over a small alphabet.
fn history_strategy() -> impl Strategy<Value = Vec<Option<String>>> {
    prop::collection::vec(
        prop::option::weighted(0.8, prop::string::string_regex("[ab c]{0,40}").unwrap()),
        0..6,
    )
}

/// Histories where each version edits the previous one a little.
fn evolving_history() -> impl Strategy<Value = Vec<Option<String>>> {
    (
        prop::string::string_regex("[a-e ]{5,40}").unwrap(),
        prop::collection::vec(prop::string::string_regex("[a-e]{0,4}").unwrap(), 1..5),
    )
        .prop_map(|(base, edits)| {
            let mut current = base;
            let mut versions = vec![Some(current.clone())];
            for edit in edits {
                let at = current.len() / 2;
                current.insert_str(at, &edit);
                versions.push(Some(current.clone()));
            }
            versions
        })
}

// ============================================================================
// PROPERTIES
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn prop_phrases_reconstruct_corpus(versions in history_strategy()) {
        let corpus = assemble(&versions);
        let text = corpus.symbols();
        let f = factorize_symbols(text, corpus.separators(), SuffixArrayStrategy::RankDoubling);
        if text.is_empty() {
            return Ok(());
        }

        let mut rebuilt: Vec<u32> = Vec::with_capacity(text.len());
        let mut pos = 0;
        for (index, phrases) in f.versions().enumerate() {
            for &length in phrases {
                let phrase = &text[pos..pos + length];
                if length > 1 {
                    // A copy: the same symbols start somewhere earlier
                    prop_assert!((0..pos).any(|k| text[k..].starts_with(phrase)));
                }
                rebuilt.extend_from_slice(phrase);
                pos += length;
            }
            prop_assert_eq!(pos, corpus.separators()[index]);
            rebuilt.push(text[pos]);
            pos += 1;
        }
        prop_assert_eq!(rebuilt.as_slice(), text);
    }

    #[test]
    fn prop_one_list_per_version(versions in history_strategy()) {
        let corpus = assemble(&versions);
        let f = factorize_symbols(corpus.symbols(), corpus.separators(), SuffixArrayStrategy::RankDoubling);
        if corpus.is_empty() {
            prop_assert_eq!(f.len(), 1);
        } else {
            prop_assert_eq!(f.len(), corpus.version_count());
            prop_assert_eq!(f.covered_lengths(), corpus.version_lengths().to_vec());
        }
    }

    #[test]
    fn prop_matches_greedy_oracle(versions in history_strategy()) {
        let corpus = assemble(&versions);
        for strategy in SuffixArrayStrategy::ALL {
            let f = factorize_symbols(corpus.symbols(), corpus.separators(), strategy);
            prop_assert_eq!(f, oracle_factorize(corpus.symbols(), corpus.separators()));
        }
    }

    #[test]
    fn prop_repeated_version_is_one_phrase(text in "[a-z ]{1,60}", copies in 2usize..4) {
        let versions = vec![Some(text.clone()); copies];
        let corpus = assemble(&versions);
        let f = factorize_symbols(corpus.symbols(), corpus.separators(), SuffixArrayStrategy::RankDoubling);
        for index in 1..copies {
            prop_assert_eq!(f.version(index), Some(&[text.len()][..]));
        }
    }

    #[test]
    fn prop_small_edits_stay_small(versions in evolving_history()) {
        let corpus = assemble(&versions);
        let f = factorize_symbols(corpus.symbols(), corpus.separators(), SuffixArrayStrategy::RankDoubling);
        let result = EditDistanceResult::from_factorization(f);
        // An insertion costs at most: copy prefix, new symbols, copy suffix
        for &distance in &result.edit_distances[1..] {
            prop_assert!(distance <= 2 + 4, "distance {}", distance);
        }
        prop_assert_eq!(result.max, *result.edit_distances.iter().max().unwrap());
    }
}
