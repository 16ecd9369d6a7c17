//! Suffix array property tests.
//!
//! - Strategy equivalence: naive and rank doubling agree everywhere
//! - Both agree with an independent insertion-sort oracle
//! - The result is a permutation sorted by suffix

use super::common::symbols;
use super::oracles::oracle_suffix_array;
use lzedit::{naive_suffix_array, rank_doubling_suffix_array, SuffixArrayStrategy};
use proptest::prelude::*;

// ============================================================================
// STRATEGIES
// ============================================================================

/// Symbols from a tiny alphabet, so suffixes share long prefixes.
fn small_alphabet_text(max_len: usize) -> impl Strategy<Value = Vec<u32>> {
    prop::collection::vec(0u32..3, 0..max_len)
}

/// Text symbols mixed with separator-range symbols.
fn mixed_text() -> impl Strategy<Value = Vec<u32>> {
    prop::collection::vec(
        prop_oneof![
            4 => (0x61u32..0x65),
            1 => (0x11_0000u32..0x11_0004),
            1 => Just(u32::MAX),
        ],
        0..300,
    )
}

/// Periodic text like "abcabcabc...", the hard case for prefix doubling.
fn periodic_text() -> impl Strategy<Value = Vec<u32>> {
    (prop::collection::vec(0u32..4, 1..5), 1usize..60)
        .prop_map(|(period, reps)| period.iter().copied().cycle().take(period.len() * reps).collect())
}

// ============================================================================
// PROPERTIES
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn prop_strategies_agree(text in small_alphabet_text(400)) {
        prop_assert_eq!(naive_suffix_array(&text), rank_doubling_suffix_array(&text));
    }

    #[test]
    fn prop_strategies_agree_on_mixed_symbols(text in mixed_text()) {
        prop_assert_eq!(naive_suffix_array(&text), rank_doubling_suffix_array(&text));
    }

    #[test]
    fn prop_strategies_agree_on_periodic_text(text in periodic_text()) {
        prop_assert_eq!(naive_suffix_array(&text), rank_doubling_suffix_array(&text));
    }

    #[test]
    fn prop_matches_oracle(text in small_alphabet_text(60)) {
        let expected = oracle_suffix_array(&text);
        for strategy in SuffixArrayStrategy::ALL {
            prop_assert_eq!(strategy.build(&text), expected.clone());
        }
    }

    #[test]
    fn prop_sorted_permutation(text in small_alphabet_text(200)) {
        let sa = rank_doubling_suffix_array(&text);

        let mut seen = sa.clone();
        seen.sort_unstable();
        prop_assert_eq!(seen, (0..text.len()).collect::<Vec<_>>());

        for pair in sa.windows(2) {
            prop_assert!(text[pair[0]..] < text[pair[1]..]);
        }
    }

    #[test]
    fn prop_unicode_text(text in "\\PC{0,80}") {
        let text = symbols(&text);
        prop_assert_eq!(naive_suffix_array(&text), rank_doubling_suffix_array(&text));
    }
}

// ============================================================================
// EDGE CASES
// ============================================================================

#[test]
fn test_empty_and_single() {
    for strategy in SuffixArrayStrategy::ALL {
        assert!(strategy.build(&[]).is_empty());
        assert_eq!(strategy.build(&[7]), vec![0]);
    }
}

#[test]
fn test_all_identical_long() {
    let text = vec![42u32; 2_000];
    let expected: Vec<usize> = (0..text.len()).rev().collect();
    assert_eq!(rank_doubling_suffix_array(&text), expected);
    assert_eq!(naive_suffix_array(&text), expected);
}

#[test]
fn test_random_text_a_few_thousand_long() {
    // Deterministic LCG so the case is reproducible without proptest
    let mut state = 0x2545_f491_u64;
    let text: Vec<u32> = (0..3_000)
        .map(|_| {
            state = state.wrapping_mul(6_364_136_223_846_793_005).wrapping_add(1);
            ((state >> 33) % 4) as u32
        })
        .collect();
    assert_eq!(naive_suffix_array(&text), rank_doubling_suffix_array(&text));
}

#[test]
fn test_separators_sort_after_text() {
    let mut text = symbols("zz");
    text.push(0x11_0000);
    text.extend(symbols("a"));
    // a < zz¹a < z¹a < ¹a: separators are larger than every char
    let sa = rank_doubling_suffix_array(&text);
    assert_eq!(sa, vec![3, 0, 1, 2]);
}
