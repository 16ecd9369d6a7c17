//! LCP and LPF property tests.
//!
//! - LCP equals the brute-force prefix of adjacent suffixes, `lcp[0] == 0`
//! - LPF is sound (every claimed match exists earlier) and maximal

use super::oracles::{oracle_common_prefix, oracle_lcp, oracle_lpf};
use lzedit::{lcp_array, longest_previous_factor, SuffixArrayStrategy};
use proptest::prelude::*;

fn text_strategy(max_len: usize) -> impl Strategy<Value = Vec<u32>> {
    prop::collection::vec(0u32..3, 0..max_len)
}

fn lpf_of(text: &[u32]) -> Vec<usize> {
    let sa = SuffixArrayStrategy::RankDoubling.build(text);
    let lcp = lcp_array(text, &sa);
    longest_previous_factor(sa, lcp)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn prop_lcp_matches_oracle(text in text_strategy(300)) {
        let sa = SuffixArrayStrategy::RankDoubling.build(&text);
        let lcp = lcp_array(&text, &sa);
        prop_assert_eq!(lcp.len(), text.len());
        if let Some(&first) = lcp.first() {
            prop_assert_eq!(first, 0);
        }
        prop_assert_eq!(lcp, oracle_lcp(&text, &sa));
    }

    #[test]
    fn prop_lpf_matches_oracle(text in text_strategy(80)) {
        prop_assert_eq!(lpf_of(&text), oracle_lpf(&text));
    }

    #[test]
    fn prop_lpf_sound_and_maximal(text in text_strategy(120)) {
        let lpf = lpf_of(&text);
        for (j, &length) in lpf.iter().enumerate() {
            let best = (0..j).map(|k| oracle_common_prefix(&text, k, j)).max().unwrap_or(0);
            // Sound: some earlier start matches `length` symbols
            if length > 0 {
                prop_assert!((0..j).any(|k| text[k..k + length] == text[j..j + length]));
            }
            // Maximal: nothing earlier matches more
            prop_assert_eq!(length, best, "position {}", j);
        }
    }

    #[test]
    fn prop_lpf_with_unique_terminator(mut text in text_strategy(100)) {
        // Assembled corpora end in a fresh separator
        text.push(0x11_0000);
        let lpf = lpf_of(&text);
        prop_assert_eq!(*lpf.last().unwrap(), 0);
        prop_assert_eq!(lpf[0], 0);
    }
}

#[test]
fn test_lpf_inputs_are_fresh_per_stage() {
    // Each stage can be probed on its own with fresh buffers
    let text: Vec<u32> = "abaababa".chars().map(u32::from).collect();
    let sa = SuffixArrayStrategy::Naive.build(&text);
    let lcp = lcp_array(&text, &sa);
    assert_eq!(lcp, oracle_lcp(&text, &sa));

    let lpf = longest_previous_factor(sa.clone(), lcp.clone());
    assert_eq!(lpf, vec![0, 0, 1, 3, 2, 3, 2, 1]);
    // Inputs we kept are untouched
    assert_eq!(lcp, oracle_lcp(&text, &sa));
}
