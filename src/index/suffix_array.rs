// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Suffix array construction over a symbol sequence.
//!
//! Two strategies with one contract: `sa[i]` is the start of the i-th smallest
//! suffix, where a suffix that is a proper prefix of another sorts first (as if
//! every suffix ended in a sentinel smaller than all symbols). Slice ordering in
//! Rust already behaves this way, which is what makes the naive strategy a
//! one-liner and a good oracle.
//!
//! # Rank doubling
//!
//! ```text
//! Input: "abab"
//!
//! k=2   keys (s[i], s[i+1])        sorted        ranks by position
//!       0:(a,b) 1:(b,a) 2:(a,b)    0:(a,b)       [1, 3, 1, 2]
//!       3:(b,$)                    2:(a,b)
//!                                  3:(b,$)
//!                                  1:(b,a)
//!
//! k=4   keys (rank[i], rank[i+2])  sorted        ranks by position
//!       0:(1,1) 1:(3,2) 2:(1,0)    2:(1,0)       [2, 4, 1, 3]
//!       3:(2,0)                    0:(1,1)       all distinct: done
//!                                  3:(2,0)
//!                                  1:(3,2)
//!
//! Output: [2, 0, 3, 1]
//! ```
//!
//! Ranks start at 1 so that 0 can mean "past the end". Each round sorts by a key
//! twice as long as the last, so at most ⌈log₂ n⌉ rounds of an O(n log n) sort.

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Selects how a suffix array is built.
///
/// Chosen once at configuration time from its name; callers never match on
/// strings after that.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SuffixArrayStrategy {
    /// Comparison sort of whole suffixes. Test oracle, small inputs only.
    Naive,
    /// Prefix doubling with rank compression, O(n log² n).
    #[default]
    RankDoubling,
}

impl SuffixArrayStrategy {
    pub const ALL: [SuffixArrayStrategy; 2] =
        [SuffixArrayStrategy::Naive, SuffixArrayStrategy::RankDoubling];

    /// Build the suffix array of `text` with this strategy.
    pub fn build(self, text: &[u32]) -> Vec<usize> {
        match self {
            SuffixArrayStrategy::Naive => naive_suffix_array(text),
            SuffixArrayStrategy::RankDoubling => rank_doubling_suffix_array(text),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            SuffixArrayStrategy::Naive => "naive",
            SuffixArrayStrategy::RankDoubling => "improved",
        }
    }
}

impl FromStr for SuffixArrayStrategy {
    type Err = Error;

    fn from_str(name: &str) -> Result<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "naive" => Ok(SuffixArrayStrategy::Naive),
            "improved" | "rank-doubling" | "rank_doubling" => Ok(SuffixArrayStrategy::RankDoubling),
            _ => Err(Error::UnknownAlgorithm(name.to_string())),
        }
    }
}

impl fmt::Display for SuffixArrayStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Sort every start position by the suffix it begins.
///
/// Each comparison may walk the whole text, so this is O(n² log n) in the
/// worst case (all-equal input). Fine for tests, not for real histories.
pub fn naive_suffix_array(text: &[u32]) -> Vec<usize> {
    let mut sa: Vec<usize> = (0..text.len()).collect();
    sa.sort_unstable_by(|&a, &b| text[a..].cmp(&text[b..]));
    sa
}

/// Prefix-doubling construction.
pub fn rank_doubling_suffix_array(text: &[u32]) -> Vec<usize> {
    let n = text.len();
    let mut sa: Vec<usize> = (0..n).collect();
    if n == 0 {
        return sa;
    }

    // Length-2 keys from the symbols themselves, shifted so 0 stays free.
    let mut keys: Vec<(u64, u64)> = (0..n)
        .map(|i| {
            let first = u64::from(text[i]) + 1;
            let second = text.get(i + 1).map_or(0, |&c| u64::from(c) + 1);
            (first, second)
        })
        .collect();
    let mut rank = vec![0u64; n];
    let mut k = 2;

    loop {
        sa.sort_unstable_by_key(|&i| keys[i]);
        let distinct = assign_ranks(&sa, &keys, &mut rank);

        // Keys of length k >= n already separate every suffix.
        if distinct == n || k >= n {
            break;
        }

        for i in 0..n {
            let tail = if i + k < n { rank[i + k] } else { 0 };
            keys[i] = (rank[i], tail);
        }
        k *= 2;
    }

    sa
}

/// Renumber positions in sorted order: equal keys share a rank, otherwise the
/// rank strictly increases. Returns the number of distinct ranks.
fn assign_ranks(sa: &[usize], keys: &[(u64, u64)], rank: &mut [u64]) -> usize {
    let mut current = 1u64;
    rank[sa[0]] = current;
    for pair in sa.windows(2) {
        if keys[pair[1]] != keys[pair[0]] {
            current += 1;
        }
        rank[pair[1]] = current;
    }
    current as usize
}
