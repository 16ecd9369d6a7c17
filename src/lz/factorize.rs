// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Greedy LZ77 factorization driven by the LPF array.
//!
//! ```text
//! corpus:  a b a b ¹ a b a b a b ²      (¹ ² = separators)
//! lpf:     0 0 2 1 0 4 3 4 3 2 1 0
//!
//! p=0  a      phrase 1
//! p=1  b      phrase 1
//! p=2  ab     phrase 2
//! p=4  ¹      new version
//! p=5  abab   phrase 4
//! p=9  ab     phrase 2
//! p=11        stop (final separator is never consumed)
//!
//! factorization: [[1, 1, 2], [4, 2]]
//! ```

use serde::{Deserialize, Serialize};

/// Phrase lengths per version, in version order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Factorization(Vec<Vec<usize>>);

impl Factorization {
    pub fn new(versions: Vec<Vec<usize>>) -> Self {
        Self(versions)
    }

    /// Number of versions (inner lists).
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Phrase lengths of one version.
    pub fn version(&self, index: usize) -> Option<&[usize]> {
        self.0.get(index).map(Vec::as_slice)
    }

    pub fn versions(&self) -> impl Iterator<Item = &[usize]> {
        self.0.iter().map(Vec::as_slice)
    }

    /// Phrase count per version: the edit distance proxy.
    pub fn phrase_counts(&self) -> Vec<usize> {
        self.0.iter().map(Vec::len).collect()
    }

    /// Symbols covered per version.
    pub fn covered_lengths(&self) -> Vec<usize> {
        self.0.iter().map(|phrases| phrases.iter().sum()).collect()
    }

    pub fn into_inner(self) -> Vec<Vec<usize>> {
        self.0
    }

    /// Split a version's text into the phrases its lengths describe.
    ///
    /// Lengths count chars. Phrases running past the end of `text` are cut
    /// short; extra text after the last phrase is dropped.
    pub fn phrases<'a>(&self, index: usize, text: &'a str) -> Vec<&'a str> {
        let Some(lengths) = self.version(index) else {
            return Vec::new();
        };

        // Char boundaries after the first; `nth(k - 1)` is k chars ahead.
        let mut boundaries = text.char_indices().map(|(i, _)| i).chain([text.len()]).skip(1);
        let mut phrases = Vec::with_capacity(lengths.len());
        let mut start = 0usize;

        for &length in lengths {
            if start >= text.len() {
                break;
            }
            let end = boundaries
                .by_ref()
                .nth(length.max(1) - 1)
                .unwrap_or(text.len());
            phrases.push(&text[start..end]);
            start = end;
        }

        phrases
    }
}

impl From<Vec<Vec<usize>>> for Factorization {
    fn from(versions: Vec<Vec<usize>>) -> Self {
        Self(versions)
    }
}

/// Factorize a corpus given its LPF array and sorted separator offsets.
///
/// A phrase at `p` is `max(1, lpf[p])` symbols long. A length-1 step onto a
/// separator opens the next version instead of emitting a phrase. The sweep
/// stops at `n - 1`, so a trailing separator closes nothing: for an assembled
/// corpus the result has exactly one list per version.
pub fn factorize(lpf: &[usize], separators: &[usize]) -> Factorization {
    debug_assert!(
        separators.windows(2).all(|w| w[0] < w[1]),
        "separator offsets must be strictly increasing"
    );

    let n = lpf.len();
    let mut versions: Vec<Vec<usize>> = vec![Vec::new()];
    let mut p = 0usize;

    while p + 1 < n {
        let delta = lpf[p].max(1);
        if delta == 1 && separators.binary_search(&p).is_ok() {
            versions.push(Vec::new());
        } else if let Some(current) = versions.last_mut() {
            current.push(delta);
        }
        p += delta;
    }

    Factorization(versions)
}
