// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Longest-common-prefix array in linear time (Kasai et al.).
//!
//! Walk positions in text order, not suffix array order. If the suffix at `i`
//! shares `l` symbols with its suffix-array predecessor, the suffix at `i + 1`
//! shares at least `l - 1` with its own predecessor. So the running match
//! length drops by at most one per step and only grows by direct comparison,
//! which bounds the total work at O(n).
//!
//! # References
//!
//! - Kasai, Lee, Arimura, Arikawa, Park (2001): "Linear-Time Longest-Common-Prefix
//!   Computation in Suffix Arrays and Its Applications"

/// `lcp[i]` = common prefix length of the suffixes at `sa[i - 1]` and `sa[i]`;
/// `lcp[0] = 0`.
pub fn lcp_array(text: &[u32], sa: &[usize]) -> Vec<usize> {
    let n = text.len();
    debug_assert_eq!(sa.len(), n, "suffix array length must match text length");

    let mut rank = vec![0usize; n];
    for (i, &pos) in sa.iter().enumerate() {
        rank[pos] = i;
    }

    let mut lcp = vec![0usize; n];
    let mut l = 0usize;
    for i in 0..n {
        if rank[i] == 0 {
            // Smallest suffix has no predecessor
            l = 0;
            continue;
        }
        let j = sa[rank[i] - 1];
        while i + l < n && j + l < n && text[i + l] == text[j + l] {
            l += 1;
        }
        lcp[rank[i]] = l;
        l = l.saturating_sub(1);
    }

    lcp
}

/// Number of leading symbols two slices share.
pub fn common_prefix_len(a: &[u32], b: &[u32]) -> usize {
    a.iter().zip(b).take_while(|(x, y)| x == y).count()
}
