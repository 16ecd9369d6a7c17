// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Longest previous factor from a suffix array and its LCP array.
//!
//! `lpf[j]` is the length of the longest substring starting at `j` that also
//! starts somewhere before `j`. Matches may overlap `j` itself ("aaaa" gives
//! `lpf[1] = 3`), which is the self-referential LZ77 flavour, not a sliding
//! window.
//!
//! # Algorithm
//!
//! One left-to-right sweep over suffix array ranks with a stack of ranks
//! (Crochemore & Ilie). Popping `top` because the current suffix starts
//! earlier in the text means the best earlier match for `sa[top]` is on one of
//! its two sides in rank order, so `lpf[sa[top]] = max(lcp[top], lcp[i])`, and
//! the current entry inherits the smaller value for the comparisons still to
//! come. Popping because the current suffix starts later with a no-larger LCP
//! means nothing further right can beat `lcp[top]`.
//!
//! A virtual slot at rank `n` (position -1, LCP 0) flushes the stack, so
//! every position gets a value, including the lexicographically largest
//! suffix. Each rank is pushed and popped once: O(n).
//!
//! # References
//!
//! - Crochemore, Ilie (2008): "Computing Longest Previous Factor in linear time
//!   and applications"

/// Compute the LPF array.
///
/// Consumes `sa` and `lcp`: the sweep rewrites LCP entries in place, so the
/// buffers are meaningless afterwards. Clone them first if you need them.
pub fn longest_previous_factor(sa: Vec<usize>, lcp: Vec<usize>) -> Vec<usize> {
    let n = sa.len();
    debug_assert_eq!(lcp.len(), n, "LCP array length must match suffix array");

    let mut lpf = vec![0usize; n];
    if n == 0 {
        return lpf;
    }

    let mut lcp = lcp;
    lcp.push(0);
    let position = |rank: usize| -> isize {
        if rank == n {
            -1
        } else {
            sa[rank] as isize
        }
    };

    let mut stack: Vec<usize> = Vec::with_capacity(n);
    stack.push(0);

    for i in 1..=n {
        let current = position(i);
        while let Some(&top) = stack.last() {
            let stacked = position(top);
            if current < stacked {
                lpf[sa[top]] = lcp[top].max(lcp[i]);
                lcp[i] = lcp[top].min(lcp[i]);
            } else if current > stacked && lcp[i] <= lcp[top] {
                lpf[sa[top]] = lcp[top];
            } else {
                break;
            }
            stack.pop();
        }
        if i < n {
            stack.push(i);
        }
    }

    lpf
}
