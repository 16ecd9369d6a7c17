// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Runtime contracts between pipeline stages.
//!
//! Debug-mode assertions called between stages of the factorization
//! pipeline. They compile to nothing in release builds, where the engine's
//! own result checks (list count, covered lengths) still run.
//!
//! | Contract Function               | Checked after                 |
//! |---------------------------------|-------------------------------|
//! | `check_separators_valid`        | corpus assembly               |
//! | `check_suffix_array_permutation`| suffix array construction     |
//! | `check_suffix_array_sorted`     | suffix array (small inputs)   |
//! | `check_lcp_len`                 | LCP construction              |
//! | `check_lpf_bounds`              | LPF construction              |
//!
//! # Usage
//!
//! ```ignore
//! use lzedit::contracts::*;
//!
//! let sa = strategy.build(&text);
//! check_suffix_array_permutation(&sa, text.len());
//! ```

use crate::corpus::is_separator;

/// Above this length the sortedness check is skipped: it is quadratic.
const SORTED_CHECK_LIMIT: usize = 2_048;

// ============================================================================
// CORPUS CONTRACTS
// ============================================================================

/// Separator offsets are strictly increasing and point at separator symbols.
#[inline]
pub fn check_separators_valid(text: &[u32], separators: &[usize]) {
    debug_assert!(
        separators.windows(2).all(|w| w[0] < w[1]),
        "Contract violation: separator offsets not strictly increasing: {:?}",
        separators
    );
    for &offset in separators {
        debug_assert!(
            text.get(offset).copied().is_some_and(is_separator),
            "Contract violation: offset {} is not a separator (corpus length {})",
            offset,
            text.len()
        );
    }
}

// ============================================================================
// SUFFIX ARRAY CONTRACTS
// ============================================================================

/// `sa` is a permutation of `0..n`.
#[inline]
pub fn check_suffix_array_permutation(sa: &[usize], n: usize) {
    debug_assert_eq!(
        sa.len(),
        n,
        "Contract violation: suffix array has {} entries for {} symbols",
        sa.len(),
        n
    );
    if cfg!(debug_assertions) {
        let mut seen = vec![false; n];
        for (i, &pos) in sa.iter().enumerate() {
            assert!(
                pos < n && !seen[pos],
                "Contract violation: suffix_array[{}] = {} is out of range or repeated",
                i,
                pos
            );
            seen[pos] = true;
        }
    }
}

/// Adjacent suffixes are in order. Only checked for small inputs.
#[inline]
pub fn check_suffix_array_sorted(text: &[u32], sa: &[usize]) {
    if !cfg!(debug_assertions) || text.len() > SORTED_CHECK_LIMIT {
        return;
    }
    for i in 1..sa.len() {
        assert!(
            text[sa[i - 1]..] < text[sa[i]..],
            "Contract violation: suffix_array[{}] = {} sorts after suffix_array[{}] = {}",
            i - 1,
            sa[i - 1],
            i,
            sa[i]
        );
    }
}

// ============================================================================
// LCP / LPF CONTRACTS
// ============================================================================

#[inline]
pub fn check_lcp_len(lcp: &[usize], n: usize) {
    debug_assert_eq!(
        lcp.len(),
        n,
        "Contract violation: LCP array has {} entries for {} symbols",
        lcp.len(),
        n
    );
    debug_assert!(
        lcp.first().map_or(true, |&first| first == 0),
        "Contract violation: lcp[0] must be 0"
    );
}

/// A previous factor at `j` never runs past the end: `j + lpf[j] <= n`.
/// Also `lpf[0] == 0`, since nothing precedes the first position.
#[inline]
pub fn check_lpf_bounds(lpf: &[usize]) {
    let n = lpf.len();
    debug_assert!(
        lpf.first().map_or(true, |&first| first == 0),
        "Contract violation: lpf[0] = {} but nothing precedes position 0",
        lpf[0]
    );
    for (j, &length) in lpf.iter().enumerate() {
        debug_assert!(
            j + length <= n,
            "Contract violation: lpf[{}] = {} runs past corpus end {}",
            j,
            length,
            n
        );
    }
}
