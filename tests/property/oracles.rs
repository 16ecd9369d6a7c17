//! Reference oracles for differential testing.
//!
//! Simple, obviously-correct implementations used as ground truth for the
//! linear-time ones. Quadratic or worse: keep inputs small.

use lzedit::Factorization;

// =============================================================================
// ORACLE IMPLEMENTATIONS
// =============================================================================

/// Compare two suffixes symbol by symbol; the shorter one wins a tie.
fn compare_suffixes(text: &[u32], a: usize, b: usize) -> std::cmp::Ordering {
    let (mut i, mut j) = (a, b);
    while i < text.len() && j < text.len() {
        match text[i].cmp(&text[j]) {
            std::cmp::Ordering::Equal => {
                i += 1;
                j += 1;
            }
            other => return other,
        }
    }
    (text.len() - i).cmp(&(text.len() - j))
}

/// Insertion sort of positions by suffix. O(n³) worst case.
pub fn oracle_suffix_array(text: &[u32]) -> Vec<usize> {
    let mut sa: Vec<usize> = Vec::with_capacity(text.len());
    for pos in 0..text.len() {
        let at = sa
            .iter()
            .position(|&other| compare_suffixes(text, pos, other).is_lt())
            .unwrap_or(sa.len());
        sa.insert(at, pos);
    }
    sa
}

pub fn oracle_common_prefix(text: &[u32], a: usize, b: usize) -> usize {
    text[a..]
        .iter()
        .zip(&text[b..])
        .take_while(|(x, y)| x == y)
        .count()
}

/// Pairwise LCP of adjacent suffixes.
pub fn oracle_lcp(text: &[u32], sa: &[usize]) -> Vec<usize> {
    (0..sa.len())
        .map(|i| {
            if i == 0 {
                0
            } else {
                oracle_common_prefix(text, sa[i - 1], sa[i])
            }
        })
        .collect()
}

/// Longest match against every earlier start. O(n³).
pub fn oracle_lpf(text: &[u32]) -> Vec<usize> {
    (0..text.len())
        .map(|j| {
            (0..j)
                .map(|k| oracle_common_prefix(text, k, j))
                .max()
                .unwrap_or(0)
        })
        .collect()
}

/// Greedy parse straight from the definition.
pub fn oracle_factorize(text: &[u32], separators: &[usize]) -> Factorization {
    let lpf = oracle_lpf(text);
    let mut versions: Vec<Vec<usize>> = vec![Vec::new()];
    let mut p = 0;
    while p + 1 < text.len() {
        let delta = lpf[p].max(1);
        if delta == 1 && separators.contains(&p) {
            versions.push(Vec::new());
        } else {
            versions.last_mut().unwrap().push(delta);
        }
        p += delta;
    }
    Factorization::new(versions)
}

// =============================================================================
// ORACLE SELF-TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::symbols;

    #[test]
    fn test_oracle_suffix_array_banana() {
        assert_eq!(oracle_suffix_array(&symbols("banana")), vec![5, 3, 1, 0, 4, 2]);
    }

    #[test]
    fn test_oracle_lcp_banana() {
        let text = symbols("banana");
        let sa = oracle_suffix_array(&text);
        assert_eq!(oracle_lcp(&text, &sa), vec![0, 1, 3, 0, 0, 2]);
    }

    #[test]
    fn test_oracle_lpf() {
        assert_eq!(oracle_lpf(&symbols("abab")), vec![0, 0, 2, 1]);
        assert_eq!(oracle_lpf(&symbols("aaaa")), vec![0, 3, 2, 1]);
        assert!(oracle_lpf(&[]).is_empty());
    }
}
