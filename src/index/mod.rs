// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Suffix structures over a corpus: the suffix array and its LCP array.
//!
//! Both are plain `Vec<usize>` buffers owned by whoever built them. The LZ
//! stage consumes them afterwards, so nothing here hands out shared state.

mod lcp;
mod suffix_array;

pub use lcp::*;
pub use suffix_array::*;
