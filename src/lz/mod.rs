// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! LZ77 over a versioned corpus: longest previous factors, then a greedy parse.
//!
//! The phrase count of a version is how many copy-or-literal steps it takes to
//! rebuild that version from everything before it. Few phrases means the
//! version mostly repeats earlier text; many means it introduced new material.

mod factorize;
mod lpf;

pub use factorize::*;
pub use lpf::*;
