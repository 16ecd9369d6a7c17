// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Test utilities shared across unit and integration tests.
//!
//! This module is always compiled but hidden from documentation.

#![doc(hidden)]

use std::fs;
use std::path::{Path, PathBuf};

use crate::history::{Changes, ResponseId, VersionRecord};
use crate::index::{lcp_array, SuffixArrayStrategy};
use crate::lz::{factorize, longest_previous_factor, Factorization};

/// A snapshot with the given content and no timestamp.
pub fn version(content: Option<&str>) -> VersionRecord {
    VersionRecord {
        timestamp: None,
        changes: Changes {
            content: content.map(str::to_string),
        },
    }
}

/// A history with one snapshot per entry, timestamped a minute apart.
pub fn history(contents: &[Option<&str>]) -> Vec<VersionRecord> {
    contents
        .iter()
        .enumerate()
        .map(|(minute, content)| VersionRecord {
            timestamp: Some(format!("2024-03-01T10:{:02}:00.000+01:00", minute % 60)),
            ..version(*content)
        })
        .collect()
}

/// Write a history file for `id` under `root` and return its path.
pub fn write_history(root: &Path, id: ResponseId, contents: &[Option<&str>]) -> PathBuf {
    let path = root.join(id.relative_path());
    fs::create_dir_all(path.parent().expect("history path has a parent"))
        .expect("create history directories");
    let json = serde_json::to_vec(&history(contents)).expect("serialize history");
    fs::write(&path, json).expect("write history file");
    path
}

/// Symbols for a plain string, one per char.
pub fn symbols(text: &str) -> Vec<u32> {
    text.chars().map(u32::from).collect()
}

/// Run the full pipeline over raw symbols.
pub fn factorize_symbols(
    text: &[u32],
    separators: &[usize],
    strategy: SuffixArrayStrategy,
) -> Factorization {
    let sa = strategy.build(text);
    let lcp = lcp_array(text, &sa);
    let lpf = longest_previous_factor(sa, lcp);
    factorize(&lpf, separators)
}
