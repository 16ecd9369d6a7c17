// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The version-history store, as far as this crate needs it.
//!
//! A fetcher (not part of this crate) writes one JSON file per response at
//! `<root>/<collection>/<group>/<item>/<response>.json`, holding the ordered
//! list of snapshots. We only ever read those files.

use std::fmt;
use std::fs;
use std::path::{Component, Path, PathBuf};

use serde::{Deserialize, Serialize};
use walkdir::WalkDir;

use crate::error::{Error, Result};

/// Extension of history and result files.
pub const RECORD_EXTENSION: &str = "json";

/// Four-level identity of one response.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ResponseId {
    pub collection_id: u64,
    pub group_id: u64,
    pub item_id: u64,
    pub response_id: u64,
}

impl ResponseId {
    pub fn new(collection_id: u64, group_id: u64, item_id: u64, response_id: u64) -> Self {
        Self {
            collection_id,
            group_id,
            item_id,
            response_id,
        }
    }

    /// Parse `c/g/i/r.json`.
    pub fn from_relative_path(path: &Path) -> Result<Self> {
        let invalid = || Error::InvalidJobPath(path.to_path_buf());

        if path.extension().and_then(|e| e.to_str()) != Some(RECORD_EXTENSION) {
            return Err(invalid());
        }

        let stem = path.with_extension("");
        let parts = stem
            .components()
            .map(|c| match c {
                Component::Normal(part) => part.to_str().ok_or_else(invalid),
                _ => Err(invalid()),
            })
            .collect::<Result<Vec<&str>>>()?;

        let [c, g, i, r] = parts[..] else {
            return Err(invalid());
        };
        let id = |s: &str| s.parse::<u64>().map_err(|_| invalid());
        Ok(Self::new(id(c)?, id(g)?, id(i)?, id(r)?))
    }

    /// `c/g/i/r.json`, relative to a store root.
    pub fn relative_path(&self) -> PathBuf {
        PathBuf::from(self.collection_id.to_string())
            .join(self.group_id.to_string())
            .join(self.item_id.to_string())
            .join(format!("{}.{}", self.response_id, RECORD_EXTENSION))
    }
}

impl fmt::Display for ResponseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}/{}/{}",
            self.collection_id, self.group_id, self.item_id, self.response_id
        )
    }
}

/// Changes recorded by one snapshot.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Changes {
    /// Full answer text at this point, or `None` if the content did not change.
    #[serde(default)]
    pub content: Option<String>,
}

/// One snapshot of a response.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionRecord {
    /// ISO-8601 with offset, as the upstream service reports it.
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub changes: Changes,
}

impl VersionRecord {
    pub fn content(&self) -> Option<&str> {
        self.changes.content.as_deref()
    }
}

/// Where version histories come from.
pub trait HistorySource: Send + Sync {
    fn load(&self, path: &Path) -> Result<Vec<VersionRecord>>;
}

/// Reads histories stored as a JSON array of [`VersionRecord`]s.
#[derive(Clone, Copy, Debug, Default)]
pub struct JsonHistorySource;

impl HistorySource for JsonHistorySource {
    fn load(&self, path: &Path) -> Result<Vec<VersionRecord>> {
        let bytes = fs::read(path).map_err(|e| Error::source_unavailable(path, e))?;
        serde_json::from_slice(&bytes).map_err(|e| Error::source_unavailable(path, e))
    }
}

/// Every response history under `root`, sorted by identity.
///
/// Only files exactly four levels deep with a numeric path count; anything
/// else (logs, temp files, stray directories) is ignored.
pub fn discover_responses(root: &Path) -> Result<Vec<ResponseId>> {
    let mut ids = Vec::new();

    for entry in WalkDir::new(root).min_depth(4).max_depth(4) {
        let entry = entry.map_err(|e| Error::source_unavailable(root, e))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let Ok(relative) = entry.path().strip_prefix(root) else {
            continue;
        };
        if let Ok(id) = ResponseId::from_relative_path(relative) {
            ids.push(id);
        }
    }

    ids.sort_unstable();
    Ok(ids)
}
