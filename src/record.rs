// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Persisted results, one JSON file per response.
//!
//! Results mirror the history layout: `<results>/<c>/<g>/<i>/<r>.json`.
//! A write goes to a temp file in the destination directory and is renamed
//! over the old record, so readers see either the old record or the new one,
//! never a torn file. Two jobs for the same response simply race; the last
//! rename wins. Records are replaced, never merged: there is no meaningful
//! union of two factorizations.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;

use crate::error::{Error, Result};
use crate::history::{discover_responses, ResponseId};
use crate::lz::Factorization;

/// What the browsing layer reads for one response.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditDistanceResult {
    pub factorization: Factorization,
    /// Phrase count per version.
    pub edit_distances: Vec<usize>,
    /// Largest entry of `edit_distances`, 0 when there are none.
    pub max: usize,
}

impl EditDistanceResult {
    /// The record for a response without any content, and the stand-in for
    /// results that have not been computed yet.
    pub fn empty() -> Self {
        Self {
            factorization: Factorization::default(),
            edit_distances: vec![0],
            max: 0,
        }
    }

    pub fn from_factorization(factorization: Factorization) -> Self {
        let edit_distances = factorization.phrase_counts();
        let max = edit_distances.iter().copied().max().unwrap_or(0);
        Self {
            factorization,
            edit_distances,
            max,
        }
    }

    /// Serialized form. Deterministic: equal results give equal bytes.
    pub fn to_bytes(&self) -> serde_json::Result<Vec<u8>> {
        serde_json::to_vec(self)
    }
}

impl Default for EditDistanceResult {
    fn default() -> Self {
        Self::empty()
    }
}

/// Result records on disk.
#[derive(Clone, Debug)]
pub struct ResultStore {
    root: PathBuf,
}

impl ResultStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path_for(&self, id: &ResponseId) -> PathBuf {
        self.root.join(id.relative_path())
    }

    /// Atomically replace the record for `id`.
    pub fn write(&self, id: &ResponseId, result: &EditDistanceResult) -> Result<PathBuf> {
        let path = self.path_for(id);
        write_record(&path, result)?;
        Ok(path)
    }

    /// The stored record, or `None` if it has not been computed.
    pub fn read(&self, id: &ResponseId) -> Result<Option<EditDistanceResult>> {
        let path = self.path_for(id);
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(Error::source_unavailable(&path, e)),
        };
        serde_json::from_slice(&bytes)
            .map(Some)
            .map_err(|e| Error::source_unavailable(&path, e))
    }

    /// The stored record, or [`EditDistanceResult::empty`].
    ///
    /// Missing and unreadable records look the same to a reader: not computed
    /// yet. Reconciliation picks them up later.
    pub fn read_or_default(&self, id: &ResponseId) -> EditDistanceResult {
        match self.read(id) {
            Ok(Some(result)) => result,
            Ok(None) => EditDistanceResult::empty(),
            Err(e) => {
                tracing::warn!(response = %id, error = %e, "unreadable result record, using default");
                EditDistanceResult::empty()
            }
        }
    }

    pub fn contains(&self, id: &ResponseId) -> bool {
        self.path_for(id).is_file()
    }
}

/// Responses under `responses_root` that have no record in `store`.
pub fn reconcile(responses_root: &Path, store: &ResultStore) -> Result<Vec<ResponseId>> {
    let missing: Vec<ResponseId> = discover_responses(responses_root)?
        .into_iter()
        .filter(|id| !store.contains(id))
        .collect();
    tracing::debug!(missing = missing.len(), "reconciled result store");
    Ok(missing)
}

/// Serialize fully, then replace `path`. Nothing is written on failure.
fn write_record<T: Serialize>(path: &Path, record: &T) -> Result<()> {
    let bytes = serde_json::to_vec(record).map_err(|e| Error::persist(path, e.into()))?;
    write_atomic(path, &bytes).map_err(|e| Error::persist(path, e))
}

fn write_atomic(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let dir = path
        .parent()
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "record path has no parent"))?;
    fs::create_dir_all(dir)?;

    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(bytes)?;
    tmp.as_file().sync_all()?;
    // On failure the temp file is dropped and removed, leaving the old record
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}
