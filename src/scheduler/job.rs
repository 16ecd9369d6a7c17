// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::history::ResponseId;

/// A unit of scheduled work: one history file to factorize.
///
/// The fetch stage hands over a base directory and a path below it. The path
/// is only parsed when a worker picks the job up, so a malformed path fails
/// that one job instead of the producer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Job {
    base_path: PathBuf,
    relative_path: PathBuf,
}

impl Job {
    pub fn new(base_path: impl Into<PathBuf>, relative_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
            relative_path: relative_path.into(),
        }
    }

    /// The job for a known response under `responses_root`.
    pub fn for_response(responses_root: impl Into<PathBuf>, id: &ResponseId) -> Self {
        Self::new(responses_root, id.relative_path())
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    pub fn relative_path(&self) -> &Path {
        &self.relative_path
    }

    /// Where the version history lives.
    pub fn source_path(&self) -> PathBuf {
        self.base_path.join(&self.relative_path)
    }

    pub fn response_id(&self) -> Result<ResponseId> {
        ResponseId::from_relative_path(&self.relative_path)
    }
}

impl fmt::Display for Job {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.relative_path.display())
    }
}
