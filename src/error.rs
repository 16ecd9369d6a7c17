// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! One error type for the whole pipeline.
//!
//! Failures fall into four buckets. Configuration errors are fatal: raised
//! while setting up, they stop the run before any job is scheduled. The other
//! three (missing source, broken invariant, failed write) are local to a single
//! job. Inside a job every error, configuration included, fails that job only:
//! the scheduler logs it, counts it, and moves on. Configuration errors are
//! logged at `error`, the rest at `warn`.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result type for pipeline operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Coarse classification of an [`Error`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad configuration. Fatal, raised before scheduling.
    Configuration,
    /// Version history missing or unreadable. The job is abandoned.
    SourceUnavailable,
    /// An internal algorithm check failed. The job is treated as failed.
    AlgorithmInvariant,
    /// Writing the result record failed. No partial record remains.
    PersistFailure,
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("unknown suffix array algorithm: {0:?} (expected \"naive\" or \"improved\")")]
    UnknownAlgorithm(String),

    #[error("separator alphabet exhausted after {0} versions")]
    SeparatorsExhausted(usize),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("job path {} is not of the form collection/group/item/response.json", .0.display())]
    InvalidJobPath(PathBuf),

    #[error("version history unavailable at {}: {reason}", path.display())]
    SourceUnavailable { path: PathBuf, reason: String },

    #[error("invariant violated for response {response}: {detail}")]
    InvariantViolation { response: String, detail: String },

    #[error("failed to persist result to {}: {source}", path.display())]
    Persist {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::UnknownAlgorithm(_) | Error::SeparatorsExhausted(_) | Error::InvalidConfig(_) => {
                ErrorKind::Configuration
            }
            Error::InvalidJobPath(_) | Error::SourceUnavailable { .. } => {
                ErrorKind::SourceUnavailable
            }
            Error::InvariantViolation { .. } => ErrorKind::AlgorithmInvariant,
            Error::Persist { .. } => ErrorKind::PersistFailure,
        }
    }

    /// Configuration errors. Fatal to setup; within a job they fail that
    /// job and are logged at `error`.
    pub fn is_fatal(&self) -> bool {
        self.kind() == ErrorKind::Configuration
    }

    pub(crate) fn source_unavailable(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Error::SourceUnavailable {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    pub(crate) fn persist(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Error::Persist {
            path: path.into(),
            source,
        }
    }
}
