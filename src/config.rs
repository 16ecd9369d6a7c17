// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Run configuration.
//!
//! [`Config`] is what a JSON file (and the command line on top of it) says;
//! [`ValidatedConfig`] is what the pipeline runs on. Everything that can be
//! wrong with a configuration is caught by [`Config::validate`], before any
//! job is scheduled.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::corpus::CorpusAssembler;
use crate::engine::EditDistanceEngine;
use crate::error::{Error, Result};
use crate::index::SuffixArrayStrategy;
use crate::record::ResultStore;
use crate::scheduler::{SchedulerConfig, DEFAULT_BACKOFF};

#[derive(Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Root of the version-history store.
    #[serde(default = "default_responses_dir")]
    pub responses_dir: PathBuf,
    /// Root the result records are written under.
    #[serde(default = "default_results_dir")]
    pub results_dir: PathBuf,
    #[serde(default = "default_algorithm")]
    pub algorithm: String,
    /// Worker count; the number of CPUs when absent.
    #[serde(default)]
    pub workers: Option<usize>,
    #[serde(default = "default_backoff_ms")]
    pub backoff_ms: u64,
    #[serde(default = "default_strip_markup")]
    pub strip_markup: bool,
}

fn default_responses_dir() -> PathBuf {
    PathBuf::from("data/responses")
}

fn default_results_dir() -> PathBuf {
    PathBuf::from("data/edit_distances")
}

fn default_algorithm() -> String {
    SuffixArrayStrategy::default().name().to_string()
}

fn default_backoff_ms() -> u64 {
    DEFAULT_BACKOFF.as_millis() as u64
}

fn default_strip_markup() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            responses_dir: default_responses_dir(),
            results_dir: default_results_dir(),
            algorithm: default_algorithm(),
            workers: None,
            backoff_ms: default_backoff_ms(),
            strip_markup: default_strip_markup(),
        }
    }
}

impl Config {
    /// Read a JSON configuration file. Missing fields take their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| Error::InvalidConfig(format!("cannot read {}: {}", path.display(), e)))?;
        serde_json::from_str(&content)
            .map_err(|e| Error::InvalidConfig(format!("{}: {}", path.display(), e)))
    }

    pub fn validate(&self) -> Result<ValidatedConfig> {
        let strategy: SuffixArrayStrategy = self.algorithm.parse()?;

        let workers = match self.workers {
            Some(0) => return Err(Error::InvalidConfig("workers must be at least 1".into())),
            Some(n) => n,
            None => SchedulerConfig::default().workers,
        };
        if self.backoff_ms == 0 {
            return Err(Error::InvalidConfig("backoff_ms must be at least 1".into()));
        }

        Ok(ValidatedConfig {
            responses_dir: self.responses_dir.clone(),
            results_dir: self.results_dir.clone(),
            strategy,
            scheduler: SchedulerConfig {
                workers,
                backoff: Duration::from_millis(self.backoff_ms),
            },
            strip_markup: self.strip_markup,
        })
    }
}

/// A configuration that passed validation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidatedConfig {
    pub responses_dir: PathBuf,
    pub results_dir: PathBuf,
    pub strategy: SuffixArrayStrategy,
    pub scheduler: SchedulerConfig,
    pub strip_markup: bool,
}

impl ValidatedConfig {
    pub fn store(&self) -> ResultStore {
        ResultStore::new(&self.results_dir)
    }

    pub fn engine(&self) -> EditDistanceEngine {
        EditDistanceEngine::new(self.strategy, self.store())
            .with_assembler(CorpusAssembler::new().with_strip_markup(self.strip_markup))
    }
}
