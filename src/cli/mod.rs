// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! CLI definitions for the lzedit command-line interface.
//!
//! Three subcommands: `compute` drains every response that lacks a result
//! through the scheduler, `factorize` runs one history file and prints the
//! record, and `show` prints a stored record next to the phrases it splits
//! each version into.

pub mod display;

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "lzedit",
    about = "Version-history edit distances from LZ77 factorization",
    version
)]
pub struct Cli {
    /// More log output (-v debug, -vv trace). RUST_LOG takes precedence.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compute edit distances for every response without a stored result
    Compute {
        /// JSON configuration file; flags below override it
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Root of the version-history store
        #[arg(long)]
        responses: Option<PathBuf>,

        /// Root of the result store
        #[arg(long)]
        results: Option<PathBuf>,

        /// Suffix array algorithm: "naive" or "improved"
        #[arg(short, long)]
        algorithm: Option<String>,

        /// Number of worker threads
        #[arg(short, long)]
        workers: Option<usize>,

        /// Recompute responses that already have a result
        #[arg(long)]
        all: bool,

        /// Factorize the raw HTML instead of its plain text
        #[arg(long)]
        no_strip_markup: bool,
    },

    /// Factorize one history file and print the result record as JSON
    Factorize {
        /// Path to a version-history JSON file
        file: PathBuf,

        /// Suffix array algorithm: "naive" or "improved"
        #[arg(short, long, default_value = "improved")]
        algorithm: String,

        /// Factorize the raw HTML instead of its plain text
        #[arg(long)]
        no_strip_markup: bool,
    },

    /// Show the stored result for one response, phrase by phrase
    Show {
        /// Root of the result store
        #[arg(long)]
        results: PathBuf,

        /// Root of the version-history store
        #[arg(long)]
        responses: PathBuf,

        collection_id: u64,
        group_id: u64,
        item_id: u64,
        response_id: u64,

        /// Factorize the raw HTML instead of its plain text
        #[arg(long)]
        no_strip_markup: bool,
    },
}
