// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use lzedit::{
    discover_responses, reconcile, ComputationScheduler, Config, CorpusAssembler,
    EditDistanceEngine, HistorySource, Job, JsonHistorySource, ResponseId,
    ResultStore, SuffixArrayStrategy,
};

mod cli;
use cli::display::{self, BOLD, DIM, GREEN, RED, YELLOW};
use cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Compute {
            config,
            responses,
            results,
            algorithm,
            workers,
            all,
            no_strip_markup,
        } => {
            let mut settings = match config {
                Some(path) => Config::load(&path)?,
                None => Config::default(),
            };
            if let Some(responses) = responses {
                settings.responses_dir = responses;
            }
            if let Some(results) = results {
                settings.results_dir = results;
            }
            if let Some(algorithm) = algorithm {
                settings.algorithm = algorithm;
            }
            if workers.is_some() {
                settings.workers = workers;
            }
            if no_strip_markup {
                settings.strip_markup = false;
            }
            run_compute(&settings, all)
        }
        Commands::Factorize {
            file,
            algorithm,
            no_strip_markup,
        } => run_factorize(&file, &algorithm, !no_strip_markup),
        Commands::Show {
            results,
            responses,
            collection_id,
            group_id,
            item_id,
            response_id,
            no_strip_markup,
        } => {
            let id = ResponseId::new(collection_id, group_id, item_id, response_id);
            run_show(&results, &responses, id, !no_strip_markup);
            Ok(())
        }
    }
}

/// `RUST_LOG` wins; otherwise `-v` flags pick the level. Logs go to stderr.
fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => "lzedit=info,warn",
        1 => "lzedit=debug,info",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| filter.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(atty::is(atty::Stream::Stderr)),
        )
        .init();
}

fn run_compute(settings: &Config, all: bool) -> Result<()> {
    let config = settings.validate()?;
    let store = config.store();

    let pending = if all {
        discover_responses(&config.responses_dir)?
    } else {
        reconcile(&config.responses_dir, &store)?
    };

    let scheduler = ComputationScheduler::new(config.engine(), config.scheduler)?;
    let handle = scheduler.handle();
    for id in &pending {
        handle.submit(Job::for_response(&config.responses_dir, id));
    }
    handle.shutdown();
    let report = scheduler.run();

    display::section_top("lzedit compute");
    display::row(&format!(
        "{:<12}{}",
        "responses",
        config.responses_dir.display()
    ));
    display::row(&format!("{:<12}{}", "results", config.results_dir.display()));
    display::row(&format!(
        "{:<12}{} ({} workers)",
        "algorithm", config.strategy, config.scheduler.workers
    ));
    display::section_mid("jobs");
    if pending.is_empty() {
        display::row(&display::styled(&[DIM], "nothing to compute"));
    } else {
        display::row(&format!(
            "{:<12}{}",
            "scheduled",
            display::styled(&[YELLOW], &pending.len().to_string())
        ));
        display::row(&format!(
            "{:<12}{}",
            "completed",
            display::styled(&[GREEN], &report.completed.to_string())
        ));
        display::row(&format!(
            "{:<12}{}",
            "failed",
            display::styled(&[RED], &report.failed.to_string())
        ));
    }
    display::section_bot();
    Ok(())
}

fn run_factorize(file: &Path, algorithm: &str, strip_markup: bool) -> Result<()> {
    let strategy: SuffixArrayStrategy = algorithm.parse()?;
    let engine = EditDistanceEngine::new(strategy, ResultStore::new(PathBuf::new()))
        .with_assembler(CorpusAssembler::new().with_strip_markup(strip_markup));

    let history = JsonHistorySource.load(file)?;
    let label = file.display().to_string();
    let result = engine.compute(&label, &history)?;

    let json = serde_json::to_string_pretty(&result).context("serializing result")?;
    println!("{}", json);
    Ok(())
}

fn run_show(results: &Path, responses: &Path, id: ResponseId, strip_markup: bool) {
    let store = ResultStore::new(results);
    let computed = store.contains(&id);
    let result = store.read_or_default(&id);

    let history = JsonHistorySource
        .load(&responses.join(id.relative_path()))
        .unwrap_or_default();
    let assembler = CorpusAssembler::new().with_strip_markup(strip_markup);
    let texts = assembler.version_texts(&history);

    display::section_top(&format!("response {}", id));
    if !computed {
        display::row(&display::styled(&[DIM], "not computed yet"));
    }
    display::row(&format!(
        "{} versions, max edit distance {}",
        result.factorization.len(),
        display::styled(&[BOLD], &result.max.to_string())
    ));

    for (index, distance) in result.edit_distances.iter().enumerate() {
        if result.factorization.is_empty() {
            break;
        }
        display::section_mid(&format!("version {}: {} phrases", index, distance));
        let Some(text) = texts.get(index) else {
            continue;
        };
        let phrases: Vec<String> = result
            .factorization
            .phrases(index, text)
            .into_iter()
            .map(display::phrase)
            .collect();
        let line = phrases.join(" │ ");
        display::row(&display::truncate(&line, display::BOX_WIDTH - 2));
    }
    display::section_bot();
}
