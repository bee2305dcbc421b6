// SPDX-License-Identifier: MIT
// Copyright (c) 2026 EDA Task Runner Contributors

//! `ifp` — the command-line entry point that loads a TOML task file into
//! an in-memory [`eda_core::ConfigStore`], selects tasks by identity glob
//! filters, runs one of `build|run|check|summary|release|kill`, and
//! renders the status-sink stream to a colored terminal (SPEC_FULL.md §2).
//!
//! Named after the original tool's `IFP_INSTALL_PATH` convention.

mod color;
mod config;
mod exit_error;
mod render;
mod select;

use clap::{Parser, Subcommand};
use eda_adapters::{LsfBatchAdapter, TokioProcessRunner};
use eda_core::{Stage, StatusSink};
use eda_engine::Engine;
use exit_error::ExitError;
use select::SelectFilter;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "ifp", about = "Hierarchical task runner for multi-stage EDA flows")]
struct Cli {
    /// Path to the TOML task file.
    #[arg(long, short = 'c', default_value = "tasks.toml")]
    config: PathBuf,

    /// Dump captured stdout+stderr for every action at debug level.
    #[arg(long)]
    debug: bool,

    /// Bound how long the RUN stage waits for a submitted LSF job to reach
    /// `RUN` before giving up on that task (default: unbounded, matching
    /// the original tool — see spec.md §9's "Ambiguities to preserve").
    #[arg(long)]
    job_start_deadline_secs: Option<u64>,

    /// Block glob filter (default: all).
    #[arg(long)]
    block: Option<String>,
    /// Version glob filter (default: all).
    #[arg(long)]
    version: Option<String>,
    /// Flow glob filter (default: all).
    #[arg(long)]
    flow: Option<String>,
    /// Vendor glob filter (default: all).
    #[arg(long)]
    vendor: Option<String>,
    /// Branch glob filter (default: all).
    #[arg(long)]
    branch: Option<String>,
    /// Task glob filter (default: all).
    #[arg(long)]
    task: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the BUILD stage over the selected tasks.
    Build,
    /// Run the RUN stage, driving the full scheduling hierarchy.
    Run {
        /// Let a failed/cancelled predecessor's successors run anyway.
        #[arg(long)]
        ignore_fail: bool,
    },
    /// Run the CHECK stage over the selected tasks.
    Check,
    /// Run the SUMMARY stage over the selected tasks.
    Summary,
    /// Run the RELEASE stage over the selected tasks.
    Release,
    /// Kill every selected task currently `running`.
    Kill,
}

impl Cli {
    fn filter(&self) -> SelectFilter {
        SelectFilter {
            block: self.block.clone(),
            version: self.version.clone(),
            flow: self.flow.clone(),
            vendor: self.vendor.clone(),
            branch: self.branch.clone(),
            task: self.task.clone(),
        }
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    if let Err(e) = run().await {
        eprintln!("ifp: {e}");
        std::process::exit(e.code);
    }
}

async fn run() -> Result<(), ExitError> {
    let cli = Cli::parse();

    let store = config::TomlConfigStore::load(&cli.config)
        .map_err(|e| ExitError::new(2, format!("loading {}: {e}", cli.config.display())))?;

    let selected = select::select(store.tasks(), &cli.filter())
        .map_err(|e| ExitError::new(2, e.to_string()))?;

    if selected.is_empty() {
        println!("no tasks matched the given filters");
        return Ok(());
    }

    let (tx, rx) = tokio::sync::mpsc::unbounded_channel();
    let sink = StatusSink::new(tx);
    let render_task = tokio::spawn(render::render(rx));

    let mut intervals = eda_core::Intervals::default();
    intervals.job_start_deadline = cli.job_start_deadline_secs.map(std::time::Duration::from_secs);

    let engine = Engine::new(
        Arc::new(store),
        Arc::new(TokioProcessRunner::new()),
        Arc::new(LsfBatchAdapter::new()),
        sink,
    )
    .with_debug(cli.debug)
    .with_intervals(intervals);

    match cli.command {
        Command::Build => engine.run_stage(Stage::Build, &selected).await,
        Command::Run { ignore_fail } => engine.run(&selected, ignore_fail).await,
        Command::Check => engine.run_stage(Stage::Check, &selected).await,
        Command::Summary => engine.run_stage(Stage::Summary, &selected).await,
        Command::Release => engine.run_stage(Stage::Release, &selected).await,
        Command::Kill => engine.kill(&selected).await,
    }

    let _ = render_task.await;

    if selected.iter().any(|t| t.status().is_unexpected()) {
        return Err(ExitError::new(1, "one or more tasks did not pass"));
    }
    Ok(())
}
