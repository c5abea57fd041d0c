//! release-train - keep a release train flowing
//!
//! CLI binary that promotes pending release PRs to automerge under a
//! concurrency ceiling.

use anyhow::Result;
use clap::Parser;
use release_train::train::{DEFAULT_MAX_IN_FLIGHT, DEFAULT_POLL_INTERVAL, RELEASE_TITLE_PREFIX};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

mod cli;

#[derive(Parser)]
#[command(name = "release-train")]
#[command(about = "Promote pending release PRs to automerge, a few at a time")]
#[command(version)]
struct Cli {
    /// Repository to manage (OWNER/REPO, HOST/OWNER/REPO or a remote URL)
    repo: String,

    /// Maximum number of PRs carrying `automerge` at once
    #[arg(long, default_value_t = DEFAULT_MAX_IN_FLIGHT)]
    max_in_flight: usize,

    /// Seconds to wait for merges between cycles
    #[arg(long, default_value_t = DEFAULT_POLL_INTERVAL.as_secs())]
    interval: u64,

    /// Only release PRs whose title starts with this prefix are promoted
    #[arg(long, default_value = RELEASE_TITLE_PREFIX)]
    title_prefix: String,

    /// Path to the GitHub CLI
    #[arg(long, default_value = "gh")]
    gh: String,

    /// Dry run - show what would be labelled without making changes
    #[arg(long)]
    dry_run: bool,

    /// Run a single cycle and exit
    #[arg(long)]
    once: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        // --help and --version print to stdout and exit 0
        Err(e) if !e.use_stderr() => e.exit(),
        Err(e) => {
            let _ = e.print();
            return Ok(ExitCode::FAILURE);
        }
    };

    init_logging(cli.verbose);

    cli::run_train(cli::TrainArgs {
        repo: cli.repo,
        max_in_flight: cli.max_in_flight,
        interval: std::time::Duration::from_secs(cli.interval),
        title_prefix: cli.title_prefix,
        gh: cli.gh,
        dry_run: cli.dry_run,
        once: cli.once,
    })
    .await?;

    Ok(ExitCode::SUCCESS)
}
