//! Train command - promote release PRs until none are pending

use crate::cli::progress::CliProgress;
use crate::cli::style::Stylize;
use anstream::println;
use release_train::error::Result;
use release_train::platform::{create_platform_service, parse_repo_spec};
use release_train::train::{self, AdmissionPolicy, StopReason, TrainOptions};
use std::time::Duration;
use tokio::signal;
use tokio_util::sync::CancellationToken;
use tracing::warn;

/// Arguments for the train command, as parsed from the command line
#[derive(Debug, Clone)]
pub struct TrainArgs {
    /// Repository identifier
    pub repo: String,
    /// Ceiling on concurrently queued PRs
    pub max_in_flight: usize,
    /// Wait between cycles
    pub interval: Duration,
    /// Release PR title prefix
    pub title_prefix: String,
    /// `gh` executable
    pub gh: String,
    /// Report without labelling
    pub dry_run: bool,
    /// Single cycle only
    pub once: bool,
}

/// Run the release train
pub async fn run_train(args: TrainArgs) -> Result<()> {
    let repo = parse_repo_spec(&args.repo)?;
    let platform = create_platform_service(repo.clone(), &args.gh).await?;

    let policy = AdmissionPolicy {
        title_prefix: args.title_prefix,
        max_in_flight: args.max_in_flight,
        ..AdmissionPolicy::default()
    };
    let options = TrainOptions {
        poll_interval: args.interval,
        dry_run: args.dry_run,
        once: args.once,
    };

    let cancel = CancellationToken::new();
    let on_signal = cancel.clone();
    tokio::spawn(async move {
        shutdown_signal().await;
        on_signal.cancel();
    });

    let progress = CliProgress::new(repo);
    let exit = train::run_train(platform.as_ref(), &policy, &options, &progress, &cancel).await;
    progress.finish();
    let exit = exit?;

    match exit.reason {
        StopReason::Drained => {}
        StopReason::Cancelled => {
            println!(
                "Stopped after {} cycle(s); {} PR(s) labelled.",
                exit.cycles.accent(),
                exit.promoted.accent()
            );
        }
        StopReason::SingleCycle => {
            println!("Single cycle complete; {} PR(s) labelled.", exit.promoted.accent());
        }
    }

    Ok(())
}

/// Resolve on Ctrl-C or SIGTERM
///
/// A handler that cannot be installed never fires, leaving the other one in
/// charge.
async fn shutdown_signal() {
    let ctrl_c = async {
        if signal::ctrl_c().await.is_err() {
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(_) => std::future::pending::<()>().await,
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            warn!("received interrupt, stopping after the current step");
        },
        () = terminate => {
            warn!("received SIGTERM, stopping after the current step");
        },
    }
}
