//! Train execution - effectful operations
//!
//! Queries the platform, applies the admission policy, labels the chosen PRs
//! and waits for merges between cycles.

use crate::error::Result;
use crate::platform::PlatformService;
use crate::train::ProgressCallback;
use crate::train::policy::{AdmissionPolicy, create_promotion_plan};
use crate::types::{AUTOMERGE_LABEL, PENDING_LABEL, PullRequest};
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// Default wait between cycles
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5 * 60);

/// Options controlling how the train runs
#[derive(Debug, Clone)]
pub struct TrainOptions {
    /// Wait between cycles
    pub poll_interval: Duration,
    /// Report promotions without labelling anything
    pub dry_run: bool,
    /// Stop after the first cycle instead of waiting for merges
    pub once: bool,
}

impl Default for TrainOptions {
    fn default() -> Self {
        Self {
            poll_interval: DEFAULT_POLL_INTERVAL,
            dry_run: false,
            once: false,
        }
    }
}

/// What one cycle saw and did
#[derive(Debug, Clone, Default)]
pub struct CycleReport {
    /// Eligible pending PRs, in query order
    pub pending: Vec<PullRequest>,
    /// PRs already carrying `automerge`
    pub queued: Vec<PullRequest>,
    /// PRs labelled this cycle
    pub promoted: Vec<PullRequest>,
    /// PRs that would have been labelled (dry run only)
    pub would_promote: Vec<PullRequest>,
}

/// Result of a single cycle
#[derive(Debug, Clone)]
pub enum CycleOutcome {
    /// No eligible pending PRs remain
    Drained,
    /// Candidates were found; the report says what happened to them
    Progressed(CycleReport),
}

/// Why the train stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// No more pending PRs
    Drained,
    /// The cancellation token fired
    Cancelled,
    /// `once` was set and the single cycle finished
    SingleCycle,
}

/// Summary returned when the train stops without error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrainExit {
    /// Why the train stopped
    pub reason: StopReason,
    /// Cycles started
    pub cycles: u64,
    /// PRs labelled across all cycles
    pub promoted: usize,
}

/// Run one polling cycle
///
/// Any query or label failure is returned immediately; PRs labelled earlier
/// in the same batch keep their label.
pub async fn run_cycle(
    platform: &dyn PlatformService,
    policy: &AdmissionPolicy,
    dry_run: bool,
    progress: &dyn ProgressCallback,
) -> Result<CycleOutcome> {
    let candidates = platform.list_prs_by_labels(&[PENDING_LABEL]).await?;
    let pending = policy.filter_eligible(&candidates);

    if pending.is_empty() {
        info!("no pending release PRs left");
        progress.on_drained().await;
        return Ok(CycleOutcome::Drained);
    }
    progress.on_pending(&pending).await;

    let queued = platform
        .list_prs_by_labels(&[PENDING_LABEL, AUTOMERGE_LABEL])
        .await?;
    progress.on_queued(&queued).await;

    let plan = create_promotion_plan(&pending, queued.len(), policy);
    info!(
        pending = pending.len(),
        queued = plan.already_queued,
        budget = plan.budget,
        promoting = plan.to_promote.len(),
        "planned promotions"
    );
    if plan.is_empty() && !dry_run {
        info!(max_in_flight = policy.max_in_flight, "automerge queue is full");
    }

    let mut report = CycleReport {
        pending,
        queued,
        ..CycleReport::default()
    };

    for pr in plan.to_promote {
        if dry_run {
            progress.on_would_promote(&pr).await;
            report.would_promote.push(pr);
            continue;
        }

        progress.on_promoting(&pr).await;
        platform.add_label(pr.number, AUTOMERGE_LABEL).await?;
        info!(pr = pr.number, title = %pr.title, "labelled with automerge");
        progress.on_promoted(&pr).await;
        report.promoted.push(pr);
    }

    Ok(CycleOutcome::Progressed(report))
}

/// Run cycles until the pending set drains, `cancel` fires, or a call fails
///
/// Cancellation is observed before each cycle and while waiting between
/// cycles; a label batch that has started always runs to completion.
pub async fn run_train(
    platform: &dyn PlatformService,
    policy: &AdmissionPolicy,
    options: &TrainOptions,
    progress: &dyn ProgressCallback,
    cancel: &CancellationToken,
) -> Result<TrainExit> {
    let mut exit = TrainExit {
        reason: StopReason::Drained,
        cycles: 0,
        promoted: 0,
    };

    if options.dry_run {
        progress
            .on_message("Dry run - no labels will be changed")
            .await;
    }

    loop {
        if cancel.is_cancelled() {
            exit.reason = StopReason::Cancelled;
            return Ok(exit);
        }

        exit.cycles += 1;
        info!(cycle = exit.cycles, repo = %platform.repo(), "starting cycle");
        progress.on_cycle_start(exit.cycles).await;

        match run_cycle(platform, policy, options.dry_run, progress).await? {
            CycleOutcome::Drained => {
                exit.reason = StopReason::Drained;
                return Ok(exit);
            }
            CycleOutcome::Progressed(report) => exit.promoted += report.promoted.len(),
        }

        if options.once {
            exit.reason = StopReason::SingleCycle;
            return Ok(exit);
        }

        progress.on_waiting(options.poll_interval).await;
        tokio::select! {
            biased;
            () = cancel.cancelled() => {
                warn!(cycle = exit.cycles, "cancelled while waiting for merges");
                exit.reason = StopReason::Cancelled;
                return Ok(exit);
            }
            () = tokio::time::sleep(options.poll_interval) => {}
        }
    }
}
