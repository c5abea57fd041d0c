//! Progress callback trait for interface-agnostic updates
//!
//! The train reports everything it does through this trait so the CLI can
//! render styled output while tests stay silent.

use crate::types::PullRequest;
use async_trait::async_trait;
use std::time::Duration;

/// Progress callback trait
#[async_trait]
pub trait ProgressCallback: Send + Sync {
    /// Called when a new cycle starts (1-based)
    async fn on_cycle_start(&self, cycle: u64);

    /// Called with the eligible pending PRs of this cycle
    async fn on_pending(&self, prs: &[PullRequest]);

    /// Called with the PRs already queued for automerge
    async fn on_queued(&self, prs: &[PullRequest]);

    /// Called right before a PR is labelled
    async fn on_promoting(&self, pr: &PullRequest);

    /// Called after a PR was labelled
    async fn on_promoted(&self, pr: &PullRequest);

    /// Called instead of labelling during a dry run
    async fn on_would_promote(&self, pr: &PullRequest);

    /// Called before sleeping until the next cycle
    async fn on_waiting(&self, interval: Duration);

    /// Called when no pending PRs remain
    async fn on_drained(&self);

    /// Called with a general status message
    async fn on_message(&self, message: &str);
}

/// No-op progress callback for testing or when progress isn't needed
pub struct NoopProgress;

#[async_trait]
impl ProgressCallback for NoopProgress {
    async fn on_cycle_start(&self, _cycle: u64) {}
    async fn on_pending(&self, _prs: &[PullRequest]) {}
    async fn on_queued(&self, _prs: &[PullRequest]) {}
    async fn on_promoting(&self, _pr: &PullRequest) {}
    async fn on_promoted(&self, _pr: &PullRequest) {}
    async fn on_would_promote(&self, _pr: &PullRequest) {}
    async fn on_waiting(&self, _interval: Duration) {}
    async fn on_drained(&self) {}
    async fn on_message(&self, _message: &str) {}
}
