//! Platform services for pull request queries and label edits
//!
//! Provides the interface the release train uses to talk to the hosting
//! platform, plus the `gh`-backed implementation.

mod detection;
mod factory;
mod github;
mod runner;

pub use detection::parse_repo_spec;
pub use factory::create_platform_service;
pub use github::GhCliService;
pub use runner::{CommandOutput, CommandRunner, ProcessRunner};

use crate::error::Result;
use crate::types::{PullRequest, RepoSpec};
use async_trait::async_trait;

/// Maximum number of PRs returned by a single list query
pub const PR_LIST_LIMIT: usize = 100;

/// Platform service trait for PR queries and label mutations
///
/// Every call is bound to the repository the service was created for.
#[async_trait]
pub trait PlatformService: Send + Sync {
    /// List open PRs carrying every one of `labels`
    ///
    /// Returns at most [`PR_LIST_LIMIT`] PRs; anything beyond that is
    /// silently truncated.
    async fn list_prs_by_labels(&self, labels: &[&str]) -> Result<Vec<PullRequest>>;

    /// Add a label to a PR
    async fn add_label(&self, pr_number: u64, label: &str) -> Result<()>;

    /// Remove a label from a PR
    async fn remove_label(&self, pr_number: u64, label: &str) -> Result<()>;

    /// Repository this service operates on
    fn repo(&self) -> &RepoSpec;
}
