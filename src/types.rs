//! Core types for release-train

use serde::{Deserialize, Serialize};
use std::fmt;

/// Label marking a PR as a release candidate
pub const PENDING_LABEL: &str = "autorelease: pending";

/// Label marking a PR as queued for merge
pub const AUTOMERGE_LABEL: &str = "automerge";

/// Label marking a release PR as work in progress
pub const WIP_LABEL: &str = "wip";

/// Label opting a release PR out of automerge
pub const NO_AUTOMERGE_LABEL: &str = "no automerge";

/// A label attached to a pull request
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Label {
    /// Node ID
    pub id: String,
    /// Label name
    pub name: String,
}

/// A pull request snapshot as returned by `gh pr list --json id,number,title,labels`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PullRequest {
    /// Node ID
    pub id: String,
    /// PR number
    pub number: u64,
    /// PR title
    pub title: String,
    /// Labels in the order the API returned them
    #[serde(default)]
    pub labels: Vec<Label>,
}

impl PullRequest {
    /// Whether this PR carries a label with the given name
    pub fn has_label(&self, name: &str) -> bool {
        self.labels.iter().any(|l| l.name == name)
    }
}

/// Repository the train operates on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoSpec {
    /// Repository owner (user or organization)
    pub owner: String,
    /// Repository name
    pub repo: String,
    /// Custom host (None for github.com)
    pub host: Option<String>,
}

impl fmt::Display for RepoSpec {
    /// Renders the `[HOST/]OWNER/REPO` form accepted by `gh --repo`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.host {
            Some(host) => write!(f, "{host}/{}/{}", self.owner, self.repo),
            None => write!(f, "{}/{}", self.owner, self.repo),
        }
    }
}

impl RepoSpec {
    /// Web URL of a pull request in this repository
    pub fn pr_url(&self, number: u64) -> String {
        let host = self.host.as_deref().unwrap_or("github.com");
        format!("https://{host}/{}/{}/pull/{number}", self.owner, self.repo)
    }
}
