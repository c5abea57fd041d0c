//! Admission policy - pure functions deciding what gets promoted
//!
//! No I/O happens here. The executor gathers PRs, hands them to the policy,
//! and applies whatever plan comes back.

use crate::types::{AUTOMERGE_LABEL, NO_AUTOMERGE_LABEL, PullRequest, WIP_LABEL};

/// Title prefix of the release PRs this train manages
pub const RELEASE_TITLE_PREFIX: &str = "chore(main): Release plugins-";

/// Default ceiling on PRs carrying `automerge` at once
pub const DEFAULT_MAX_IN_FLIGHT: usize = 5;

/// Which pending PRs may be promoted, and how many at once
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdmissionPolicy {
    /// Only PRs whose title starts with this prefix are candidates
    pub title_prefix: String,
    /// PRs carrying any of these labels are never candidates
    pub excluded_labels: Vec<String>,
    /// Maximum number of PRs queued for automerge at the same time
    pub max_in_flight: usize,
}

impl Default for AdmissionPolicy {
    fn default() -> Self {
        Self {
            title_prefix: RELEASE_TITLE_PREFIX.to_string(),
            excluded_labels: [WIP_LABEL, AUTOMERGE_LABEL, NO_AUTOMERGE_LABEL]
                .map(ToString::to_string)
                .to_vec(),
            max_in_flight: DEFAULT_MAX_IN_FLIGHT,
        }
    }
}

impl AdmissionPolicy {
    /// Whether a single pending PR is a promotion candidate
    pub fn is_eligible(&self, pr: &PullRequest) -> bool {
        pr.title.starts_with(&self.title_prefix)
            && !pr
                .labels
                .iter()
                .any(|l| self.excluded_labels.iter().any(|ex| *ex == l.name))
    }

    /// Keep only eligible PRs, preserving query order
    pub fn filter_eligible(&self, prs: &[PullRequest]) -> Vec<PullRequest> {
        prs.iter().filter(|pr| self.is_eligible(pr)).cloned().collect()
    }

    /// Free slots left under the ceiling
    pub const fn budget(&self, already_queued: usize) -> usize {
        self.max_in_flight.saturating_sub(already_queued)
    }

    /// Pick the PRs to promote this cycle: a prefix of `eligible`
    ///
    /// First discovered, first promoted; nothing beyond query order decides.
    pub fn select_promotions<'a>(
        &self,
        eligible: &'a [PullRequest],
        already_queued: usize,
    ) -> &'a [PullRequest] {
        let take = self.budget(already_queued).min(eligible.len());
        &eligible[..take]
    }
}

/// Promotions decided for one cycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromotionPlan {
    /// PRs to label with `automerge`, in order
    pub to_promote: Vec<PullRequest>,
    /// PRs already carrying `automerge` when the plan was made
    pub already_queued: usize,
    /// Free slots before promotion
    pub budget: usize,
}

impl PromotionPlan {
    /// Check if there is nothing to promote
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.to_promote.is_empty()
    }
}

/// Create a promotion plan (PURE - no I/O)
#[must_use]
pub fn create_promotion_plan(
    eligible: &[PullRequest],
    already_queued: usize,
    policy: &AdmissionPolicy,
) -> PromotionPlan {
    PromotionPlan {
        to_promote: policy.select_promotions(eligible, already_queued).to_vec(),
        already_queued,
        budget: policy.budget(already_queued),
    }
}
