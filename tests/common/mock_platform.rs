//! Mock platform service for testing
//!
//! These are test utilities - not all may be used in current tests but are
//! available for future test development.

#![allow(dead_code)]

use async_trait::async_trait;
use release_train::error::{Error, Result};
use release_train::platform::PlatformService;
use release_train::types::{AUTOMERGE_LABEL, Label, PENDING_LABEL, PullRequest, RepoSpec};
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

/// Call record for `add_label` / `remove_label`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelCall {
    pub pr_number: u64,
    pub label: String,
}

/// In-memory platform holding a set of open PRs
///
/// This manually implements `PlatformService` rather than using mockall,
/// matching how the rest of the suite fakes the platform.
///
/// Features:
/// - Label queries answered from the PR set (labels are ANDed)
/// - Label edits applied to the PR set, so later cycles see them
/// - Optional merge simulation: PRs carrying `automerge` disappear before
///   the next pending query
/// - Call tracking for verification
/// - Error injection for failure path testing
pub struct MockPlatformService {
    repo: RepoSpec,
    prs: Mutex<Vec<PullRequest>>,
    merge_automerged: AtomicBool,
    // Call tracking
    list_calls: Mutex<Vec<Vec<String>>>,
    add_label_calls: Mutex<Vec<LabelCall>>,
    remove_label_calls: Mutex<Vec<LabelCall>>,
    // Error injection
    error_on_list: Mutex<Option<String>>,
    error_on_add_label: Mutex<HashMap<u64, String>>,
}

impl MockPlatformService {
    /// Create a mock serving the given PRs
    pub fn with_prs(prs: Vec<PullRequest>) -> Self {
        Self {
            repo: RepoSpec {
                owner: "acme".to_string(),
                repo: "plugins".to_string(),
                host: None,
            },
            prs: Mutex::new(prs),
            merge_automerged: AtomicBool::new(false),
            list_calls: Mutex::new(Vec::new()),
            add_label_calls: Mutex::new(Vec::new()),
            remove_label_calls: Mutex::new(Vec::new()),
            error_on_list: Mutex::new(None),
            error_on_add_label: Mutex::new(HashMap::new()),
        }
    }

    /// Create a mock with no PRs at all
    pub fn empty() -> Self {
        Self::with_prs(Vec::new())
    }

    /// Treat every PR labelled `automerge` as merged by the next pending query
    pub fn simulate_merges(&self) {
        self.merge_automerged.store(true, Ordering::SeqCst);
    }

    // === Error injection methods ===

    /// Make `list_prs_by_labels` return an error
    pub fn fail_list(&self, msg: &str) {
        *self.error_on_list.lock().unwrap() = Some(msg.to_string());
    }

    /// Make `add_label` fail for a specific PR
    pub fn fail_add_label(&self, pr_number: u64, msg: &str) {
        self.error_on_add_label
            .lock()
            .unwrap()
            .insert(pr_number, msg.to_string());
    }

    // === Call verification methods ===

    /// Label sets passed to `list_prs_by_labels`, in call order
    pub fn get_list_calls(&self) -> Vec<Vec<String>> {
        self.list_calls.lock().unwrap().clone()
    }

    /// All `add_label` calls
    pub fn get_add_label_calls(&self) -> Vec<LabelCall> {
        self.add_label_calls.lock().unwrap().clone()
    }

    /// PR numbers passed to `add_label`, in call order
    pub fn labelled_numbers(&self) -> Vec<u64> {
        self.get_add_label_calls()
            .iter()
            .map(|c| c.pr_number)
            .collect()
    }

    /// All `remove_label` calls
    pub fn get_remove_label_calls(&self) -> Vec<LabelCall> {
        self.remove_label_calls.lock().unwrap().clone()
    }

    /// Current snapshot of a PR
    pub fn pr(&self, number: u64) -> Option<PullRequest> {
        self.prs
            .lock()
            .unwrap()
            .iter()
            .find(|pr| pr.number == number)
            .cloned()
    }

    /// Number of open PRs carrying both `autorelease: pending` and `automerge`
    pub fn in_flight(&self) -> usize {
        self.prs
            .lock()
            .unwrap()
            .iter()
            .filter(|pr| pr.has_label(PENDING_LABEL) && pr.has_label(AUTOMERGE_LABEL))
            .count()
    }

    /// Assert that no label was ever added or removed
    pub fn assert_no_mutations(&self) {
        let added = self.get_add_label_calls();
        let removed = self.get_remove_label_calls();
        assert!(
            added.is_empty() && removed.is_empty(),
            "Expected no label mutations but got add={added:?} remove={removed:?}"
        );
    }
}

#[async_trait]
impl PlatformService for MockPlatformService {
    async fn list_prs_by_labels(&self, labels: &[&str]) -> Result<Vec<PullRequest>> {
        self.list_calls
            .lock()
            .unwrap()
            .push(labels.iter().map(ToString::to_string).collect());

        // Check for injected error
        if let Some(msg) = self.error_on_list.lock().unwrap().as_ref() {
            return Err(Error::Query(msg.clone()));
        }

        let mut prs = self.prs.lock().unwrap();
        if self.merge_automerged.load(Ordering::SeqCst) && labels == [PENDING_LABEL] {
            prs.retain(|pr| !pr.has_label(AUTOMERGE_LABEL));
        }

        Ok(prs
            .iter()
            .filter(|pr| labels.iter().all(|l| pr.has_label(l)))
            .cloned()
            .collect())
    }

    async fn add_label(&self, pr_number: u64, label: &str) -> Result<()> {
        self.add_label_calls.lock().unwrap().push(LabelCall {
            pr_number,
            label: label.to_string(),
        });

        // Check for injected error
        if let Some(msg) = self.error_on_add_label.lock().unwrap().get(&pr_number) {
            return Err(Error::Mutation {
                action: "add",
                pr_number,
                label: label.to_string(),
                message: msg.clone(),
            });
        }

        let mut prs = self.prs.lock().unwrap();
        if let Some(pr) = prs.iter_mut().find(|pr| pr.number == pr_number) {
            if !pr.has_label(label) {
                pr.labels.push(Label {
                    id: format!("LA_{label}"),
                    name: label.to_string(),
                });
            }
        }
        Ok(())
    }

    async fn remove_label(&self, pr_number: u64, label: &str) -> Result<()> {
        self.remove_label_calls.lock().unwrap().push(LabelCall {
            pr_number,
            label: label.to_string(),
        });

        let mut prs = self.prs.lock().unwrap();
        if let Some(pr) = prs.iter_mut().find(|pr| pr.number == pr_number) {
            pr.labels.retain(|l| l.name != label);
        }
        Ok(())
    }

    fn repo(&self) -> &RepoSpec {
        &self.repo
    }
}
