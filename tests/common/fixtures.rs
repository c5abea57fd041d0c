//! Test data factories for release-train types
//!
//! These are test utilities - not all may be used in current tests but are
//! available for future test development.

#![allow(dead_code)]

use async_trait::async_trait;
use release_train::train::ProgressCallback;
use release_train::types::{Label, PENDING_LABEL, PullRequest};
use std::sync::Mutex;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Create a label
pub fn make_label(name: &str) -> Label {
    Label {
        id: format!("LA_{}", name.replace(' ', "_")),
        name: name.to_string(),
    }
}

/// Create a pull request with the given labels
pub fn make_pr(number: u64, title: &str, labels: &[&str]) -> PullRequest {
    PullRequest {
        id: format!("PR_kwDO{number:04}"),
        number,
        title: title.to_string(),
        labels: labels.iter().map(|l| make_label(l)).collect(),
    }
}

/// Create a pending plugins release PR
pub fn release_pr(number: u64, extra_labels: &[&str]) -> PullRequest {
    let mut labels = vec![PENDING_LABEL];
    labels.extend_from_slice(extra_labels);
    make_pr(
        number,
        &format!("chore(main): Release plugins-p{number}"),
        &labels,
    )
}

/// Create `count` pending plugins release PRs numbered from 1
pub fn release_prs(count: u64) -> Vec<PullRequest> {
    (1..=count).map(|n| release_pr(n, &[])).collect()
}

/// Progress callback that records every event as a short string
///
/// Optionally cancels a token once the train has started waiting a given
/// number of times, which stops the loop after a known cycle.
#[derive(Default)]
pub struct RecordingProgress {
    events: Mutex<Vec<String>>,
    cancel_on_wait: Option<CancellationToken>,
    cancel_after_waits: usize,
}

impl RecordingProgress {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancelling(token: CancellationToken) -> Self {
        Self::cancelling_after(token, 1)
    }

    pub fn cancelling_after(token: CancellationToken, waits: usize) -> Self {
        Self {
            events: Mutex::new(Vec::new()),
            cancel_on_wait: Some(token),
            cancel_after_waits: waits,
        }
    }

    pub fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }

    fn push(&self, event: String) {
        self.events.lock().unwrap().push(event);
    }
}

fn numbers(prs: &[PullRequest]) -> String {
    prs.iter()
        .map(|pr| pr.number.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

#[async_trait]
impl ProgressCallback for RecordingProgress {
    async fn on_cycle_start(&self, cycle: u64) {
        self.push(format!("cycle {cycle}"));
    }

    async fn on_pending(&self, prs: &[PullRequest]) {
        self.push(format!("pending [{}]", numbers(prs)));
    }

    async fn on_queued(&self, prs: &[PullRequest]) {
        self.push(format!("queued [{}]", numbers(prs)));
    }

    async fn on_promoting(&self, pr: &PullRequest) {
        self.push(format!("promoting #{}", pr.number));
    }

    async fn on_promoted(&self, pr: &PullRequest) {
        self.push(format!("promoted #{}", pr.number));
    }

    async fn on_would_promote(&self, pr: &PullRequest) {
        self.push(format!("would promote #{}", pr.number));
    }

    async fn on_waiting(&self, _interval: Duration) {
        self.push("waiting".to_string());
        let waits = self.events().iter().filter(|e| *e == "waiting").count();
        if let Some(token) = &self.cancel_on_wait
            && waits >= self.cancel_after_waits
        {
            token.cancel();
        }
    }

    async fn on_drained(&self) {
        self.push("drained".to_string());
    }

    async fn on_message(&self, message: &str) {
        self.push(format!("message: {message}"));
    }
}
