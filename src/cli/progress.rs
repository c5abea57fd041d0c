//! CLI progress callback with styled output and a wait spinner

use crate::cli::style::{Stream, Stylize, hyperlink, spinner_style};
use anstream::println;
use async_trait::async_trait;
use indicatif::ProgressBar;
use release_train::train::ProgressCallback;
use release_train::types::{PullRequest, RepoSpec};
use std::sync::Mutex;
use std::time::Duration;
use tracing::info;

/// CLI progress callback that prints to stdout
///
/// Lists are printed as `Found N pending PRs:` followed by tab-indented
/// `- #N: title` lines, and status lines (`Labeled PR ...`, `No more pending
/// PRs.`) start at column 0 with no marker; log scrapers depend on this shape.
pub struct CliProgress {
    repo: RepoSpec,
    spinner: Mutex<Option<ProgressBar>>,
}

impl CliProgress {
    pub const fn new(repo: RepoSpec) -> Self {
        Self {
            repo,
            spinner: Mutex::new(None),
        }
    }

    /// Stop the wait spinner, if one is running
    pub fn finish(&self) {
        if let Ok(mut spinner) = self.spinner.lock() {
            if let Some(pb) = spinner.take() {
                pb.finish_and_clear();
            }
        }
    }

    fn pr_ref(&self, pr: &PullRequest) -> String {
        let text = format!("#{}", pr.number);
        hyperlink(Stream::Stdout, &text, &self.repo.pr_url(pr.number))
    }

    fn print_list(&self, prs: &[PullRequest]) {
        for pr in prs {
            println!("\t - {}: {}", self.pr_ref(pr).accent(), pr.title);
        }
        println!();
    }
}

fn format_interval(interval: Duration) -> String {
    let secs = interval.as_secs();
    if secs >= 60 && secs % 60 == 0 {
        format!("{}m", secs / 60)
    } else {
        format!("{secs}s")
    }
}

#[async_trait]
impl ProgressCallback for CliProgress {
    async fn on_cycle_start(&self, _cycle: u64) {
        self.finish();
    }

    async fn on_pending(&self, prs: &[PullRequest]) {
        println!("Found {} pending PRs:", prs.len().accent());
        self.print_list(prs);
    }

    async fn on_queued(&self, prs: &[PullRequest]) {
        println!("Found {} PRs in automerge:", prs.len().accent());
        self.print_list(prs);
    }

    async fn on_promoting(&self, pr: &PullRequest) {
        info!("Labeling PR #{}: {} with automerge.", pr.number, pr.title);
    }

    async fn on_promoted(&self, pr: &PullRequest) {
        println!(
            "Labeled PR {}: {} with automerge.",
            self.pr_ref(pr).accent(),
            pr.title.emphasis()
        );
    }

    async fn on_would_promote(&self, pr: &PullRequest) {
        println!(
            "{} Would label PR {}: {} with automerge.",
            "-".muted(),
            self.pr_ref(pr).accent(),
            pr.title
        );
    }

    async fn on_waiting(&self, interval: Duration) {
        println!("Waiting for merges.");

        let pb = ProgressBar::new_spinner();
        pb.set_style(spinner_style());
        pb.set_message(format!("next check in {}", format_interval(interval)));
        pb.enable_steady_tick(Duration::from_millis(120));

        if let Ok(mut spinner) = self.spinner.lock() {
            if let Some(old) = spinner.replace(pb) {
                old.finish_and_clear();
            }
        }
    }

    async fn on_drained(&self) {
        println!("No more pending PRs.");
    }

    async fn on_message(&self, message: &str) {
        println!("{message}");
    }
}
