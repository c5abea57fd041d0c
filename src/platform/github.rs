//! GitHub platform service backed by the `gh` CLI

use crate::error::{Error, Result};
use crate::platform::{CommandOutput, CommandRunner, PR_LIST_LIMIT, PlatformService};
use crate::types::{PullRequest, RepoSpec};
use async_trait::async_trait;
use tracing::debug;

const PR_LIST_FIELDS: &str = "id,number,title,labels";

/// GitHub service that shells out to `gh`
pub struct GhCliService {
    runner: Box<dyn CommandRunner>,
    program: String,
    repo: RepoSpec,
}

impl GhCliService {
    /// Create a new service using `program` as the `gh` executable
    pub fn new(runner: Box<dyn CommandRunner>, program: impl Into<String>, repo: RepoSpec) -> Self {
        Self {
            runner,
            program: program.into(),
            repo,
        }
    }

    fn list_args(&self, labels: &[&str]) -> Vec<String> {
        let mut args = vec![
            "pr".to_string(),
            "list".to_string(),
            "--repo".to_string(),
            self.repo.to_string(),
            "--limit".to_string(),
            PR_LIST_LIMIT.to_string(),
        ];
        for label in labels {
            args.push("--label".to_string());
            args.push((*label).to_string());
        }
        args.push("--json".to_string());
        args.push(PR_LIST_FIELDS.to_string());
        args
    }

    fn edit_args(&self, pr_number: u64, flag: &str, label: &str) -> Vec<String> {
        vec![
            "pr".to_string(),
            "edit".to_string(),
            pr_number.to_string(),
            "--repo".to_string(),
            self.repo.to_string(),
            flag.to_string(),
            label.to_string(),
        ]
    }

    async fn run(&self, args: &[String]) -> std::result::Result<CommandOutput, String> {
        debug!(program = %self.program, ?args, "running gh");
        let output = self
            .runner
            .run(&self.program, args)
            .await
            .map_err(|e| format!("failed to run `{}`: {e}", self.program))?;

        if output.success {
            Ok(output)
        } else {
            let stderr = output.stderr.trim();
            Err(if stderr.is_empty() {
                format!("`{}` exited with a non-zero status", self.program)
            } else {
                stderr.to_string()
            })
        }
    }

    async fn edit_label(
        &self,
        pr_number: u64,
        label: &str,
        action: &'static str,
        flag: &str,
    ) -> Result<()> {
        let args = self.edit_args(pr_number, flag, label);
        self.run(&args)
            .await
            .map_err(|message| Error::Mutation {
                action,
                pr_number,
                label: label.to_string(),
                message,
            })?;
        Ok(())
    }
}

#[async_trait]
impl PlatformService for GhCliService {
    async fn list_prs_by_labels(&self, labels: &[&str]) -> Result<Vec<PullRequest>> {
        let args = self.list_args(labels);
        let output = self.run(&args).await.map_err(Error::Query)?;

        let prs: Vec<PullRequest> = serde_json::from_str(&output.stdout)
            .map_err(|e| Error::Query(format!("malformed `gh pr list` output: {e}")))?;

        debug!(?labels, count = prs.len(), "listed pull requests");
        Ok(prs)
    }

    async fn add_label(&self, pr_number: u64, label: &str) -> Result<()> {
        self.edit_label(pr_number, label, "add", "--add-label").await
    }

    async fn remove_label(&self, pr_number: u64, label: &str) -> Result<()> {
        self.edit_label(pr_number, label, "remove", "--remove-label").await
    }

    fn repo(&self) -> &RepoSpec {
        &self.repo
    }
}
