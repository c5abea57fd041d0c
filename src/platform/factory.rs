//! Platform service factory
//!
//! Creates platform services based on configuration.

use crate::error::{Error, Result};
use crate::platform::{CommandRunner, GhCliService, PlatformService, ProcessRunner};
use crate::types::RepoSpec;

/// Create a `gh`-backed platform service for `repo`
///
/// Checks up front that `gh_program` can be executed so a missing CLI is
/// reported before the first cycle starts.
pub async fn create_platform_service(
    repo: RepoSpec,
    gh_program: &str,
) -> Result<Box<dyn PlatformService>> {
    let runner = ProcessRunner;
    let version = runner
        .run(gh_program, &["--version".to_string()])
        .await
        .map_err(|e| Error::Query(format!("cannot run `{gh_program}`: {e}")))?;

    if !version.success {
        return Err(Error::Query(format!(
            "`{gh_program} --version` failed: {}",
            version.stderr.trim()
        )));
    }

    tracing::debug!(
        version = version.stdout.lines().next().unwrap_or_default(),
        "found gh"
    );

    Ok(Box::new(GhCliService::new(
        Box::new(runner),
        gh_program,
        repo,
    )))
}
