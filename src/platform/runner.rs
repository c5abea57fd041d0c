//! External command execution

use async_trait::async_trait;
use std::io;
use tokio::process::Command;

/// Captured result of a finished command
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Whether the process exited with status 0
    pub success: bool,
    /// Standard output, lossily decoded
    pub stdout: String,
    /// Standard error, lossily decoded
    pub stderr: String,
}

/// Runs external programs and captures their output
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Run `program` with `args` to completion
    ///
    /// Returns `Err` only when the process could not be started.
    async fn run(&self, program: &str, args: &[String]) -> io::Result<CommandOutput>;
}

/// [`CommandRunner`] that spawns real processes
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessRunner;

#[async_trait]
impl CommandRunner for ProcessRunner {
    async fn run(&self, program: &str, args: &[String]) -> io::Result<CommandOutput> {
        let output = Command::new(program)
            .args(args)
            .kill_on_drop(true)
            .output()
            .await?;

        Ok(CommandOutput {
            success: output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}
