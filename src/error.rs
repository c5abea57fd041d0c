//! Error types for release-train

use thiserror::Error;

/// Errors raised while driving the release train
#[derive(Debug, Error)]
pub enum Error {
    /// Listing pull requests failed or returned unparsable output
    #[error("failed to query pull requests: {0}")]
    Query(String),

    /// Adding or removing a label failed
    #[error("failed to {action} label '{label}' on PR #{pr_number}: {message}")]
    Mutation {
        /// "add" or "remove"
        action: &'static str,
        /// PR the label was being changed on
        pr_number: u64,
        /// Label name
        label: String,
        /// Underlying failure
        message: String,
    },

    /// Repository identifier could not be parsed
    #[error("invalid repository '{0}': expected OWNER/REPO, HOST/OWNER/REPO or a remote URL")]
    InvalidRepo(String),
}

/// Result alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;
