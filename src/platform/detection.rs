//! Repository identifier parsing

use crate::error::{Error, Result};
use crate::types::RepoSpec;
use regex::Regex;
use std::sync::LazyLock;

static RE_SSH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^git@([^:]+):(.+?)(?:\.git)?/?$").expect("hardcoded regex is valid")
});

/// Parse a repository identifier
///
/// Accepts the forms `gh --repo` understands (`OWNER/REPO`,
/// `HOST/OWNER/REPO`) as well as HTTPS and SSH remote URLs.
pub fn parse_repo_spec(input: &str) -> Result<RepoSpec> {
    let input = input.trim();
    let invalid = || Error::InvalidRepo(input.to_string());

    // SSH format: git@host:owner/repo.git
    if let Some(caps) = RE_SSH.captures(input) {
        let host = caps.get(1).map(|m| m.as_str().to_string());
        let path = caps.get(2).map_or("", |m| m.as_str());
        return from_parts(host, path).ok_or_else(invalid);
    }

    // HTTPS format: https://host/owner/repo.git
    if input.contains("://") {
        let url = url::Url::parse(input).map_err(|_| invalid())?;
        let host = url.host_str().map(ToString::to_string);
        let path = url.path().trim_matches('/');
        let path = path.strip_suffix(".git").unwrap_or(path);
        return from_parts(host, path).ok_or_else(invalid);
    }

    let parts: Vec<&str> = input.split('/').collect();
    let spec = match parts.as_slice() {
        [owner, repo] => from_parts(None, &format!("{owner}/{repo}")),
        [host, owner, repo] => from_parts(Some((*host).to_string()), &format!("{owner}/{repo}")),
        _ => None,
    };
    spec.ok_or_else(invalid)
}

fn from_parts(host: Option<String>, path: &str) -> Option<RepoSpec> {
    let (owner, repo) = path.split_once('/')?;
    let valid = |s: &str| !s.is_empty() && !s.contains('/') && !s.chars().any(char::is_whitespace);
    if !valid(owner) || !valid(repo) {
        return None;
    }

    Some(RepoSpec {
        owner: owner.to_string(),
        repo: repo.to_string(),
        host: host.filter(|h| h != "github.com"),
    })
}
