//! Version-control queries through the `git` CLI.

use async_trait::async_trait;
use buildmeta_core::event::parse_commit_timestamp;
use buildmeta_core::{ContextError, ContextResult, GitContext, GitSource};
use chrono::{DateTime, Utc};
use regex::Regex;
use std::path::PathBuf;
use std::process::Stdio;
use std::sync::LazyLock;
use tokio::process::Command;
use tracing::debug;

// "HEAD, <refs>" as printed by `git show -s --pretty=%D` on a detached HEAD,
// prefixed with "grafted, " in shallow clones
static DETACHED_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:grafted, )?HEAD, (.*)$").unwrap());

// "<remote>/<branch>, <branch>"
static BRANCH_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^/,]+/[^,]+, ([^,]+)").unwrap());

// "pull/<number>/<head|merge>"
static PULL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^pull/\d+/(head|merge)$").unwrap());

/// Runs `git` in a working directory.
#[derive(Debug, Clone)]
pub struct GitCli {
    work_dir: PathBuf,
}

impl GitCli {
    pub fn new(work_dir: impl Into<PathBuf>) -> Self {
        Self {
            work_dir: work_dir.into(),
        }
    }

    /// Run a git command and return its trimmed stdout.
    async fn run(&self, args: &[&str]) -> ContextResult<String> {
        debug!(args = ?args, dir = %self.work_dir.display(), "Running git");

        let output = Command::new("git")
            .args(args)
            .current_dir(&self.work_dir)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ContextError::Git(format!(
                "git {} failed: {}",
                args.join(" "),
                stderr.trim()
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }

    async fn current_ref(&self) -> ContextResult<String> {
        let branch = self.run(&["branch", "--show-current"]).await?;
        if branch.is_empty() {
            let decoration = self.run(&["show", "-s", "--pretty=%D"]).await?;
            debug!(decoration = %decoration, "Detached HEAD");
            return parse_detached_ref(&decoration);
        }

        self.run(&["symbolic-ref", "HEAD"]).await
    }
}

#[async_trait]
impl GitSource for GitCli {
    async fn current_context(&self) -> ContextResult<GitContext> {
        let sha = self.run(&["rev-parse", "HEAD"]).await?;
        let r#ref = self.current_ref().await?;

        Ok(GitContext { sha, r#ref })
    }

    async fn commit_date(&self, sha: &str) -> ContextResult<DateTime<Utc>> {
        let raw = self.run(&["show", "-s", "--format=%cI", sha]).await?;
        parse_commit_timestamp(&raw)
    }
}

/// Turn the ref decoration of a detached HEAD into a full ref.
pub fn parse_detached_ref(decoration: &str) -> ContextResult<String> {
    let refs = DETACHED_REGEX
        .captures(decoration.trim())
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
        .filter(|r| !r.is_empty())
        .ok_or_else(|| {
            ContextError::Git(format!("cannot find detached HEAD ref in {:?}", decoration))
        })?;

    if let Some(tags) = refs.strip_prefix("tag: ") {
        let tag = tags.split(',').next().unwrap_or(tags).trim();
        return Ok(format!("refs/tags/{}", tag));
    }

    if let Some(caps) = BRANCH_REGEX.captures(refs) {
        return Ok(format!("refs/heads/{}", caps[1].trim()));
    }

    if PULL_REGEX.is_match(refs) {
        return Ok(format!("refs/{}", refs));
    }

    Err(ContextError::Git(format!(
        "unsupported detached HEAD ref in {:?}",
        decoration
    )))
}
