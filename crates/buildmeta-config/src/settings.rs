//! Runtime settings read from the environment.

use regex::Regex;
use std::sync::LazyLock;

/// Opt into the pull request head SHA instead of the merge commit SHA.
pub const PR_HEAD_SHA_ENV: &str = "DOCKER_METADATA_PR_HEAD_SHA";

static TRUTHY_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)true").unwrap());

/// Settings that change resolution behavior without being action inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Settings {
    /// Use `pull_request.head.sha` as the commit SHA on pull request events.
    pub pr_head_sha: bool,
}

impl Settings {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            pr_head_sha: lookup(PR_HEAD_SHA_ENV).is_some_and(|v| is_truthy(&v)),
        }
    }
}

/// Whether a flag value reads as enabled.
pub fn is_truthy(value: &str) -> bool {
    TRUTHY_REGEX.is_match(value)
}
