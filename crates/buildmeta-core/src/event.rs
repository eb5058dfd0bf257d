//! Workflow event classification and payload field access.
//!
//! Payload shapes differ per event. Only three things are ever read:
//! - the pull request number (`number`)
//! - the pull request head SHA (`pull_request.head.sha`)
//! - a commit timestamp, whose location depends on the [`EventKind`]

use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::{ContextError, ContextResult};

/// Kind of workflow event, as far as context resolution cares.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventKind {
    /// `push`: carries a commit list.
    Push,
    /// `pull_request` and its relatives (e.g. `pull_request_review`).
    PullRequest,
    /// `pull_request_target`: runs against the base branch.
    PullRequestTarget,
    /// Anything else (`workflow_dispatch`, `schedule`, `release`, ...).
    Other(String),
}

impl EventKind {
    pub fn from_event_name(name: &str) -> Self {
        if name == "push" {
            EventKind::Push
        } else if name.contains("pull_request_target") {
            EventKind::PullRequestTarget
        } else if name.contains("pull_request") {
            EventKind::PullRequest
        } else {
            EventKind::Other(name.to_string())
        }
    }

    /// Whether this is any pull-request flavored event.
    pub fn is_pull_request(&self) -> bool {
        matches!(self, EventKind::PullRequest | EventKind::PullRequestTarget)
    }

    /// Locate and parse the commit timestamp in an event payload.
    ///
    /// Push events read `commits[0].timestamp` and fall back to
    /// `head_commit.timestamp` when the commit list is empty, as it is for
    /// tag pushes. Every other kind must carry a non-empty commit list.
    pub fn commit_timestamp(
        &self,
        event_name: &str,
        payload: &Value,
    ) -> ContextResult<DateTime<Utc>> {
        let commits = payload.get("commits").and_then(|c| c.as_array());

        let raw = match self {
            EventKind::Push => commits
                .and_then(|arr| arr.first())
                .or_else(|| payload.get("head_commit"))
                .and_then(|c| c.get("timestamp"))
                .and_then(|t| t.as_str()),
            _ => {
                let Some(commits) = commits else {
                    return Err(ContextError::MissingData(format!(
                        "event {} carries no commit list",
                        event_name
                    )));
                };
                commits
                    .first()
                    .and_then(|c| c.get("timestamp"))
                    .and_then(|t| t.as_str())
            }
        };

        let raw = raw.filter(|t| !t.is_empty()).ok_or_else(|| {
            ContextError::MissingData(format!(
                "failed to get commit date from {} event",
                event_name
            ))
        })?;

        parse_commit_timestamp(raw)
    }
}

/// Pull request number (`number`) of a pull-request event payload.
pub fn pull_request_number(payload: &Value) -> Option<u64> {
    payload
        .get("number")
        .and_then(|n| n.as_u64())
        .or_else(|| {
            payload
                .get("pull_request")
                .and_then(|pr| pr.get("number"))
                .and_then(|n| n.as_u64())
        })
}

/// Head commit SHA (`pull_request.head.sha`) of a pull-request event payload.
pub fn pull_request_head_sha(payload: &Value) -> Option<&str> {
    payload
        .get("pull_request")?
        .get("head")?
        .get("sha")?
        .as_str()
}

/// Parse an RFC 3339 commit timestamp into UTC.
pub fn parse_commit_timestamp(value: &str) -> ContextResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value.trim())
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| ContextError::InvalidTimestamp {
            value: value.to_string(),
            message: e.to_string(),
        })
}
