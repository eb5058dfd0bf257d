//! Context source selection and the resolved build context.

use chrono::{DateTime, Utc};
use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::{ContextError, EventKind};

/// Strategy used to resolve the build context.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display)]
pub enum ContextSource {
    /// The triggering workflow event supplied by the CI platform.
    #[default]
    #[display("workflow")]
    Workflow,
    /// The local Git checkout.
    #[display("git")]
    Git,
}

impl std::str::FromStr for ContextSource {
    type Err = ContextError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "workflow" => Ok(ContextSource::Workflow),
            "git" => Ok(ContextSource::Git),
            _ => Err(ContextError::InvalidSource(s.to_string())),
        }
    }
}

/// Owner and name of the repository the workflow runs for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoId {
    pub owner: String,
    pub name: String,
}

impl RepoId {
    /// Parse an `owner/name` string.
    pub fn parse(full_name: &str) -> Option<Self> {
        let (owner, name) = full_name.split_once('/')?;
        if owner.is_empty() || name.is_empty() {
            return None;
        }
        Some(Self {
            owner: owner.to_string(),
            name: name.to_string(),
        })
    }
}

/// The workflow event as exposed by the CI platform.
///
/// Apart from `ref`, `sha` and the few payload fields read during
/// resolution, everything here is passed through untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkflowEvent {
    pub event_name: String,
    pub sha: String,
    pub r#ref: String,
    pub workflow: String,
    pub action: String,
    pub actor: String,
    pub job: String,
    pub run_number: u64,
    pub run_id: u64,
    pub run_attempt: u64,
    pub api_url: String,
    pub server_url: String,
    pub graphql_url: String,
    pub repository: Option<RepoId>,
    /// Event payload, an empty object when none was loaded.
    pub payload: serde_json::Value,
    /// Location the payload was read from, if any.
    #[serde(skip)]
    pub event_path: Option<PathBuf>,
}

impl WorkflowEvent {
    /// Classify the event by name.
    pub fn kind(&self) -> EventKind {
        EventKind::from_event_name(&self.event_name)
    }
}

/// The resolved build context for the commit under test.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Context {
    #[serde(flatten)]
    pub event: WorkflowEvent,
    pub commit_date: DateTime<Utc>,
}

impl Context {
    pub fn new(event: WorkflowEvent, commit_date: DateTime<Utc>) -> Self {
        Self { event, commit_date }
    }

    pub fn sha(&self) -> &str {
        &self.event.sha
    }

    pub fn git_ref(&self) -> &str {
        &self.event.r#ref
    }
}
