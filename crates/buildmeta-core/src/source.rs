//! Collaborator traits the context resolver depends on.
//!
//! Both are injected so resolution can run against fabricated events and
//! repositories.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::{ContextResult, WorkflowEvent};

/// Access to the workflow event that triggered the current run.
#[async_trait]
pub trait WorkflowEventSource: Send + Sync {
    /// The current event, with its payload loaded.
    async fn current_event(&self) -> ContextResult<WorkflowEvent>;
}

/// HEAD commit and ref of a checkout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitContext {
    pub sha: String,
    pub r#ref: String,
}

/// Version-control queries against a checkout.
#[async_trait]
pub trait GitSource: Send + Sync {
    /// HEAD SHA and ref.
    async fn current_context(&self) -> ContextResult<GitContext>;

    /// Commit timestamp of `sha`.
    async fn commit_date(&self, sha: &str) -> ContextResult<DateTime<Utc>>;
}
