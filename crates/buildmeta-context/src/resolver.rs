//! Context resolution.
//!
//! Turns a context source into one authoritative [`Context`]. Every failure
//! is returned to the caller; there is no partially resolved context.

use buildmeta_core::event::{pull_request_head_sha, pull_request_number};
use buildmeta_core::{
    Context, ContextError, ContextResult, ContextSource, EventKind, GitSource, WorkflowEvent,
    WorkflowEventSource,
};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::{debug, info};

/// Behavior switches for resolution.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolveOptions {
    /// Report `pull_request.head.sha` instead of the event SHA on pull
    /// request events.
    pub pr_head_sha: bool,
}

/// Resolves the build context from one of the two context sources.
pub struct ContextResolver {
    events: Arc<dyn WorkflowEventSource>,
    git: Arc<dyn GitSource>,
    options: ResolveOptions,
}

impl ContextResolver {
    pub fn new(
        events: Arc<dyn WorkflowEventSource>,
        git: Arc<dyn GitSource>,
        options: ResolveOptions,
    ) -> Self {
        Self {
            events,
            git,
            options,
        }
    }

    /// Resolve from a source given by name, as it appears in the inputs.
    pub async fn resolve_named(&self, source: &str) -> ContextResult<Context> {
        let source: ContextSource = source.parse()?;
        self.resolve(source).await
    }

    /// Resolve the context for `source`.
    pub async fn resolve(&self, source: ContextSource) -> ContextResult<Context> {
        let context = match source {
            ContextSource::Workflow => self.from_workflow().await?,
            ContextSource::Git => self.from_git().await?,
        };

        info!(
            source = %source,
            event = %context.event.event_name,
            git_ref = %context.git_ref(),
            sha = %context.sha(),
            commit_date = %context.commit_date.to_rfc3339(),
            "Resolved build context"
        );

        Ok(context)
    }

    async fn from_workflow(&self) -> ContextResult<Context> {
        let event = self.events.current_event().await?;
        let event = apply_overrides(event, &self.options)?;
        let commit_date = workflow_commit_date(&event)?;

        Ok(Context::new(event, commit_date))
    }

    async fn from_git(&self) -> ContextResult<Context> {
        let mut event = self.events.current_event().await?;

        let git = self.git.current_context().await?;
        debug!(sha = %git.sha, git_ref = %git.r#ref, "Read Git context");
        event.sha = git.sha;
        event.r#ref = git.r#ref;

        let commit_date = self.git.commit_date(&event.sha).await?;

        Ok(Context::new(event, commit_date))
    }
}

/// Apply the pull request ref and SHA corrections to a workflow event.
///
/// - `pull_request_target` runs against the base branch, so its ref is
///   replaced with the merge ref `refs/pull/<number>/merge`.
/// - With `pr_head_sha` set, pull request events report the head commit
///   of the pull request when the payload carries one.
pub fn apply_overrides(
    mut event: WorkflowEvent,
    options: &ResolveOptions,
) -> ContextResult<WorkflowEvent> {
    let kind = event.kind();

    if kind == EventKind::PullRequestTarget {
        let number = pull_request_number(&event.payload).ok_or_else(|| {
            ContextError::MissingData(format!(
                "{} event payload has no pull request number",
                event.event_name
            ))
        })?;
        event.r#ref = format!("refs/pull/{}/merge", number);
        debug!(git_ref = %event.r#ref, "Using pull request merge ref");
    }

    if options.pr_head_sha && kind.is_pull_request() {
        if let Some(head_sha) = pull_request_head_sha(&event.payload) {
            debug!(from = %event.sha, to = %head_sha, "Using pull request head SHA");
            event.sha = head_sha.to_string();
        }
    }

    Ok(event)
}

fn workflow_commit_date(event: &WorkflowEvent) -> ContextResult<DateTime<Utc>> {
    if event.event_path.is_none() {
        return Err(ContextError::MissingData(
            "GITHUB_EVENT_PATH is not set, cannot read the event payload".to_string(),
        ));
    }

    event
        .kind()
        .commit_timestamp(&event.event_name, &event.payload)
}
