//! Workflow events from the GitHub Actions runner environment.

use async_trait::async_trait;
use buildmeta_core::{ContextResult, RepoId, WorkflowEvent, WorkflowEventSource};
use std::path::PathBuf;
use tracing::{debug, warn};

const DEFAULT_API_URL: &str = "https://api.github.com";
const DEFAULT_SERVER_URL: &str = "https://github.com";
const DEFAULT_GRAPHQL_URL: &str = "https://api.github.com/graphql";

/// Snapshot of the `GITHUB_*` variables describing the current run.
#[derive(Debug, Clone, Default)]
pub struct GithubEnvironment {
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
    pub repository: Option<String>,
    /// Path of the serialized event payload.
    pub event_path: Option<PathBuf>,
}

impl GithubEnvironment {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Capture the environment through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |key: &str| lookup(key).unwrap_or_default();
        let number = |key: &str| lookup(key).and_then(|v| v.parse().ok()).unwrap_or(0);
        let url = |key: &str, default: &str| {
            lookup(key)
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        Self {
            event_name: var("GITHUB_EVENT_NAME"),
            sha: var("GITHUB_SHA"),
            r#ref: var("GITHUB_REF"),
            workflow: var("GITHUB_WORKFLOW"),
            action: var("GITHUB_ACTION"),
            actor: var("GITHUB_ACTOR"),
            job: var("GITHUB_JOB"),
            run_number: number("GITHUB_RUN_NUMBER"),
            run_id: number("GITHUB_RUN_ID"),
            run_attempt: number("GITHUB_RUN_ATTEMPT"),
            api_url: url("GITHUB_API_URL", DEFAULT_API_URL),
            server_url: url("GITHUB_SERVER_URL", DEFAULT_SERVER_URL),
            graphql_url: url("GITHUB_GRAPHQL_URL", DEFAULT_GRAPHQL_URL),
            repository: lookup("GITHUB_REPOSITORY").filter(|v| !v.is_empty()),
            event_path: lookup("GITHUB_EVENT_PATH")
                .filter(|v| !v.is_empty())
                .map(PathBuf::from),
        }
    }

    /// Read and parse the event payload.
    ///
    /// A configured path that does not exist yields an empty payload.
    async fn load_payload(&self) -> ContextResult<serde_json::Value> {
        let Some(path) = &self.event_path else {
            return Ok(serde_json::json!({}));
        };

        if !tokio::fs::try_exists(path).await? {
            warn!(path = %path.display(), "GITHUB_EVENT_PATH does not exist");
            return Ok(serde_json::json!({}));
        }

        let raw = tokio::fs::read_to_string(path).await?;
        debug!(path = %path.display(), bytes = raw.len(), "Read event payload");

        Ok(serde_json::from_str(&raw)?)
    }
}

#[async_trait]
impl WorkflowEventSource for GithubEnvironment {
    async fn current_event(&self) -> ContextResult<WorkflowEvent> {
        let payload = self.load_payload().await?;

        Ok(WorkflowEvent {
            event_name: self.event_name.clone(),
            sha: self.sha.clone(),
            r#ref: self.r#ref.clone(),
            workflow: self.workflow.clone(),
            action: self.action.clone(),
            actor: self.actor.clone(),
            job: self.job.clone(),
            run_number: self.run_number,
            run_id: self.run_id,
            run_attempt: self.run_attempt,
            api_url: self.api_url.clone(),
            server_url: self.server_url.clone(),
            graphql_url: self.graphql_url.clone(),
            repository: self.repository.as_deref().and_then(RepoId::parse),
            payload,
            event_path: self.event_path.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GitCli;
    use crate::resolver::{ContextResolver, ResolveOptions};
    use buildmeta_core::{ContextError, ContextSource};
    use chrono::{TimeZone, Utc};
    use std::collections::HashMap;
    use std::sync::Arc;
    use tempfile::TempDir;

    fn env_with(pairs: &[(&str, &str)]) -> GithubEnvironment {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        GithubEnvironment::from_lookup(|key| vars.get(key).cloned())
    }

    fn write_payload(dir: &TempDir, body: &str) -> String {
        let path = dir.path().join("event.json");
        std::fs::write(&path, body).unwrap();
        path.to_string_lossy().to_string()
    }

    #[test]
    fn test_from_lookup_defaults() {
        let env = env_with(&[]);
        assert_eq!(env.api_url, "https://api.github.com");
        assert_eq!(env.server_url, "https://github.com");
        assert_eq!(env.graphql_url, "https://api.github.com/graphql");
        assert_eq!(env.run_number, 0);
        assert!(env.event_path.is_none());
        assert!(env.repository.is_none());
    }

    #[test]
    fn test_from_lookup_values() {
        let env = env_with(&[
            ("GITHUB_EVENT_NAME", "push"),
            ("GITHUB_SHA", "860c1904a1ce19322e91ac35af1ab07466440c37"),
            ("GITHUB_REF", "refs/heads/dev"),
            ("GITHUB_RUN_NUMBER", "15"),
            ("GITHUB_RUN_ID", "123456789"),
            ("GITHUB_RUN_ATTEMPT", "not-a-number"),
            ("GITHUB_REPOSITORY", "docker/build-push-action"),
            ("GITHUB_SERVER_URL", "https://github.example.com"),
        ]);
        assert_eq!(env.event_name, "push");
        assert_eq!(env.r#ref, "refs/heads/dev");
        assert_eq!(env.run_number, 15);
        assert_eq!(env.run_id, 123456789);
        assert_eq!(env.run_attempt, 0);
        assert_eq!(env.server_url, "https://github.example.com");
        assert_eq!(env.repository.as_deref(), Some("docker/build-push-action"));
    }

    #[tokio::test]
    async fn test_current_event_loads_payload() {
        let dir = TempDir::new().unwrap();
        let path = write_payload(&dir, r#"{"ref": "refs/heads/dev", "commits": []}"#);
        let env = env_with(&[
            ("GITHUB_EVENT_NAME", "push"),
            ("GITHUB_REPOSITORY", "docker/metadata-action"),
            ("GITHUB_EVENT_PATH", path.as_str()),
        ]);

        let event = env.current_event().await.unwrap();
        assert_eq!(event.payload["ref"], "refs/heads/dev");
        assert_eq!(event.repository.unwrap().name, "metadata-action");
        assert!(event.event_path.is_some());
    }

    #[tokio::test]
    async fn test_current_event_missing_file() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope.json");
        let missing = missing.to_string_lossy().to_string();
        let env = env_with(&[("GITHUB_EVENT_PATH", missing.as_str())]);

        let event = env.current_event().await.unwrap();
        assert_eq!(event.payload, serde_json::json!({}));
    }

    #[tokio::test]
    async fn test_current_event_invalid_json() {
        let dir = TempDir::new().unwrap();
        let path = write_payload(&dir, "not json");
        let env = env_with(&[("GITHUB_EVENT_PATH", path.as_str())]);

        let err = env.current_event().await.unwrap_err();
        assert!(matches!(err, ContextError::Json(_)));
    }

    #[tokio::test]
    async fn test_resolve_workflow_from_event_file() {
        let dir = TempDir::new().unwrap();
        let path = write_payload(
            &dir,
            r#"{
                "ref": "refs/heads/main",
                "commits": [
                    {"id": "2b5a6b3", "timestamp": "2024-01-15T09:00:00-05:00"}
                ],
                "head_commit": {"id": "2b5a6b3", "timestamp": "2024-01-15T09:00:00-05:00"}
            }"#,
        );
        let env = env_with(&[
            ("GITHUB_EVENT_NAME", "push"),
            ("GITHUB_SHA", "2b5a6b3"),
            ("GITHUB_REF", "refs/heads/main"),
            ("GITHUB_EVENT_PATH", path.as_str()),
        ]);
        let resolver = ContextResolver::new(
            Arc::new(env),
            Arc::new(GitCli::new(dir.path())),
            ResolveOptions::default(),
        );

        let ctx = resolver.resolve(ContextSource::Workflow).await.unwrap();
        assert_eq!(ctx.sha(), "2b5a6b3");
        assert_eq!(ctx.git_ref(), "refs/heads/main");
        assert_eq!(
            ctx.commit_date,
            Utc.with_ymd_and_hms(2024, 1, 15, 14, 0, 0).unwrap()
        );
    }
}
