//! Build context resolution for buildmeta.
//!
//! Provides the [`ContextResolver`] and the production collaborators it is
//! wired with: the GitHub Actions runner environment and the `git` CLI.

pub mod git;
pub mod github;
pub mod resolver;

pub use git::GitCli;
pub use github::GithubEnvironment;
pub use resolver::{ContextResolver, ResolveOptions, apply_overrides};
