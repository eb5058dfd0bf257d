//! Core types for build-context resolution.
//!
//! This crate contains:
//! - The context-source selector and the resolved `Context` record
//! - Workflow event classification and payload field access
//! - Collaborator traits for workflow-event and version-control access

pub mod context;
pub mod error;
pub mod event;
pub mod source;

pub use context::{Context, ContextSource, RepoId, WorkflowEvent};
pub use error::{ContextError, ContextResult};
pub use event::EventKind;
pub use source::{GitContext, GitSource, WorkflowEventSource};
