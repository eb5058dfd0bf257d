//! Action inputs.
//!
//! Inputs arrive through the runner environment as `INPUT_<NAME>`
//! variables. Reading them never fails: absent values fall back to their
//! defaults and list inputs to an empty list.

use buildmeta_core::ContextSource;
use serde::Serialize;
use tracing::debug;

use crate::list::{ListOptions, parse_list};

/// Default bake target name.
pub const DEFAULT_BAKE_TARGET: &str = "docker-metadata-action";

/// Default separator for tags, labels and annotations.
pub const DEFAULT_SEPARATOR: &str = "\n";

/// Raw access to named inputs.
pub trait InputSource {
    /// The untrimmed value of `name`, if set.
    fn raw(&self, name: &str) -> Option<String>;
}

/// Inputs from the process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvInputs;

impl EnvInputs {
    /// Environment variable holding input `name`.
    pub fn variable_name(name: &str) -> String {
        format!("INPUT_{}", name.replace(' ', "_").to_uppercase())
    }
}

impl InputSource for EnvInputs {
    fn raw(&self, name: &str) -> Option<String> {
        std::env::var(Self::variable_name(name)).ok()
    }
}

/// User-supplied configuration for one invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Inputs {
    /// Context source selector, kept verbatim; validated on resolution.
    pub context: String,
    pub images: Vec<String>,
    pub tags: Vec<String>,
    pub flavor: Vec<String>,
    pub labels: Vec<String>,
    pub annotations: Vec<String>,
    pub sep_tags: String,
    pub sep_labels: String,
    pub sep_annotations: String,
    pub bake_target: String,
    #[serde(skip_serializing)]
    pub github_token: String,
}

/// Read all inputs from `source`.
pub fn read_inputs(source: &impl InputSource) -> Inputs {
    let list_opts = ListOptions::lines_with_comments();

    let inputs = Inputs {
        context: get_input(source, "context")
            .unwrap_or_else(|| ContextSource::Workflow.to_string()),
        images: get_input_list(source, "images", &list_opts),
        tags: get_input_list(source, "tags", &list_opts),
        flavor: get_input_list(source, "flavor", &list_opts),
        labels: get_input_list(source, "labels", &list_opts),
        annotations: get_input_list(source, "annotations", &list_opts),
        sep_tags: get_input_verbatim(source, "sep-tags")
            .unwrap_or_else(|| DEFAULT_SEPARATOR.to_string()),
        sep_labels: get_input_verbatim(source, "sep-labels")
            .unwrap_or_else(|| DEFAULT_SEPARATOR.to_string()),
        sep_annotations: get_input_verbatim(source, "sep-annotations")
            .unwrap_or_else(|| DEFAULT_SEPARATOR.to_string()),
        bake_target: get_input(source, "bake-target")
            .unwrap_or_else(|| DEFAULT_BAKE_TARGET.to_string()),
        github_token: get_input(source, "github-token").unwrap_or_default(),
    };

    debug!(
        context = %inputs.context,
        images = ?inputs.images,
        tags = inputs.tags.len(),
        labels = inputs.labels.len(),
        annotations = inputs.annotations.len(),
        bake_target = %inputs.bake_target,
        "Read inputs"
    );

    inputs
}

/// Trimmed value, `None` when absent or blank.
fn get_input(source: &impl InputSource, name: &str) -> Option<String> {
    source
        .raw(name)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Untrimmed value, `None` when absent or empty.
fn get_input_verbatim(source: &impl InputSource, name: &str) -> Option<String> {
    source.raw(name).filter(|v| !v.is_empty())
}

fn get_input_list(source: &impl InputSource, name: &str, opts: &ListOptions) -> Vec<String> {
    source
        .raw(name)
        .map(|v| parse_list(&v, opts))
        .unwrap_or_default()
}
