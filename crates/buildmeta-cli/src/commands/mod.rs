//! CLI command implementations.

use anyhow::{Context as _, Result};
use buildmeta_config::{EnvInputs, Inputs, Settings, read_inputs};
use buildmeta_context::{ContextResolver, GitCli, GithubEnvironment, ResolveOptions};
use buildmeta_core::Context;
use serde::Serialize;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

#[derive(Serialize)]
struct ResolveOutput<'a> {
    inputs: &'a Inputs,
    context: &'a Context,
}

/// Print the action inputs.
pub fn inputs(pretty: bool) -> Result<()> {
    let inputs = read_inputs(&EnvInputs);
    print_json(&inputs, pretty)
}

/// Resolve the build context and print it together with the inputs.
pub async fn resolve(
    workdir: &Path,
    context_override: Option<String>,
    pretty: bool,
) -> Result<()> {
    let mut inputs = read_inputs(&EnvInputs);
    if let Some(source) = context_override {
        inputs.context = source;
    }

    let settings = Settings::from_env();
    info!(
        context = %inputs.context,
        workdir = %workdir.display(),
        pr_head_sha = settings.pr_head_sha,
        "Resolving build context"
    );

    let resolver = ContextResolver::new(
        Arc::new(GithubEnvironment::from_env()),
        Arc::new(GitCli::new(workdir)),
        ResolveOptions {
            pr_head_sha: settings.pr_head_sha,
        },
    );

    let context = resolver
        .resolve_named(&inputs.context)
        .await
        .with_context(|| format!("Failed to resolve {} context", inputs.context))?;

    print_json(
        &ResolveOutput {
            inputs: &inputs,
            context: &context,
        },
        pretty,
    )
}

fn print_json(value: &impl Serialize, pretty: bool) -> Result<()> {
    let out = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{}", out);
    Ok(())
}
