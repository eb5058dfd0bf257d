//! buildmeta CLI tool.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "buildmeta")]
#[command(about = "Resolve the build context for CI metadata generation", long_about = None)]
struct Cli {
    /// Checkout queried by the git context source
    #[arg(long, env = "GITHUB_WORKSPACE", default_value = ".")]
    workdir: PathBuf,

    /// Context source, overriding the `context` input
    #[arg(long)]
    context: Option<String>,

    /// Pretty-print JSON output
    #[arg(long)]
    pretty: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the parsed action inputs
    Inputs,
    /// Resolve the build context and print it with the inputs
    Resolve,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr, stdout carries the JSON output
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command.unwrap_or(Commands::Resolve) {
        Commands::Inputs => {
            commands::inputs(cli.pretty)?;
        }
        Commands::Resolve => {
            commands::resolve(&cli.workdir, cli.context, cli.pretty).await?;
        }
    }

    Ok(())
}
