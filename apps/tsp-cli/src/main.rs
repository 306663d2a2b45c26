//! # tsp-deploy
//!
//! Deploys the project's transaction security policies to the current
//! default target org.
//!
//! - `tsp-deploy` — notify the target org's own user
//! - `tsp-deploy ops@example.com` — notify someone else
//!
//! The project root is the current directory, or `TSP_PROJECT_ROOT` when set.
//! Layout and CLI settings come from an optional `tsp.toml` there.

use std::io::IsTerminal;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use tsp_org::SfCliAdapter;
use tsp_pipeline::{Console, DeployConfig, Pipeline, PipelineError, RunOutcome};

const PROJECT_ROOT_ENV: &str = "TSP_PROJECT_ROOT";

/// Patch the notification recipient into transaction security policies and deploy them.
#[derive(Parser)]
#[command(name = "tsp-deploy", version, about)]
struct Cli {
    /// Email/username to notify (defaults to the target org's username).
    recipient: Option<String>,
}

fn project_root() -> anyhow::Result<PathBuf> {
    let root = match std::env::var_os(PROJECT_ROOT_ENV) {
        Some(root) => PathBuf::from(root),
        None => std::env::current_dir().context("cannot determine current directory")?,
    };
    Ok(root.canonicalize().unwrap_or(root))
}

fn use_color(config: &DeployConfig) -> bool {
    config.display.color
        && std::env::var_os("NO_COLOR").is_none()
        && std::io::stdout().is_terminal()
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let project_root = project_root()?;
    tracing::info!("Project root: {}", project_root.display());

    let config = DeployConfig::load_or_default(&project_root);
    let adapter = SfCliAdapter::new(&project_root, config.org.clone());
    let console = Console::stdio(use_color(&config));

    let pipeline = Pipeline::new(&project_root, config, &adapter, console);
    match pipeline.run(cli.recipient.as_deref())? {
        RunOutcome::Aborted => tracing::info!("aborted by operator"),
        RunOutcome::Completed(summary) => tracing::info!(
            patched = summary.report.patched(),
            "deploy finished"
        ),
    }
    Ok(())
}

/// Line to print for a failed run, or `None` when the console already showed it.
fn failure_line(error: &anyhow::Error) -> Option<String> {
    match error.downcast_ref::<PipelineError>() {
        Some(e) if e.is_reported() => None,
        _ => Some(format!("Error: {:#}", error)),
    }
}

fn main() -> ExitCode {
    // Logs go to stderr so they don't interleave with operator output on stdout.
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("tsp_pipeline=warn,tsp_org=warn,tsp_policy=warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!(error = %format!("{:#}", e), "run failed");
            if let Some(line) = failure_line(&e) {
                eprintln!("{}", line);
            }
            ExitCode::FAILURE
        }
    }
}
