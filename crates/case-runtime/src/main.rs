//! caseflow: command-line client for the case-management backend.
//!
//! Starts the store and its workflows, runs one subcommand against the
//! backend (or the built-in demo data) and prints the resulting view as
//! JSON.

use std::time::Duration;

use anyhow::Context;
use case_runtime::cli::{self, Command};
use case_runtime::wiring::build_api;
use case_runtime::{telemetry, CaseRuntime, RuntimeConfig};
use clap::Parser;
use tracing::info;

/// caseflow: browse and update cases from the terminal
#[derive(Parser, Debug)]
#[command(name = "caseflow")]
#[command(about = "Command-line client for the case-management backend")]
struct Args {
    /// Backend base URL (overrides CASEFLOW_API_BASE_URL)
    #[arg(short, long)]
    base_url: Option<String>,

    /// Use built-in demo data instead of a backend
    #[arg(long)]
    demo: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    json_logs: bool,

    /// Seconds to wait for the backend to settle a command
    #[arg(long, default_value = "30")]
    wait: u64,

    #[command(subcommand)]
    command: Command,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = RuntimeConfig::from_env().context("invalid environment configuration")?;
    if let Some(base_url) = args.base_url {
        config.client.base_url = base_url;
    }
    config.json_logs |= args.json_logs;
    config.validate().context("invalid configuration")?;

    telemetry::init_tracing(&config)
        .map_err(|e| anyhow::anyhow!(e))
        .context("failed to initialise logging")?;

    let api = build_api(&config, args.demo).context("failed to create API client")?;
    let runtime = CaseRuntime::start(&config, api);

    let outcome = tokio::select! {
        result = cli::execute(&runtime, args.command, Duration::from_secs(args.wait)) => Some(result),
        _ = tokio::signal::ctrl_c() => {
            info!("[runtime] Received Ctrl+C");
            None
        }
    };

    runtime.shutdown().await;

    if let Some(result) = outcome {
        let view = result?;
        println!("{}", serde_json::to_string_pretty(&view)?);
    }
    Ok(())
}
