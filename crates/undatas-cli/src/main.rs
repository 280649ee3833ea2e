#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod config;

use std::process;

use anyhow::Context;

use crate::config::Cli;

// Tracing target constants
pub const TRACING_TARGET_STARTUP: &str = "undatas_cli::startup";
pub const TRACING_TARGET_SHUTDOWN: &str = "undatas_cli::shutdown";
pub const TRACING_TARGET_CONFIG: &str = "undatas_cli::config";

#[tokio::main]
async fn main() {
    let Err(error) = run().await else {
        tracing::debug!(
            target: TRACING_TARGET_SHUTDOWN,
            "command completed successfully"
        );
        process::exit(0);
    };

    if tracing::enabled!(tracing::Level::ERROR) {
        tracing::error!(
            target: TRACING_TARGET_SHUTDOWN,
            error = %format!("{error:#}"),
            "command failed"
        );
    } else {
        eprintln!("Error: {error:#}");
    }

    process::exit(1);
}

/// Main application entry point.
async fn run() -> anyhow::Result<()> {
    let cli = Cli::init();

    Cli::init_tracing();
    cli.log();

    let client = cli
        .client
        .into_client()
        .context("failed to create client")?;

    let name = cli.command.name();
    let output = cli
        .command
        .run(&client)
        .await
        .with_context(|| format!("{name} failed"))?;

    let rendered = serde_json::to_string_pretty(&output).context("failed to render output")?;
    println!("{rendered}");

    Ok(())
}
