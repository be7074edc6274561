use anyhow::Result;
use clap::Parser;
use client_core::load_settings;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;
mod controller;
mod render;

use cli::Cli;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let settings = commands::resolve_settings(&cli, load_settings())?;
    tracing::debug!(api_base_url = %settings.api_base_url, "admin console starting");
    commands::run(cli, settings).await
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod controller_tests;
