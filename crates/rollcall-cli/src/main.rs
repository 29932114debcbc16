//! Rollcall - attendance tracking for sports-team rosters from the terminal.
//!
//! Loads the roster from a local JSON file or a roster server, runs one
//! command against it, and saves it back when the command changed it.

mod cli;
mod commands;
mod render;

use std::io::{self, Write};

use anyhow::Result;
use chrono::Local;
use clap::Parser;
use rollcall_core::api::ApiClient;
use rollcall_core::storage::RosterFile;
use rollcall_core::{Config, RosterSource, RosterStore};
use tracing::{debug, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::Cli;
use commands::Session;

/// Initialize the tracing subscriber for logging
fn init_tracing() {
    // Use RUST_LOG env var to control log level (e.g., RUST_LOG=debug)
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

/// Pick the roster location from the effective config.
fn roster_source(config: &Config, token: Option<String>) -> Result<RosterSource> {
    if let Some(url) = config.remote_url.as_deref() {
        let client = ApiClient::new(url)?;
        let client = match token {
            Some(token) => client.with_token(token),
            None => client,
        };
        return Ok(RosterSource::Remote(client));
    }
    Ok(RosterSource::File(RosterFile::new(config.data_dir()?)?))
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    init_tracing();

    // Flags and env override the config file
    let config_path = Config::config_path()?;
    let mut config = Config::load(&config_path)?;
    if cli.remote.is_some() {
        config.remote_url = cli.remote.clone();
    }
    if cli.data_dir.is_some() {
        config.data_dir = cli.data_dir.clone();
    }

    let source = roster_source(&config, cli.token.clone())?;
    info!(source = %source.describe(), "Rollcall starting");

    let athletes = source.load_roster().await?;
    debug!(athletes = athletes.len(), "Loaded roster");

    let mut session = Session {
        store: RosterStore::new(athletes),
        source,
        config,
        config_path,
        today: Local::now().date_naive(),
    };

    let output = commands::run(&mut session, cli.command).await?;
    io::stdout().write_all(output.as_bytes())?;
    Ok(())
}
