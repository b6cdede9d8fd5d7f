//! dutyroster - command-line front end for duty rosters and standby groups.

mod commands;
mod utils;

use std::io;

use anyhow::Result;
use dutyroster_core::RosterConfig;
use tracing::{debug, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use commands::Command;

/// Initialize the tracing subscriber for logging
fn init_tracing() {
    // Use RUST_LOG env var to control log level (e.g., RUST_LOG=debug)
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

fn main() -> Result<()> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    init_tracing();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let command = Command::parse(&args)?;

    let mut config = RosterConfig::load()?;
    config.apply_env_overrides()?;
    debug!(epoch = %config.rotation_epoch, group_size = config.standby_group_size, "Loaded config");

    info!(?command, "Running command");
    if let Err(e) = commands::run(command, &config) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
    Ok(())
}
