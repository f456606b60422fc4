//! Subtis - Spanish subtitles from subt.is
//!
//! Standalone runner for one addon invocation.
//!
//! # Usage
//!
//! ```bash
//! # Search for what is "playing"
//! subtis 1 "?action=search" --title "Inception" --year 2010
//!
//! # Download a result
//! subtis 1 "?action=download&id=42"
//! ```

mod cli;

use clap::Parser;
use std::process::ExitCode;
use tracing::{debug, info, Level};

use cli::Cli;
use subtis::{AddonConfig, Dispatcher, SubtisClient};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = match cli.config.as_deref() {
        Some(path) => AddonConfig::load_from(path),
        None => AddonConfig::load(),
    };

    info!(target: "subtis", "Addon started - {} {}", config.id, config.version);
    debug!(target: "subtis", "Handle {}, query {:?}", cli.handle, cli.query);

    let client = SubtisClient::new(&config);
    let dispatcher = Dispatcher::new(&config, &client);
    let mut host = cli.console_host();

    // Absence of results is not an error
    dispatcher.run(&cli.query, &mut host).await;
    ExitCode::SUCCESS
}

/// Log to stderr; stdout carries host items
fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}
