//! CLI argument parsing and command dispatch.

pub mod args;
pub mod commands;

use anyhow::Result;
use args::{Cli, Mode};
use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::output::OutputFormat;

/// Version line for `--features`.
pub const FEATURES: &str = concat!("Features: spahau=", env!("CARGO_PKG_VERSION"));

/// Route diagnostics to stderr. Without this no subscriber is installed
/// and all `tracing` events are discarded.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("spahau_core=debug,spahau_cli=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Run the CLI application.
pub async fn run() -> Result<()> {
    let cli = Cli::parse();

    if cli.no_color {
        colored::control::set_override(false);
    }
    if cli.verbose {
        init_tracing();
    }

    if cli.features {
        println!("{FEATURES}");
        return Ok(());
    }

    // Load configuration
    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    let output_format = cli
        .output
        .or(config.output_format)
        .unwrap_or(OutputFormat::Pretty);

    // Create context for commands
    let ctx = commands::Context {
        query: config.query_config(cli.domain.clone(), cli.max_answers),
        output_format,
    };
    debug!(
        zone = %ctx.query.domain,
        max_answers = ctx.query.max_answers,
        output = %ctx.output_format,
        "configured"
    );

    // Dispatch to the selected mode
    match cli.mode() {
        Mode::Query => commands::query::execute(&ctx, &cli.addresses).await,
        Mode::Describe => commands::describe::execute(&ctx, &cli.addresses),
        Mode::Hostname => commands::hostname::execute(&ctx, &cli.addresses),
        Mode::SelfTest => commands::selftest::execute(&ctx, &cli.addresses).await,
    }
}
