//! Binary entry point for csv-dedup.
//!
//! This binary provides the CLI interface for the CSV deduplication service.

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(missing_docs)]
// Allow print_stderr in main binary for CLI output
#![allow(clippy::print_stderr)]
#![allow(clippy::print_stdout)]
// Allow multiple crate versions from transitive dependencies
#![allow(clippy::multiple_crate_versions)]

use anyhow::Context;
use clap::{Parser, Subcommand};
use csv_dedup::cli::{ConfigCommand, DedupCommand, ServeCommand};
use csv_dedup::config::{CONFIG_PATH_ENV, DedupConfig};
use csv_dedup::observability::{self, InitOptions};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// csv-dedup - Remove duplicate rows from CSV documents.
#[derive(Parser)]
#[command(name = "csv-dedup")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands.
#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP deduplication service.
    Serve {
        /// Host or address to bind.
        #[arg(long)]
        host: Option<String>,

        /// Port to bind.
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Deduplicate a CSV file (or stdin) and write the result.
    Dedup {
        /// Input file; `-` or omitted reads stdin.
        input: Option<PathBuf>,

        /// Output file; `-` or omitted writes stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show the effective configuration.
    Config,
}

/// Main entry point.
#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config.with_env_overrides(),
        Err(e) => {
            eprintln!("Failed to load configuration: {e:#}");
            return ExitCode::FAILURE;
        },
    };

    let expose_metrics = matches!(cli.command, Commands::Serve { .. });
    let _observability = match observability::init_from_config(
        &config.observability,
        InitOptions {
            verbose: cli.verbose,
            metrics_expose: expose_metrics,
        },
    ) {
        Ok(handle) => handle,
        Err(e) => {
            eprintln!("Failed to initialize observability: {e}");
            return ExitCode::FAILURE;
        },
    };

    match run_command(cli, config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        },
    }
}

/// Runs the selected command.
async fn run_command(cli: Cli, config: DedupConfig) -> anyhow::Result<()> {
    match cli.command {
        Commands::Serve { host, port } => ServeCommand::new(config.server)
            .with_host(host)
            .with_port(port)
            .run()
            .await
            .context("HTTP server failed"),

        Commands::Dedup { input, output } => {
            DedupCommand::new()
                .with_input(input)
                .with_output(output)
                .run()
                .context("Deduplication failed")?;
            Ok(())
        },

        Commands::Config => {
            print!("{}", ConfigCommand::new(cli.verbose).render(&config));
            Ok(())
        },
    }
}

/// Loads configuration from `--config`, `CSV_DEDUP_CONFIG_PATH`, or the
/// default location.
fn load_config(path: Option<&Path>) -> anyhow::Result<DedupConfig> {
    if let Some(config_path) = path {
        return DedupConfig::load_from_file(config_path)
            .with_context(|| format!("reading {}", config_path.display()));
    }

    if let Ok(config_path) = std::env::var(CONFIG_PATH_ENV) {
        if !config_path.trim().is_empty() {
            return DedupConfig::load_from_file(Path::new(&config_path))
                .with_context(|| format!("reading {config_path} (from {CONFIG_PATH_ENV})"));
        }
    }

    Ok(DedupConfig::load_default())
}
