//! # tally CLI Library
//!
//! Argument parsing, configuration and output for the `tally` binary.
//!
//! ## Startup Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. Parse arguments (clap)                                             │
//! │  2. Initialize tracing (stderr)                                        │
//! │  3. AppConfig::load → env overrides → CLI flags                        │
//! │  4. Inventory::open(data dir)                                          │
//! │  5. Dispatch command with the configured session                       │
//! │  6. Ok  → pretty JSON on stdout, exit 0                                │
//! │     Err → ApiError JSON on stderr, exit 1                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Failures in steps 1-4 are start-up failures and surface through
//! `anyhow` instead of `ApiError`.

pub mod commands;
pub mod config;
pub mod error;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tally_core::Role;
use tally_service::Inventory;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use crate::commands::product::ProductCommand;
use crate::commands::report::ReportCommand;
use crate::commands::sale::SellArgs;
use crate::commands::stock::StockCommand;
use crate::commands::Context;
use crate::config::AppConfig;

/// Retail inventory: products, sales and reports over JSON files.
#[derive(Debug, Parser)]
#[command(name = "tally", version)]
pub struct Cli {
    /// Config file (default: tally.toml in the platform config dir)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Directory holding the catalog and transaction files
    #[arg(long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Session role: employee or admin
    #[arg(long, global = true)]
    pub role: Option<Role>,

    /// Operator name recorded in the logs
    #[arg(long, global = true, value_name = "NAME")]
    pub operator: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Browse and edit the catalog
    #[command(subcommand)]
    Product(ProductCommand),

    /// Sell one or more products to a customer
    Sell(SellArgs),

    /// Sales reports
    #[command(subcommand)]
    Report(ReportCommand),

    /// Low-stock checks and restocking
    #[command(subcommand)]
    Stock(StockCommand),
}

/// Initializes the tracing subscriber.
///
/// Logs go to stderr so stdout stays parseable. Override with `RUST_LOG`.
fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn,tally=info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Runs the CLI.
pub fn run() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing();

    let mut config =
        AppConfig::load(cli.config.clone()).context("Failed to load configuration")?;
    config.apply_cli(cli.data_dir, cli.operator, cli.role);
    config.validate().context("Invalid configuration")?;
    debug!(?config, "Configuration resolved");

    let inventory = Inventory::open(config.store_config()).with_context(|| {
        format!(
            "Failed to open data directory {}",
            config.storage.data_dir.display()
        )
    })?;

    let session = config.session();
    let ctx = Context {
        inventory: &inventory,
        session: &session,
        low_stock_threshold: config.stock.low_stock_threshold,
    };

    match commands::dispatch(&ctx, cli.command) {
        Ok(output) => {
            println!("{}", serde_json::to_string_pretty(&output)?);
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            info!(code = ?err.code, "Command failed");
            eprintln!("{}", serde_json::to_string_pretty(&err)?);
            Ok(ExitCode::FAILURE)
        }
    }
}
