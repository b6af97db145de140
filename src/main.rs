//! cert-expiry-watch - warns about TLS certificates that are close to expiry
//!
//! This tool provides functionality for:
//! - Managing a global default warning threshold and per-domain overrides
//! - Resolving the effective threshold for a host
//! - Checking certificate files against a threshold
//! - Processing captured HTTPS response events and tracking expiring
//!   certificates per browsing context

mod commands;

use anyhow::Result;
use cert_expiry_watch::cli::{Cli, Command};
use cert_expiry_watch::config;
use cert_expiry_watch::policy::PolicyStore;
use cert_expiry_watch::store::FileStore;
use clap::Parser;
use console::style;
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let default_filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(cli).await {
        eprintln!("{} {:#}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    // Handle color preference
    if cli.no_color {
        console::set_colors_enabled(false);
    }

    let settings = config::load_settings(cli.config.as_deref())?;
    let store_path = cli
        .store
        .clone()
        .unwrap_or_else(|| settings.store.path.clone());
    tracing::debug!("Using policy store {}", store_path.display());
    let mut policy = PolicyStore::new(FileStore::new(store_path));
    let json = cli.json;

    match cli.command {
        Command::Default { action } => commands::run_default(&mut policy, action, json),
        Command::Override { action } => commands::run_override(&mut policy, action, json),
        Command::Resolve { host } => commands::run_resolve(&policy, &host, json),
        Command::Check(args) => commands::run_check(&policy, &args, json),
        Command::Watch(args) => commands::run_watch(policy, &settings, &args, json).await,
    }
}
