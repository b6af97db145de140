//! CLI argument definitions using clap

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "cert-expiry-watch")]
#[command(version)]
#[command(
    about = "Warns when TLS certificates seen in HTTPS responses are close to expiry",
    long_about = None
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Settings file (default: config/default.toml if present)
    #[arg(short, long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Policy store file, overrides the configured path
    #[arg(long, value_name = "FILE", global = true)]
    pub store: Option<PathBuf>,

    /// Output JSON instead of tables
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show or change the global default threshold
    Default {
        #[command(subcommand)]
        action: DefaultAction,
    },

    /// Manage per-domain threshold overrides
    Override {
        #[command(subcommand)]
        action: OverrideAction,
    },

    /// Show the effective threshold for a host
    Resolve {
        /// Exact hostname
        host: String,
    },

    /// Check certificates in a PEM or DER file against a threshold
    Check(CheckArgs),

    /// Process newline-delimited JSON events and report expiring certificates
    Watch(WatchArgs),
}

#[derive(Subcommand, Debug)]
pub enum DefaultAction {
    /// Print the global default
    Get,
    /// Set the global default (days, at least 1)
    Set {
        #[arg(allow_hyphen_values = true)]
        days: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum OverrideAction {
    /// List all overrides together with the global default
    List,
    /// Print the override of one host
    Get { host: String },
    /// Set the override of a host (days, at least 1)
    Set {
        host: String,
        #[arg(allow_hyphen_values = true)]
        days: String,
    },
    /// Start customizing a host with the current default threshold
    Add { host: String },
    /// Remove the override of a host
    Delete { host: String },
}

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Certificate file (PEM with one or more certificates, or DER)
    pub file: PathBuf,

    /// Resolve the threshold for this host
    #[arg(long, conflicts_with = "days")]
    pub host: Option<String>,

    /// Use this threshold instead of the stored policy
    #[arg(long)]
    pub days: Option<String>,
}

#[derive(Args, Debug)]
pub struct WatchArgs {
    /// Event file (default: stdin)
    #[arg(short, long, value_name = "FILE")]
    pub input: Option<PathBuf>,
}
