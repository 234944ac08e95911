//! CLI module for hybridops
//!
//! Command-line interface definitions and handlers for the DR/burst target
//! decision engine.
//!
//! # Commands
//!
//! - `choose` - Decide which provider to route to
//! - `replay` - Re-run a recorded decision and check it reproduces
//! - `config` - Configuration utilities (init, show)
//! - `completions` - Generate shell completions
//!
//! # Example
//!
//! ```bash
//! # Print only the winning provider
//! hybridops choose --metrics metrics.json --credits "azure=100,gcp=40"
//!
//! # Emit shell exports and keep an audit record
//! eval "$(hybridops choose -m metrics.json --format env --out decision.json)"
//! ```
//!
//! # Exit codes
//!
//! - `0` - a decision was made (including degraded decisions)
//! - `1` - I/O or other runtime failure
//! - `2` - malformed input or invalid policy
//! - `3` - `replay` produced a different decision

pub mod choose;
pub mod completions;
pub mod config;
pub mod output;
pub mod replay;

pub use completions::handle_completions;
pub use config::{handle_config_init, handle_config_show};

use crate::config::ConfigError;
use crate::engine::Strategy;
use crate::inputs::{InputError, ValidationError};
use crate::provider::Provider;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

pub const EXIT_FAILURE: i32 = 1;
pub const EXIT_INVALID_INPUT: i32 = 2;
pub const EXIT_REPLAY_MISMATCH: i32 = 3;

/// hybridops - DR/burst target selection
#[derive(Parser, Debug)]
#[command(
    name = "hybridops",
    version,
    about = "Choose a DR/burst target from recovery-objective metrics, credits and policy"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Decide which provider to route to
    Choose(ChooseArgs),
    /// Re-run a recorded decision and verify it reproduces
    Replay(ReplayArgs),
    /// Configuration utilities
    #[command(subcommand)]
    Config(ConfigCommands),
    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// How `choose` prints its decision on stdout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Only the winning provider id
    #[default]
    Provider,
    /// The full decision record as JSON
    Json,
    /// `export TARGET_CLOUD=...` lines for `eval`
    Env,
    /// Human-readable table
    Table,
}

#[derive(Args, Debug)]
pub struct ChooseArgs {
    /// Path to configuration file
    #[arg(short, long, env = "HYBRIDOPS_CONFIG", default_value = "hybridops.toml")]
    pub config: PathBuf,

    /// Standalone policy file (TOML, or JSON by extension); replaces [policy]
    #[arg(short, long)]
    pub policy: Option<PathBuf>,

    /// Metrics JSON keyed by provider
    #[arg(short, long)]
    pub metrics: Option<PathBuf>,

    /// Inline credits, e.g. "azure=100,gcp=40" (falls back to DECISION_CREDITS)
    #[arg(long, conflicts_with_all = ["credits_file", "credits_prom"])]
    pub credits: Option<String>,

    /// Env file with AZURE_CREDITS=/GCP_CREDITS= lines
    #[arg(long, conflicts_with = "credits_prom")]
    pub credits_file: Option<PathBuf>,

    /// Prometheus text export with <provider>_available_credit samples
    #[arg(long)]
    pub credits_prom: Option<PathBuf>,

    /// Maximum tolerable RPO in seconds
    #[arg(long)]
    pub max_rpo: Option<f64>,

    /// Maximum tolerable RTO in seconds
    #[arg(long)]
    pub max_rto: Option<f64>,

    /// Ranking strategy (balanced, cost, latency)
    #[arg(short, long)]
    pub strategy: Option<Strategy>,

    /// Minimum credit a provider needs to be eligible
    #[arg(long)]
    pub credit_floor: Option<f64>,

    /// Provider to use when nothing meets the SLOs
    #[arg(long)]
    pub fallback: Option<Provider>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Provider)]
    pub format: OutputFormat,

    /// Also write the decision record (JSON) to this file
    #[arg(short, long)]
    pub out: Option<PathBuf>,

    /// Print the decision record to stderr
    #[arg(short, long)]
    pub verbose: bool,

    /// Set log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "HYBRIDOPS_LOG_LEVEL")]
    pub log_level: Option<String>,
}

#[derive(Args, Debug)]
pub struct ReplayArgs {
    /// Decision record JSON written by `choose --out`
    pub record: PathBuf,

    /// Print the replayed record as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Initialize a new configuration file
    Init(ConfigInitArgs),
    /// Print the effective, validated policy
    Show(ConfigShowArgs),
}

#[derive(Args, Debug)]
pub struct ConfigInitArgs {
    /// Output file path
    #[arg(short, long, default_value = "hybridops.toml")]
    pub output: PathBuf,

    /// Overwrite existing file
    #[arg(short, long)]
    pub force: bool,
}

#[derive(Args, Debug)]
pub struct ConfigShowArgs {
    /// Path to configuration file
    #[arg(short, long, default_value = "hybridops.toml")]
    pub config: PathBuf,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: clap_complete::Shell,
}

/// Map a handler error to the process exit code
pub fn exit_code(err: &anyhow::Error) -> i32 {
    if let Some(InputError::Validation(_)) = err.downcast_ref::<InputError>() {
        return EXIT_INVALID_INPUT;
    }
    if err.downcast_ref::<ValidationError>().is_some() {
        return EXIT_INVALID_INPUT;
    }
    if let Some(ConfigError::Validation { .. } | ConfigError::Parse(_)) =
        err.downcast_ref::<ConfigError>()
    {
        return EXIT_INVALID_INPUT;
    }
    if err.downcast_ref::<replay::ReplayMismatch>().is_some() {
        return EXIT_REPLAY_MISMATCH;
    }
    EXIT_FAILURE
}
