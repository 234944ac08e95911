//! Choose command implementation

use crate::cli::output::render;
use crate::cli::ChooseArgs;
use crate::config::{DecisionConfig, InputsConfig, PolicyConfig};
use crate::engine::{decide, DecisionRecord};
use crate::inputs::{load_credits, load_metrics, CreditSource};
use anyhow::Context;
use chrono::{DateTime, Utc};

/// Load configuration with CLI overrides
///
/// Order: config file (or a standalone `--policy` file for the policy
/// section), then environment variables, then CLI flags.
pub fn load_config_with_overrides(args: &ChooseArgs) -> anyhow::Result<DecisionConfig> {
    // Load from file if it exists, otherwise use defaults
    let mut config = if args.config.exists() {
        DecisionConfig::load(Some(&args.config))?
    } else {
        tracing::debug!("Config file not found, using defaults");
        DecisionConfig::default()
    };

    if let Some(ref policy_path) = args.policy {
        config.policy = PolicyConfig::load_file(policy_path)?;
    }

    config = config.with_env_overrides();

    if let Some(max_rpo) = args.max_rpo {
        config.policy.max_rpo_seconds = max_rpo;
    }
    if let Some(max_rto) = args.max_rto {
        config.policy.max_rto_seconds = max_rto;
    }
    if let Some(strategy) = args.strategy {
        config.policy.strategy = strategy;
    }
    if let Some(floor) = args.credit_floor {
        config.policy.credit_floor = Some(floor);
    }
    if let Some(fallback) = args.fallback {
        config.policy.default_fallback_provider = Some(fallback);
    }
    if let Some(ref log_level) = args.log_level {
        config.logging.level = log_level.clone();
    }

    Ok(config)
}

/// Pick the credit source: CLI flags first, then `DECISION_CREDITS`, then
/// the config file. With nothing configured every provider has zero credit.
pub fn resolve_credit_source(
    args: &ChooseArgs,
    inputs: &InputsConfig,
    env_credits: Option<String>,
) -> CreditSource {
    if let Some(ref raw) = args.credits {
        return CreditSource::Inline(raw.clone());
    }
    if let Some(ref path) = args.credits_file {
        return CreditSource::EnvFile(path.clone());
    }
    if let Some(ref path) = args.credits_prom {
        return CreditSource::Prometheus(path.clone());
    }
    if let Some(raw) = env_credits {
        return CreditSource::Inline(raw);
    }
    if let Some(ref raw) = inputs.credits {
        return CreditSource::Inline(raw.clone());
    }
    if let Some(ref path) = inputs.credits_file {
        return CreditSource::EnvFile(path.clone());
    }
    if let Some(ref path) = inputs.credits_prom {
        return CreditSource::Prometheus(path.clone());
    }
    CreditSource::Inline(String::new())
}

/// Handle `hybridops choose` with an already-resolved configuration
///
/// Returns the stdout payload. Writes the record to `--out` and, with
/// `--verbose`, to stderr.
pub fn handle_choose(
    args: &ChooseArgs,
    config: &DecisionConfig,
    decided_at: DateTime<Utc>,
) -> anyhow::Result<String> {
    let policy = config.validate()?;

    let metrics_path = args.metrics.as_deref().or(config.inputs.metrics.as_deref());
    let metrics = load_metrics(metrics_path)?;

    let source = resolve_credit_source(args, &config.inputs, std::env::var("DECISION_CREDITS").ok());
    let credits = load_credits(&source)?;

    let record = decide(&metrics, &credits, &policy, decided_at);

    if let Some(ref out) = args.out {
        write_record(&record, out)?;
    }
    if args.verbose {
        eprintln!("{}", serde_json::to_string_pretty(&record)?);
    }

    render(&record, args.format)
}

fn write_record(record: &DecisionRecord, path: &std::path::Path) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(record)?;
    std::fs::write(path, json + "\n")
        .with_context(|| format!("Failed to write decision record to {}", path.display()))?;
    tracing::info!(path = %path.display(), "Wrote decision record");
    Ok(())
}

/// Entry point used by `main`: load config, set up logging, decide now.
pub fn run_choose(args: &ChooseArgs) -> anyhow::Result<String> {
    let config = load_config_with_overrides(args)?;
    if let Err(e) = crate::logging::init_tracing(&config.logging) {
        eprintln!("Warning: Failed to initialize logging: {}", e);
    }
    handle_choose(args, &config, Utc::now())
}
