//! Input normalization
//!
//! Coerces raw metrics and credits into canonical numeric form before the
//! engine sees them. Malformed input fails with [`ValidationError`]; absent
//! input is defaulted (sentinel metrics, zero credit) so it degrades ranking
//! instead of aborting.
//!
//! The `load_*` functions are the file-reading collaborators used by the CLI.

pub mod credits;
pub mod error;
pub mod metrics;

pub use credits::{parse_credits, parse_credits_env, parse_credits_prometheus, CreditBalance};
pub use error::{InputError, ValidationError};
pub use metrics::{normalize_metrics, parse_metrics_json, MetricSet, MetricsTable, METRIC_SENTINEL};

use std::path::{Path, PathBuf};

/// Where credit balances come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreditSource {
    /// Inline `azure=100,gcp=40` string
    Inline(String),
    /// Env file with `<PROVIDER>_CREDITS=` lines
    EnvFile(PathBuf),
    /// Prometheus text export with `<provider>_available_credit` samples
    Prometheus(PathBuf),
}

/// Load and normalize a metrics JSON file. `None` yields an empty table.
pub fn load_metrics(path: Option<&Path>) -> Result<MetricsTable, InputError> {
    let Some(path) = path else {
        tracing::debug!("No metrics file given, every provider uses sentinel metrics");
        return Ok(MetricsTable::new());
    };

    let text = std::fs::read_to_string(path).map_err(|e| InputError::io(path, e))?;
    let table = parse_metrics_json(&text)?;
    tracing::debug!(path = %path.display(), "Loaded metrics");
    Ok(table)
}

/// Resolve credit balances from the given source.
pub fn load_credits(source: &CreditSource) -> Result<CreditBalance, InputError> {
    let balance = match source {
        CreditSource::Inline(raw) => parse_credits(raw)?,
        CreditSource::EnvFile(path) => {
            let text = std::fs::read_to_string(path).map_err(|e| InputError::io(path, e))?;
            parse_credits_env(&text)?
        }
        CreditSource::Prometheus(path) => {
            let text = std::fs::read_to_string(path).map_err(|e| InputError::io(path, e))?;
            parse_credits_prometheus(&text)?
        }
    };
    tracing::debug!(source = ?source, "Loaded credits");
    Ok(balance)
}
