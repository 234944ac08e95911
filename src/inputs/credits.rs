//! Spend-credit parsing
//!
//! Credits arrive in three shapes: an inline `azure=100,gcp=40` string, an
//! env file with `AZURE_CREDITS=100` lines, or a Prometheus text export with
//! `azure_available_credit 100` samples. All three produce a [`CreditBalance`].

use crate::inputs::ValidationError;
use crate::provider::Provider;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

const ENV_KEY_SUFFIX: &str = "_CREDITS";
const PROM_METRIC_SUFFIX: &str = "_available_credit";

/// Available spend credit per provider. Absent providers read as `0.0`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CreditBalance(BTreeMap<Provider, f64>);

impl CreditBalance {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, provider: Provider, amount: f64) -> Self {
        self.0.insert(provider, amount);
        self
    }

    /// Balance for a provider, `0.0` when absent
    pub fn get(&self, provider: Provider) -> f64 {
        self.0.get(&provider).copied().unwrap_or(0.0)
    }

    pub fn insert(&mut self, provider: Provider, amount: f64) -> Option<f64> {
        self.0.insert(provider, amount)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Balances for every roster provider, absent ones filled with `0.0`.
    pub fn resolved(&self, roster: &[Provider]) -> BTreeMap<Provider, f64> {
        roster.iter().map(|p| (*p, self.get(*p))).collect()
    }

    fn insert_unique(&mut self, provider: Provider, amount: f64) -> Result<(), ValidationError> {
        match self.0.insert(provider, amount) {
            Some(_) => Err(ValidationError::DuplicateCredit(provider)),
            None => Ok(()),
        }
    }
}

impl FromIterator<(Provider, f64)> for CreditBalance {
    fn from_iter<I: IntoIterator<Item = (Provider, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Parse an inline `provider=value,provider=value` credit string.
///
/// Provider names are case-insensitive. Empty segments are skipped, so an
/// empty string yields an empty balance (every provider at `0.0`).
pub fn parse_credits(raw: &str) -> Result<CreditBalance, ValidationError> {
    let mut balance = CreditBalance::new();

    for part in raw.split(',') {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }

        let (name, value) = part
            .split_once('=')
            .ok_or_else(|| ValidationError::CreditsSyntax(part.to_string()))?;
        if name.trim().is_empty() {
            return Err(ValidationError::CreditsSyntax(part.to_string()));
        }

        let provider: Provider = name.parse()?;
        let amount = parse_amount(provider, value)?;
        balance.insert_unique(provider, amount)?;
    }

    Ok(balance)
}

/// Parse env-file credits (`AZURE_CREDITS=100`).
///
/// Blank lines and `#` comments are skipped, keys without the `_CREDITS`
/// suffix are ignored, and an empty value reads as zero.
pub fn parse_credits_env(text: &str) -> Result<CreditBalance, ValidationError> {
    let mut balance = CreditBalance::new();

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let Some((key, value)) = line.split_once('=') else {
            continue;
        };

        let key = key.trim();
        let Some(prefix) = key.strip_suffix(ENV_KEY_SUFFIX) else {
            continue;
        };

        let provider: Provider = prefix.parse()?;
        let value = value.trim();
        let amount = if value.is_empty() {
            0.0
        } else {
            parse_amount(provider, value)?
        };
        balance.insert_unique(provider, amount)?;
    }

    Ok(balance)
}

/// Parse Prometheus text exposition credits (`gcp_available_credit 40`).
///
/// Only `<provider>_available_credit` samples are read; labels and a
/// trailing timestamp are tolerated.
pub fn parse_credits_prometheus(text: &str) -> Result<CreditBalance, ValidationError> {
    let mut balance = CreditBalance::new();

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let mut fields = line.split_whitespace();
        let (Some(name), Some(value)) = (fields.next(), fields.next()) else {
            continue;
        };
        let name = name.split('{').next().unwrap_or(name);
        let Some(prefix) = name.strip_suffix(PROM_METRIC_SUFFIX) else {
            continue;
        };

        let provider: Provider = prefix.parse()?;
        let amount = parse_amount(provider, value)?;
        balance.insert_unique(provider, amount)?;
    }

    Ok(balance)
}

fn parse_amount(provider: Provider, value: &str) -> Result<f64, ValidationError> {
    let value = value.trim();
    match value.parse::<f64>() {
        Ok(amount) if amount.is_finite() && amount >= 0.0 => Ok(amount),
        _ => Err(ValidationError::CreditValue {
            provider,
            value: value.to_string(),
        }),
    }
}
