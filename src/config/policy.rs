//! Selection policy
//!
//! [`PolicyConfig`] is the loosely-typed form read from TOML/JSON (it also
//! accepts the legacy decision-service keys). [`PolicyConfig::validate`]
//! turns it into an immutable [`Policy`], the only form the engine accepts.

use crate::config::error::ConfigError;
use crate::engine::{ScoringWeights, Strategy, TieBreak};
use crate::provider::Provider;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

pub const DEFAULT_MAX_RPO_SECONDS: f64 = 300.0;
pub const DEFAULT_MAX_RTO_SECONDS: f64 = 900.0;

/// Raw policy as written in configuration files
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicyConfig {
    #[serde(alias = "rpo_max_s", alias = "max_rpo")]
    pub max_rpo_seconds: f64,

    #[serde(alias = "rto_max_s", alias = "max_rto")]
    pub max_rto_seconds: f64,

    pub strategy: Strategy,

    /// Declared weights; absent means the default profile
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weights: Option<WeightsConfig>,

    /// Minimum credit a provider needs to be eligible
    #[serde(alias = "skip_if_credits_below", skip_serializing_if = "Option::is_none")]
    pub credit_floor: Option<f64>,

    /// Provider chosen outright when nothing is eligible
    #[serde(alias = "default_fallback", skip_serializing_if = "Option::is_none")]
    pub default_fallback_provider: Option<Provider>,

    /// Candidate roster, in tie-break declaration order
    pub providers: Vec<Provider>,

    pub tie_break: TieBreak,
}

/// Declared weights. Keys left out of a weights table count as zero.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WeightsConfig {
    #[serde(alias = "rpo_s", alias = "rpo_seconds")]
    pub rpo: f64,
    #[serde(alias = "rto_s", alias = "rto_seconds")]
    pub rto: f64,
    #[serde(alias = "latency_ms")]
    pub latency: f64,
}

impl From<WeightsConfig> for ScoringWeights {
    fn from(weights: WeightsConfig) -> Self {
        ScoringWeights {
            rpo: weights.rpo,
            rto: weights.rto,
            latency: weights.latency,
        }
    }
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            max_rpo_seconds: DEFAULT_MAX_RPO_SECONDS,
            max_rto_seconds: DEFAULT_MAX_RTO_SECONDS,
            strategy: Strategy::default(),
            weights: None,
            credit_floor: None,
            default_fallback_provider: None,
            providers: vec![Provider::Azure, Provider::Gcp],
            tie_break: TieBreak::default(),
        }
    }
}

impl PolicyConfig {
    /// Load a standalone policy file. `.json` files are read as JSON,
    /// anything else as TOML.
    pub fn load_file(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path)?;

        let is_json = path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("json"))
            .unwrap_or(false);
        if is_json {
            serde_json::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))
        } else {
            toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))
        }
    }

    /// Validate once and freeze into a [`Policy`]
    pub fn validate(&self) -> Result<Policy, ConfigError> {
        check_threshold("policy.max_rpo_seconds", self.max_rpo_seconds)?;
        check_threshold("policy.max_rto_seconds", self.max_rto_seconds)?;

        let weights = self.weights.map(ScoringWeights::from).unwrap_or_default();
        weights.validate().map_err(|message| ConfigError::Validation {
            field: "policy.weights".to_string(),
            message,
        })?;

        if let Some(floor) = self.credit_floor {
            check_threshold("policy.credit_floor", floor)?;
        }

        if self.providers.is_empty() {
            return Err(ConfigError::Validation {
                field: "policy.providers".to_string(),
                message: "at least one provider is required".to_string(),
            });
        }
        let mut seen = HashSet::new();
        for provider in &self.providers {
            if !seen.insert(provider) {
                return Err(ConfigError::Validation {
                    field: "policy.providers".to_string(),
                    message: format!("'{}' is listed more than once", provider),
                });
            }
        }

        Ok(Policy {
            max_rpo_seconds: self.max_rpo_seconds,
            max_rto_seconds: self.max_rto_seconds,
            strategy: self.strategy,
            weights,
            credit_floor: self.credit_floor,
            default_fallback_provider: self.default_fallback_provider,
            providers: self.providers.clone(),
            tie_break: self.tie_break,
        })
    }
}

fn check_threshold(field: &str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Validation {
            field: field.to_string(),
            message: format!("must be a non-negative finite number, got {}", value),
        })
    }
}

/// Validated selection policy.
///
/// Constructed only through [`PolicyConfig::validate`] (deserialization goes
/// through it too), so every `Policy` the engine sees is well-formed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "PolicyConfig")]
pub struct Policy {
    max_rpo_seconds: f64,
    max_rto_seconds: f64,
    strategy: Strategy,
    weights: ScoringWeights,
    #[serde(skip_serializing_if = "Option::is_none")]
    credit_floor: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    default_fallback_provider: Option<Provider>,
    providers: Vec<Provider>,
    tie_break: TieBreak,
}

impl TryFrom<PolicyConfig> for Policy {
    type Error = ConfigError;

    fn try_from(config: PolicyConfig) -> Result<Self, Self::Error> {
        config.validate()
    }
}

impl Default for Policy {
    fn default() -> Self {
        Self {
            max_rpo_seconds: DEFAULT_MAX_RPO_SECONDS,
            max_rto_seconds: DEFAULT_MAX_RTO_SECONDS,
            strategy: Strategy::default(),
            weights: ScoringWeights::default(),
            credit_floor: None,
            default_fallback_provider: None,
            providers: vec![Provider::Azure, Provider::Gcp],
            tie_break: TieBreak::default(),
        }
    }
}

impl Policy {
    /// Load and validate a standalone policy file
    pub fn load_file(path: &Path) -> Result<Self, ConfigError> {
        PolicyConfig::load_file(path)?.validate()
    }

    pub fn max_rpo_seconds(&self) -> f64 {
        self.max_rpo_seconds
    }

    pub fn max_rto_seconds(&self) -> f64 {
        self.max_rto_seconds
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Declared weights, before the strategy profile is applied
    pub fn weights(&self) -> ScoringWeights {
        self.weights
    }

    pub fn credit_floor(&self) -> Option<f64> {
        self.credit_floor
    }

    pub fn default_fallback_provider(&self) -> Option<Provider> {
        self.default_fallback_provider
    }

    /// Known providers in declaration order
    pub fn providers(&self) -> &[Provider] {
        &self.providers
    }

    pub fn tie_break(&self) -> TieBreak {
        self.tie_break
    }
}
