//! Configuration module for hybridops
//!
//! Provides layered configuration loading from files, environment variables, and defaults.
//!
//! # Configuration Precedence
//!
//! 1. CLI arguments (highest priority)
//! 2. Environment variables (`DECISION_*`, `HYBRIDOPS_*`)
//! 3. Configuration file (TOML)
//! 4. Default values (lowest priority)
//!
//! # Example
//!
//! ```rust
//! use hybridops::config::DecisionConfig;
//!
//! // Load defaults
//! let config = DecisionConfig::default();
//! assert_eq!(config.policy.max_rpo_seconds, 300.0);
//!
//! // Parse from TOML
//! let toml = r#"
//! [policy]
//! max_rpo_seconds = 120
//! "#;
//! let config: DecisionConfig = toml::from_str(toml).unwrap();
//! assert_eq!(config.policy.max_rpo_seconds, 120.0);
//! ```

pub mod error;
pub mod inputs;
pub mod logging;
pub mod policy;

pub use error::ConfigError;
pub use inputs::InputsConfig;
pub use logging::{LogFormat, LoggingConfig};
pub use policy::{Policy, PolicyConfig, WeightsConfig};

use crate::provider::Provider;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Unified configuration for the `hybridops` CLI.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DecisionConfig {
    /// Selection policy (thresholds, strategy, weights, fallback)
    pub policy: PolicyConfig,
    /// Default input locations
    pub inputs: InputsConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

impl DecisionConfig {
    /// Load configuration from a TOML file
    ///
    /// If path is None, returns default configuration.
    /// If path doesn't exist, returns NotFound error.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(p) => {
                if !p.exists() {
                    return Err(ConfigError::NotFound(p.to_path_buf()));
                }
                let content = std::fs::read_to_string(p)?;
                toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))
            }
            None => Ok(Self::default()),
        }
    }

    /// Apply environment variable overrides
    ///
    /// Invalid values are silently ignored (the file/default value is kept).
    pub fn with_env_overrides(mut self) -> Self {
        // Logging settings
        if let Ok(level) = std::env::var("HYBRIDOPS_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("HYBRIDOPS_LOG_FORMAT") {
            if let Ok(f) = format.parse() {
                self.logging.format = f;
            }
        }

        // Policy settings
        if let Ok(strategy) = std::env::var("DECISION_STRATEGY") {
            if let Ok(s) = strategy.parse() {
                self.policy.strategy = s;
            }
        }
        if let Ok(max_rpo) = std::env::var("DECISION_MAX_RPO") {
            if let Ok(v) = max_rpo.trim().parse() {
                self.policy.max_rpo_seconds = v;
            }
        }
        if let Ok(max_rto) = std::env::var("DECISION_MAX_RTO") {
            if let Ok(v) = max_rto.trim().parse() {
                self.policy.max_rto_seconds = v;
            }
        }
        if let Ok(floor) = std::env::var("DECISION_CREDIT_FLOOR") {
            if let Ok(v) = floor.trim().parse() {
                self.policy.credit_floor = Some(v);
            }
        }
        if let Ok(fallback) = std::env::var("DECISION_FALLBACK") {
            if let Ok(p) = fallback.parse::<Provider>() {
                self.policy.default_fallback_provider = Some(p);
            }
        }

        self
    }

    /// Validate configuration, producing the frozen policy
    pub fn validate(&self) -> Result<Policy, ConfigError> {
        self.logging.validate()?;
        self.policy.validate()
    }
}
