//! `[logging]` section: diagnostics go to stderr so stdout stays the decision

use crate::config::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Modules that accept a per-component level under `component_levels`
pub const COMPONENTS: &[&str] = &["cli", "config", "engine", "inputs", "logging"];

const LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error", "off"];

/// Diagnostic output format (`HYBRIDOPS_LOG_FORMAT`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    #[default]
    Pretty,
    /// One JSON object per event, for pipeline log collectors
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            _ => Err(format!("Invalid log format: {} (expected pretty or json)", s)),
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LogFormat::Pretty => "pretty",
            LogFormat::Json => "json",
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Base level (`HYBRIDOPS_LOG_LEVEL`); quiet by default
    pub level: String,
    pub format: LogFormat,
    /// Per-module overrides, e.g. `{ engine = "debug" }`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub component_levels: Option<BTreeMap<String, String>>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            format: LogFormat::Pretty,
            component_levels: None,
        }
    }
}

impl LoggingConfig {
    /// Reject empty or unknown levels and components this crate doesn't have.
    ///
    /// The base level may be a full filter directive (it contains `=` or `,`),
    /// in which case it is passed through untouched.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let level = self.level.trim();
        if level.is_empty() {
            return Err(ConfigError::Validation {
                field: "logging.level".to_string(),
                message: "level cannot be empty".to_string(),
            });
        }
        if !level.contains(['=', ',']) && !is_level(level) {
            return Err(ConfigError::Validation {
                field: "logging.level".to_string(),
                message: format!("unknown level '{}'", level),
            });
        }

        for (component, level) in self.component_levels.iter().flatten() {
            if !COMPONENTS.contains(&component.as_str()) {
                return Err(ConfigError::Validation {
                    field: format!("logging.component_levels.{}", component),
                    message: format!("unknown component, expected one of {}", COMPONENTS.join(", ")),
                });
            }
            if !is_level(level) {
                return Err(ConfigError::Validation {
                    field: format!("logging.component_levels.{}", component),
                    message: format!("unknown level '{}'", level),
                });
            }
        }
        Ok(())
    }
}

fn is_level(level: &str) -> bool {
    LEVELS.contains(&level.trim().to_ascii_lowercase().as_str())
}
