//! Execution target identifiers
//!
//! Providers are a closed set validated at load time, so eligibility and
//! scoring match on variants instead of comparing free-form strings.

use crate::inputs::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// An execution target a workload can be routed to.
///
/// Variant order is the fixed declaration order used as the last tie-break
/// rule, and the ordering of every provider-keyed map in a decision record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum Provider {
    Azure,
    Gcp,
    Onprem,
}

impl Provider {
    /// Every known provider, in declaration order.
    pub const ALL: [Provider; 3] = [Provider::Azure, Provider::Gcp, Provider::Onprem];

    /// Canonical lowercase identifier
    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::Azure => "azure",
            Provider::Gcp => "gcp",
            Provider::Onprem => "onprem",
        }
    }
}

impl FromStr for Provider {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "azure" => Ok(Provider::Azure),
            "gcp" => Ok(Provider::Gcp),
            "onprem" => Ok(Provider::Onprem),
            _ => Err(ValidationError::UnknownProvider(s.trim().to_string())),
        }
    }
}

impl TryFrom<String> for Provider {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
