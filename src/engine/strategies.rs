//! Ranking strategies and final tie-break rules

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Strategy selects the weight profile and the primary ranking key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Rank by the policy's declared weights as-is
    #[default]
    Balanced,

    /// Rank by available credit first, weighted score after
    Cost,

    /// Rank by a latency-heavy weight profile
    Latency,
}

impl FromStr for Strategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "balanced" => Ok(Strategy::Balanced),
            "cost" => Ok(Strategy::Cost),
            "latency" => Ok(Strategy::Latency),
            _ => Err(format!("Unknown strategy: {}", s)),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::Balanced => write!(f, "balanced"),
            Strategy::Cost => write!(f, "cost"),
            Strategy::Latency => write!(f, "latency"),
        }
    }
}

/// Rule applied when every other precedence rule ties
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TieBreak {
    /// First tied provider in roster order
    #[default]
    DeclarationOrder,

    /// Day-of-year parity of the decision timestamp: even picks the first
    /// tied provider in roster order, odd picks the last. Opt-in only; the
    /// outcome depends on the invocation date.
    DayParity,
}

impl FromStr for TieBreak {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "declaration_order" => Ok(TieBreak::DeclarationOrder),
            "day_parity" => Ok(TieBreak::DayParity),
            _ => Err(format!("Unknown tie-break rule: {}", s)),
        }
    }
}

impl fmt::Display for TieBreak {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TieBreak::DeclarationOrder => write!(f, "declaration_order"),
            TieBreak::DayParity => write!(f, "day_parity"),
        }
    }
}
