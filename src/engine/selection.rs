//! Deterministic tie-breaking and final selection
//!
//! Candidates are narrowed rule by rule until one remains. The canonical
//! chain is: higher credit, lower latency, lower weighted score, then roster
//! order. Score-ranked strategies (`balanced`, `latency`) move the weighted
//! score to the front; `cost` keeps credit first.

use crate::engine::eligibility::Candidate;
use crate::engine::record::ReasonCode;
use crate::engine::strategies::{Strategy, TieBreak};
use crate::provider::Provider;
use chrono::{DateTime, Datelike, Utc};
use std::collections::BTreeMap;

/// A single precedence rule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    HigherCredit,
    LowerLatency,
    LowestScore,
}

impl Rule {
    fn reason(self) -> ReasonCode {
        match self {
            Rule::HigherCredit => ReasonCode::HigherCredit,
            Rule::LowerLatency => ReasonCode::LowerLatency,
            Rule::LowestScore => ReasonCode::LowestWeightedScore,
        }
    }

    /// Sort key where lower is better
    fn key(self, candidate: &Candidate, scores: &BTreeMap<Provider, f64>) -> f64 {
        match self {
            Rule::HigherCredit => -candidate.credit,
            Rule::LowerLatency => candidate.metrics.latency_ms,
            Rule::LowestScore => scores
                .get(&candidate.provider)
                .copied()
                .unwrap_or(f64::INFINITY),
        }
    }
}

/// Rule order for the given strategy
pub fn precedence(strategy: Strategy) -> &'static [Rule] {
    match strategy {
        Strategy::Cost => &[Rule::HigherCredit, Rule::LowerLatency, Rule::LowestScore],
        Strategy::Balanced | Strategy::Latency => {
            &[Rule::LowestScore, Rule::HigherCredit, Rule::LowerLatency]
        }
    }
}

/// Winning provider and the rule that separated it from the rest
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub provider: Provider,
    pub reason: ReasonCode,
}

/// Narrow `candidates` (in roster order) through `rules`, falling back to
/// `tie_break` when every rule ties.
///
/// # Panics
///
/// Panics if `candidates` is empty.
pub fn rank(
    candidates: &[&Candidate],
    rules: &[Rule],
    scores: &BTreeMap<Provider, f64>,
    tie_break: TieBreak,
    decided_at: DateTime<Utc>,
) -> Selection {
    let mut tied: Vec<&Candidate> = candidates.to_vec();
    for &rule in rules {
        if tied.len() <= 1 {
            break;
        }
        let best = tied
            .iter()
            .map(|c| rule.key(c, scores))
            .filter(|key| !key.is_nan())
            .fold(f64::INFINITY, f64::min);
        let leaders: Vec<&Candidate> = tied
            .iter()
            .copied()
            .filter(|c| rule.key(c, scores) == best)
            .collect();
        // NaN keys never compare equal, so a rule nobody wins leaves the tie
        if leaders.is_empty() {
            continue;
        }
        tied = leaders;

        if tied.len() == 1 {
            return Selection {
                provider: tied[0].provider,
                reason: rule.reason(),
            };
        }
    }

    match tie_break {
        TieBreak::DeclarationOrder => Selection {
            provider: tied[0].provider,
            reason: ReasonCode::DeclarationOrder,
        },
        TieBreak::DayParity => {
            let even_day = decided_at.ordinal() % 2 == 0;
            let pick = if even_day { tied[0] } else { tied[tied.len() - 1] };
            tracing::debug!(
                day_of_year = decided_at.ordinal(),
                provider = %pick.provider,
                "Exact tie resolved by day parity"
            );
            Selection {
                provider: pick.provider,
                reason: ReasonCode::DayParity,
            }
        }
    }
}

/// Select among two or more eligible candidates.
pub fn select(
    eligible: &[&Candidate],
    scores: &BTreeMap<Provider, f64>,
    strategy: Strategy,
    tie_break: TieBreak,
    decided_at: DateTime<Utc>,
) -> Selection {
    rank(eligible, precedence(strategy), scores, tie_break, decided_at)
}
