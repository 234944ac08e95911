//! Decision record
//!
//! The auditable output of one engine run. Maps are ordered by provider so
//! that serializing the same decision twice yields identical bytes.

use crate::config::Policy;
use crate::inputs::{CreditBalance, MetricSet, MetricsTable};
use crate::provider::Provider;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Why the chosen provider won. Closed set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReasonCode {
    /// Exactly one provider met the SLOs; scoring was skipped
    OnlyProviderMeetsSlo,
    /// Won on weighted score
    LowestWeightedScore,
    /// Won on available credit
    HigherCredit,
    /// Won on latency after credit tied
    LowerLatency,
    /// Exact tie on every rule; first in roster order
    DeclarationOrder,
    /// Exact tie on every rule; picked by day-of-year parity
    DayParity,
    /// No provider met the SLOs. Callers that need a hard stop should alert
    /// on this instead of treating it as a successful automated cutover.
    NoCandidateMetConstraints,
}

impl ReasonCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReasonCode::OnlyProviderMeetsSlo => "only_provider_meets_slo",
            ReasonCode::LowestWeightedScore => "lowest_weighted_score",
            ReasonCode::HigherCredit => "higher_credit",
            ReasonCode::LowerLatency => "lower_latency",
            ReasonCode::DeclarationOrder => "declaration_order",
            ReasonCode::DayParity => "day_parity",
            ReasonCode::NoCandidateMetConstraints => "no_candidate_met_constraints",
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, ReasonCode::NoCandidateMetConstraints)
    }
}

impl fmt::Display for ReasonCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolved inputs, kept verbatim for audit and replay
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputSnapshot {
    pub metrics: BTreeMap<Provider, MetricSet>,
    pub credits: BTreeMap<Provider, f64>,
    pub policy: Policy,
}

impl InputSnapshot {
    /// Capture inputs resolved over the policy roster
    pub fn capture(metrics: &MetricsTable, credits: &CreditBalance, policy: &Policy) -> Self {
        Self {
            metrics: metrics.resolved(policy.providers()),
            credits: credits.resolved(policy.providers()),
            policy: policy.clone(),
        }
    }

    pub fn metrics_table(&self) -> MetricsTable {
        self.metrics.iter().map(|(p, m)| (*p, *m)).collect()
    }

    pub fn credit_balance(&self) -> CreditBalance {
        self.credits.iter().map(|(p, c)| (*p, *c)).collect()
    }
}

/// Outcome of one decision. Read-only once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionRecord {
    timestamp_utc: String,
    chosen: Provider,
    reason: ReasonCode,
    eligible: BTreeMap<Provider, bool>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    scores: BTreeMap<Provider, f64>,
    inputs: InputSnapshot,
}

impl DecisionRecord {
    pub(crate) fn new(
        decided_at: DateTime<Utc>,
        chosen: Provider,
        reason: ReasonCode,
        eligible: BTreeMap<Provider, bool>,
        scores: BTreeMap<Provider, f64>,
        inputs: InputSnapshot,
    ) -> Self {
        Self {
            timestamp_utc: decided_at.to_rfc3339_opts(SecondsFormat::Secs, true),
            chosen,
            reason,
            eligible,
            scores,
            inputs,
        }
    }

    /// ISO-8601 UTC timestamp, second precision (`2026-10-16T09:30:00Z`)
    pub fn timestamp_utc(&self) -> &str {
        &self.timestamp_utc
    }

    /// Parse the recorded timestamp back into a `DateTime`
    pub fn decided_at(&self) -> Result<DateTime<Utc>, chrono::ParseError> {
        DateTime::parse_from_rfc3339(&self.timestamp_utc).map(|t| t.with_timezone(&Utc))
    }

    pub fn chosen(&self) -> Provider {
        self.chosen
    }

    pub fn reason(&self) -> ReasonCode {
        self.reason
    }

    pub fn eligible(&self) -> &BTreeMap<Provider, bool> {
        &self.eligible
    }

    /// Weighted scores; empty unless scoring ran
    pub fn scores(&self) -> &BTreeMap<Provider, f64> {
        &self.scores
    }

    pub fn inputs(&self) -> &InputSnapshot {
        &self.inputs
    }

    pub fn is_degraded(&self) -> bool {
        self.reason.is_degraded()
    }

    /// Shell `export` lines for scripts that `eval` the output
    pub fn export_lines(&self) -> Vec<String> {
        vec![
            format!("export TARGET_CLOUD={}", self.chosen),
            format!("export DECISION_REASON={}", self.reason),
        ]
    }
}
