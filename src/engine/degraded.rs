//! Degraded-mode resolution when no provider meets the SLOs

use crate::config::Policy;
use crate::engine::eligibility::Candidate;
use crate::engine::selection::{rank, Rule};
use crate::engine::strategies::TieBreak;
use crate::provider::Provider;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

const DEGRADED_RULES: [Rule; 2] = [Rule::HigherCredit, Rule::LowerLatency];

/// Pick a provider when nothing is eligible.
///
/// The configured fallback wins outright. Without one, every roster
/// provider competes on credit, then latency, then roster order; SLO
/// eligibility and the opt-in day-parity rule are ignored here.
pub fn resolve(candidates: &[Candidate], policy: &Policy, decided_at: DateTime<Utc>) -> Provider {
    if let Some(fallback) = policy.default_fallback_provider() {
        tracing::warn!(
            fallback = %fallback,
            "No provider met the SLOs, using configured fallback"
        );
        return fallback;
    }

    let all: Vec<&Candidate> = candidates.iter().collect();
    let selection = rank(
        &all,
        &DEGRADED_RULES,
        &BTreeMap::new(),
        TieBreak::DeclarationOrder,
        decided_at,
    );
    tracing::warn!(
        provider = %selection.provider,
        decided_by = %selection.reason,
        "No provider met the SLOs and no fallback is configured, ranked all providers"
    );
    selection.provider
}
