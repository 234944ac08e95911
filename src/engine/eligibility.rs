//! SLO eligibility filter

use crate::config::Policy;
use crate::inputs::{CreditBalance, MetricSet, MetricsTable};
use crate::provider::Provider;
use std::collections::BTreeMap;

/// A roster provider joined with its metrics and credit
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    pub provider: Provider,
    pub metrics: MetricSet,
    pub credit: f64,
    pub eligible: bool,
}

/// Whether a provider meets the policy's SLO thresholds (and credit floor,
/// when one is configured).
pub fn is_eligible(metrics: &MetricSet, credit: f64, policy: &Policy) -> bool {
    let rpo_ok = metrics.rpo_seconds <= policy.max_rpo_seconds();
    let rto_ok = metrics.rto_seconds <= policy.max_rto_seconds();
    let credit_ok = policy.credit_floor().map_or(true, |floor| credit >= floor);
    rpo_ok && rto_ok && credit_ok
}

/// Build one candidate per roster provider, in roster order.
///
/// Providers missing from `metrics` or `credits` get sentinel metrics and
/// zero credit, which leaves them ineligible under any realistic policy.
pub fn build_candidates(
    metrics: &MetricsTable,
    credits: &CreditBalance,
    policy: &Policy,
) -> Vec<Candidate> {
    policy
        .providers()
        .iter()
        .map(|&provider| {
            let metrics = metrics.get(provider);
            let credit = credits.get(provider);
            let eligible = is_eligible(&metrics, credit, policy);
            tracing::debug!(
                provider = %provider,
                rpo_seconds = metrics.rpo_seconds,
                rto_seconds = metrics.rto_seconds,
                latency_ms = metrics.latency_ms,
                credit,
                eligible,
                "Evaluated eligibility"
            );
            Candidate {
                provider,
                metrics,
                credit,
                eligible,
            }
        })
        .collect()
}

/// Eligibility verdict for every roster provider
pub fn eligibility_map(candidates: &[Candidate]) -> BTreeMap<Provider, bool> {
    candidates.iter().map(|c| (c.provider, c.eligible)).collect()
}
