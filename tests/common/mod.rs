//! Shared test utilities for hybridops integration tests.
//!
//! Builders for metrics, credits and policies used by the scenario and
//! property tests.

#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use hybridops::config::{Policy, PolicyConfig};
use hybridops::engine::Strategy;
use hybridops::inputs::{CreditBalance, MetricSet, MetricsTable};
use hybridops::provider::Provider;

// =============================================================================
// Well-Known Test Constants
// =============================================================================

/// Fixed decision time; day 289 of 2026 (odd ordinal)
pub fn decided_at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 16, 9, 0, 0).unwrap()
}

/// Day 288 of 2026 (even ordinal)
pub fn decided_at_even_day() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 15, 9, 0, 0).unwrap()
}

// =============================================================================
// Input Builders
// =============================================================================

/// Metrics from `(provider, rpo, rto, latency)` rows
pub fn metrics(rows: &[(Provider, f64, f64, f64)]) -> MetricsTable {
    rows.iter()
        .map(|(p, rpo, rto, latency)| (*p, MetricSet::new(*rpo, *rto, *latency)))
        .collect()
}

/// Credits from `(provider, amount)` pairs
pub fn credits(pairs: &[(Provider, f64)]) -> CreditBalance {
    pairs.iter().copied().collect()
}

/// The azure/gcp metrics used by most scenarios
pub fn healthy_pair() -> MetricsTable {
    metrics(&[
        (Provider::Azure, 200.0, 400.0, 45.0),
        (Provider::Gcp, 240.0, 480.0, 55.0),
    ])
}

// =============================================================================
// Policy Builders
// =============================================================================

pub fn policy_with(strategy: Strategy) -> Policy {
    PolicyConfig {
        strategy,
        ..Default::default()
    }
    .validate()
    .unwrap()
}

pub fn policy_from(config: PolicyConfig) -> Policy {
    config.validate().unwrap()
}
