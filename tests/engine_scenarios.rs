//! End-to-end decision scenarios
//!
//! Each test runs the full pipeline (credit parsing, metrics normalization,
//! policy validation, decide) the way the CLI does, but in-process.

mod common;

use common::*;
use hybridops::config::{PolicyConfig, WeightsConfig};
use hybridops::engine::{decide, replay, ReasonCode, Strategy, TieBreak};
use hybridops::inputs::{normalize_metrics, parse_credits, ValidationError};
use hybridops::provider::Provider;
use serde_json::json;

#[test]
fn both_eligible_higher_credit_provider_wins_balanced() {
    let credits = parse_credits("azure=100,gcp=40").unwrap();
    let policy = policy_with(Strategy::Balanced);

    let record = decide(&healthy_pair(), &credits, &policy, decided_at());

    assert_eq!(record.chosen(), Provider::Azure);
    assert!(record.eligible().values().all(|e| *e));
    assert_eq!(record.scores().len(), 2);
    assert_eq!(record.scores()[&Provider::Azure], 0.0);
}

#[test]
fn equal_credit_lower_latency_wins_latency_strategy() {
    let credits = parse_credits("azure=10,gcp=10").unwrap();
    let policy = policy_with(Strategy::Latency);

    let record = decide(&healthy_pair(), &credits, &policy, decided_at());

    assert_eq!(record.chosen(), Provider::Azure);
    assert_eq!(record.reason(), ReasonCode::LowestWeightedScore);
}

#[test]
fn single_eligible_provider_short_circuits() {
    let metrics = normalize_metrics(&json!({
        "azure": {"rpo": 500, "rto": 600, "latency_ms": 45},
        "gcp": {"rpo": 240, "rto": 480, "latency_ms": 55}
    }))
    .unwrap();
    let credits = parse_credits("azure=1000,gcp=0").unwrap();
    let policy = policy_from(PolicyConfig {
        max_rpo_seconds: 300.0,
        ..Default::default()
    });

    let record = decide(&metrics, &credits, &policy, decided_at());

    assert_eq!(record.chosen(), Provider::Gcp);
    assert_eq!(record.reason(), ReasonCode::OnlyProviderMeetsSlo);
    assert!(!record.eligible()[&Provider::Azure]);
    assert!(record.scores().is_empty());
}

#[test]
fn absent_metrics_use_configured_fallback() {
    let metrics = normalize_metrics(&json!({})).unwrap();
    let credits = parse_credits("azure=100,gcp=40").unwrap();
    let policy = policy_from(PolicyConfig {
        default_fallback_provider: Some(Provider::Onprem),
        ..Default::default()
    });

    let record = decide(&metrics, &credits, &policy, decided_at());

    assert_eq!(record.chosen(), Provider::Onprem);
    assert_eq!(record.reason(), ReasonCode::NoCandidateMetConstraints);
    assert!(record.is_degraded());
    assert_eq!(record.eligible().len(), 2);
}

#[test]
fn absent_metrics_without_fallback_rank_by_credit() {
    let metrics = normalize_metrics(&json!({"azure": null})).unwrap();
    let credits = parse_credits("azure=10,gcp=40").unwrap();

    let record = decide(&metrics, &credits, &policy_with(Strategy::Balanced), decided_at());

    assert_eq!(record.chosen(), Provider::Gcp);
    assert_eq!(record.reason(), ReasonCode::NoCandidateMetConstraints);
}

#[test]
fn unknown_credit_token_is_rejected() {
    let err = parse_credits("azure=100,gcp=40,foo=5").unwrap_err();
    assert_eq!(err, ValidationError::UnknownProvider("foo".to_string()));
}

#[test]
fn cost_strategy_prefers_credit_over_score() {
    // gcp is worse on every metric but holds more credit
    let credits = parse_credits("azure=10,gcp=40").unwrap();

    let record = decide(&healthy_pair(), &credits, &policy_with(Strategy::Cost), decided_at());
    assert_eq!(record.chosen(), Provider::Gcp);
    assert_eq!(record.reason(), ReasonCode::HigherCredit);

    let record = decide(
        &healthy_pair(),
        &credits,
        &policy_with(Strategy::Balanced),
        decided_at(),
    );
    assert_eq!(record.chosen(), Provider::Azure);
    assert_eq!(record.reason(), ReasonCode::LowestWeightedScore);
}

#[test]
fn credit_floor_makes_provider_ineligible() {
    let credits = parse_credits("azure=10,gcp=40").unwrap();
    let policy = policy_from(PolicyConfig {
        credit_floor: Some(20.0),
        ..Default::default()
    });

    let record = decide(&healthy_pair(), &credits, &policy, decided_at());
    assert_eq!(record.chosen(), Provider::Gcp);
    assert_eq!(record.reason(), ReasonCode::OnlyProviderMeetsSlo);
}

#[test]
fn exact_tie_uses_declaration_order() {
    let metrics = metrics(&[
        (Provider::Azure, 100.0, 100.0, 50.0),
        (Provider::Gcp, 100.0, 100.0, 50.0),
    ]);
    let policy = policy_from(PolicyConfig {
        providers: vec![Provider::Gcp, Provider::Azure],
        ..Default::default()
    });

    let record = decide(&metrics, &credits(&[]), &policy, decided_at());
    assert_eq!(record.chosen(), Provider::Gcp);
    assert_eq!(record.reason(), ReasonCode::DeclarationOrder);
}

#[test]
fn day_parity_tie_break_depends_on_decision_date() {
    let metrics = metrics(&[
        (Provider::Azure, 100.0, 100.0, 50.0),
        (Provider::Gcp, 100.0, 100.0, 50.0),
    ]);
    let policy = policy_from(PolicyConfig {
        tie_break: TieBreak::DayParity,
        ..Default::default()
    });

    let even = decide(&metrics, &credits(&[]), &policy, decided_at_even_day());
    assert_eq!(even.chosen(), Provider::Azure);
    assert_eq!(even.reason(), ReasonCode::DayParity);

    let odd = decide(&metrics, &credits(&[]), &policy, decided_at());
    assert_eq!(odd.chosen(), Provider::Gcp);
    assert_eq!(odd.reason(), ReasonCode::DayParity);
}

#[test]
fn legacy_policy_keys_are_accepted() {
    let config: PolicyConfig = serde_json::from_value(json!({
        "rpo_max_s": 300,
        "rto_max_s": 900,
        "weights": {"rpo_s": 0.4, "rto_s": 0.4, "latency_ms": 0.2},
        "skip_if_credits_below": 5,
        "default_fallback": "onprem"
    }))
    .unwrap();
    let policy = policy_from(config);

    assert_eq!(policy.credit_floor(), Some(5.0));
    assert_eq!(policy.default_fallback_provider(), Some(Provider::Onprem));
    assert_eq!(policy.weights().latency, 0.2);
}

#[test]
fn recorded_decision_replays_identically() {
    let credits = parse_credits("azure=100,gcp=40").unwrap();
    let record = decide(
        &healthy_pair(),
        &credits,
        &policy_with(Strategy::Balanced),
        decided_at(),
    );

    let json = serde_json::to_string_pretty(&record).unwrap();
    let parsed = serde_json::from_str(&json).unwrap();
    let replayed = replay(&parsed).unwrap();

    assert_eq!(replayed, record);
    assert_eq!(serde_json::to_string_pretty(&replayed).unwrap(), json);
}

#[test]
fn overflowing_weights_are_rejected_before_ranking() {
    let config = PolicyConfig {
        strategy: Strategy::Latency,
        weights: Some(WeightsConfig {
            rpo: 1e308,
            rto: 1e308,
            latency: 1e308,
        }),
        ..Default::default()
    };

    assert!(config.validate().is_err());
}

#[test]
fn huge_weights_still_pick_a_provider() {
    let metrics = metrics(&[
        (Provider::Azure, 100.0, 100.0, 45.0),
        (Provider::Gcp, 100.0, 200.0, 55.0),
    ]);
    let credits = parse_credits("azure=10,gcp=10").unwrap();
    let policy = policy_from(PolicyConfig {
        strategy: Strategy::Latency,
        weights: Some(WeightsConfig {
            rpo: 1e300,
            rto: 1e300,
            latency: 1e300,
        }),
        ..Default::default()
    });

    let record = decide(&metrics, &credits, &policy, decided_at());
    assert_eq!(record.chosen(), Provider::Azure);
    assert!(record.scores().values().all(|s| (0.0..=1.0).contains(s)));
}

#[test]
fn large_weight_record_survives_json_round_trip() {
    let metrics = metrics(&[
        (Provider::Azure, 100.0, 100.0, 45.0),
        (Provider::Gcp, 200.0, 100.0, 55.0),
    ]);
    let credits = parse_credits("azure=10,gcp=10").unwrap();
    let policy = policy_from(PolicyConfig {
        weights: Some(WeightsConfig {
            rpo: 1e303,
            rto: 0.0,
            latency: 0.0,
        }),
        ..Default::default()
    });

    let record = decide(&metrics, &credits, &policy, decided_at());
    assert_eq!(record.scores()[&Provider::Azure], 0.0);
    assert_eq!(record.scores()[&Provider::Gcp], 1.0);

    let json = serde_json::to_string(&record).unwrap();
    assert!(!json.contains("null"));
    let parsed = serde_json::from_str(&json).unwrap();
    assert_eq!(replay(&parsed).unwrap(), record);
}
