//! Target-selection decision engine
//!
//! A single synchronous pass over immutable inputs:
//!
//! ```text
//! normalize → filter → (single-eligible shortcut | score → tie-break)
//!                    | degraded resolve
//!           → record
//! ```
//!
//! The engine reads no clock, files or environment. Every input, including
//! the decision timestamp, is a parameter, so identical inputs always yield
//! an identical [`DecisionRecord`]. It holds no state and is safe to call
//! concurrently.
//!
//! # Example
//!
//! ```rust
//! use chrono::{TimeZone, Utc};
//! use hybridops::config::Policy;
//! use hybridops::engine::{decide, ReasonCode};
//! use hybridops::inputs::{parse_credits, MetricSet, MetricsTable};
//! use hybridops::provider::Provider;
//!
//! let metrics = MetricsTable::new()
//!     .with(Provider::Azure, MetricSet::new(500.0, 600.0, 45.0))
//!     .with(Provider::Gcp, MetricSet::new(240.0, 480.0, 55.0));
//! let credits = parse_credits("azure=100,gcp=40").unwrap();
//! let at = Utc.with_ymd_and_hms(2026, 10, 16, 9, 0, 0).unwrap();
//!
//! let record = decide(&metrics, &credits, &Policy::default(), at);
//! assert_eq!(record.chosen(), Provider::Gcp);
//! assert_eq!(record.reason(), ReasonCode::OnlyProviderMeetsSlo);
//! ```

pub mod degraded;
pub mod eligibility;
pub mod record;
pub mod scoring;
pub mod selection;
pub mod strategies;

pub use eligibility::{is_eligible, Candidate};
pub use record::{DecisionRecord, InputSnapshot, ReasonCode};
pub use scoring::{normalize, score_candidates, ScoringWeights};
pub use selection::Selection;
pub use strategies::{Strategy, TieBreak};

use crate::config::Policy;
use crate::inputs::{CreditBalance, MetricsTable};
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

/// Decide which provider to route to.
///
/// Total for any validated policy: always returns exactly one chosen
/// provider. A record whose reason is
/// [`ReasonCode::NoCandidateMetConstraints`] is a valid decision, not an
/// error.
pub fn decide(
    metrics: &MetricsTable,
    credits: &CreditBalance,
    policy: &Policy,
    decided_at: DateTime<Utc>,
) -> DecisionRecord {
    let candidates = eligibility::build_candidates(metrics, credits, policy);
    let eligible_map = eligibility::eligibility_map(&candidates);
    let eligible: Vec<&Candidate> = candidates.iter().filter(|c| c.eligible).collect();

    let (chosen, reason, scores) = match eligible.as_slice() {
        [] => {
            let chosen = degraded::resolve(&candidates, policy, decided_at);
            (chosen, ReasonCode::NoCandidateMetConstraints, BTreeMap::new())
        }
        [only] => (only.provider, ReasonCode::OnlyProviderMeetsSlo, BTreeMap::new()),
        _ => {
            let weights = policy.weights().for_strategy(policy.strategy());
            let scores = score_candidates(&eligible, &weights);
            let selection = selection::select(
                &eligible,
                &scores,
                policy.strategy(),
                policy.tie_break(),
                decided_at,
            );
            (selection.provider, selection.reason, scores)
        }
    };

    tracing::info!(
        chosen = %chosen,
        reason = %reason,
        strategy = %policy.strategy(),
        eligible = eligible.len(),
        roster = candidates.len(),
        "Target selected"
    );

    DecisionRecord::new(
        decided_at,
        chosen,
        reason,
        eligible_map,
        scores,
        InputSnapshot::capture(metrics, credits, policy),
    )
}

/// Re-run a recorded decision on its own snapshot and timestamp.
///
/// Returns the fresh record; callers compare it against the original to
/// verify the decision is reproducible.
pub fn replay(record: &DecisionRecord) -> Result<DecisionRecord, chrono::ParseError> {
    let decided_at = record.decided_at()?;
    let inputs = record.inputs();
    Ok(decide(
        &inputs.metrics_table(),
        &inputs.credit_balance(),
        &inputs.policy,
        decided_at,
    ))
}
