//! Replay command implementation

use crate::cli::ReplayArgs;
use crate::engine::{self, DecisionRecord, ReasonCode};
use crate::provider::Provider;
use anyhow::Context;
use thiserror::Error;

/// The replayed decision differs from the recorded one
#[derive(Debug, Error)]
#[error(
    "Replay mismatch: recorded {recorded_chosen} ({recorded_reason}), replayed {replayed_chosen} ({replayed_reason})"
)]
pub struct ReplayMismatch {
    pub recorded_chosen: Provider,
    pub recorded_reason: ReasonCode,
    pub replayed_chosen: Provider,
    pub replayed_reason: ReasonCode,
}

/// Re-run a decision record and compare the outcome
pub fn replay_record(record: &DecisionRecord) -> anyhow::Result<DecisionRecord> {
    let replayed = engine::replay(record).context("Decision record has an invalid timestamp")?;

    if replayed != *record {
        return Err(ReplayMismatch {
            recorded_chosen: record.chosen(),
            recorded_reason: record.reason(),
            replayed_chosen: replayed.chosen(),
            replayed_reason: replayed.reason(),
        }
        .into());
    }

    Ok(replayed)
}

/// Handle `hybridops replay` command
pub fn handle_replay(args: &ReplayArgs) -> anyhow::Result<String> {
    let content = std::fs::read_to_string(&args.record)
        .with_context(|| format!("Failed to read {}", args.record.display()))?;
    let record: DecisionRecord = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse decision record {}", args.record.display()))?;

    let replayed = replay_record(&record)?;
    tracing::info!(
        chosen = %replayed.chosen(),
        reason = %replayed.reason(),
        "Replay reproduced recorded decision"
    );

    if args.json {
        Ok(serde_json::to_string_pretty(&replayed)?)
    } else {
        Ok(format!(
            "✓ Replay matches: chosen={} reason={} at {}",
            replayed.chosen(),
            replayed.reason(),
            replayed.timestamp_utc()
        ))
    }
}
