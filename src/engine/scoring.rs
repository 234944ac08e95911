//! Weighted min-max scoring of eligible candidates

use crate::engine::eligibility::Candidate;
use crate::engine::strategies::Strategy;
use crate::provider::Provider;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Share of the declared weight total the latency profile puts on latency
const LATENCY_EMPHASIS: f64 = 0.8;

/// Scores are rounded to this many decimal places so that ties are exact
const SCORE_SCALE: f64 = 1e6;

/// Weights for the metric dimensions of a candidate
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringWeights {
    /// Weight for recovery point objective
    pub rpo: f64,

    /// Weight for recovery time objective
    pub rto: f64,

    /// Weight for network latency
    pub latency: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            rpo: 0.35,
            rto: 0.35,
            latency: 0.30,
        }
    }
}

impl ScoringWeights {
    /// Validate that every weight, and their sum, is a non-negative finite
    /// number
    pub fn validate(&self) -> Result<(), String> {
        for (name, value) in [("rpo", self.rpo), ("rto", self.rto), ("latency", self.latency)] {
            if !value.is_finite() || value < 0.0 {
                return Err(format!(
                    "Weight '{}' must be a non-negative finite number, got {}",
                    name, value
                ));
            }
        }
        if !self.total().is_finite() {
            return Err(format!(
                "Weights must sum to a finite number, got {}",
                self.total()
            ));
        }
        Ok(())
    }

    /// Weights rescaled to sum to 1, so every score lies in `[0, 1]`.
    /// All-zero weights stay zero.
    pub fn unit(&self) -> ScoringWeights {
        let total = self.total();
        if total == 0.0 || !total.is_finite() {
            return ScoringWeights {
                rpo: 0.0,
                rto: 0.0,
                latency: 0.0,
            };
        }
        ScoringWeights {
            rpo: self.rpo / total,
            rto: self.rto / total,
            latency: self.latency / total,
        }
    }

    pub fn total(&self) -> f64 {
        self.rpo + self.rto + self.latency
    }

    /// All-zero weights reduce ranking to the tie-break chain alone
    pub fn is_zero(&self) -> bool {
        self.total() == 0.0
    }

    /// Weight profile the given strategy ranks with.
    ///
    /// `balanced` and `cost` use the declared weights. `latency` keeps the
    /// declared total but moves 80% of it onto latency, splitting the rest
    /// evenly between RPO and RTO; all-zero declared weights count as a
    /// total of 1.
    pub fn for_strategy(&self, strategy: Strategy) -> ScoringWeights {
        match strategy {
            Strategy::Balanced | Strategy::Cost => *self,
            Strategy::Latency => {
                let total = if self.is_zero() { 1.0 } else { self.total() };
                let rest = total * (1.0 - LATENCY_EMPHASIS) / 2.0;
                ScoringWeights {
                    rpo: rest,
                    rto: rest,
                    latency: total * LATENCY_EMPHASIS,
                }
            }
        }
    }
}

/// Min-max normalize values into `[0, 1]`.
///
/// When every value is equal the dimension carries no signal and all
/// entries normalize to 0.
pub fn normalize(values: &[f64]) -> Vec<f64> {
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    if values.is_empty() || max == min {
        return vec![0.0; values.len()];
    }

    values.iter().map(|v| (v - min) / (max - min)).collect()
}

/// Score candidates against each other. Lower is better.
///
/// Each dimension is min-max normalized across `candidates`, then combined
/// as `Σ weight × normalized` with the weights rescaled to sum to 1.
/// Results lie in `[0, 1]` and are rounded to six decimals.
pub fn score_candidates(
    candidates: &[&Candidate],
    weights: &ScoringWeights,
) -> BTreeMap<Provider, f64> {
    let weights = weights.unit();
    let dimension = |weight: f64, value: fn(&Candidate) -> f64| -> Vec<f64> {
        if weight == 0.0 {
            return vec![0.0; candidates.len()];
        }
        let raw: Vec<f64> = candidates.iter().map(|c| value(c)).collect();
        normalize(&raw)
    };

    let rpo = dimension(weights.rpo, |c| c.metrics.rpo_seconds);
    let rto = dimension(weights.rto, |c| c.metrics.rto_seconds);
    let latency = dimension(weights.latency, |c| c.metrics.latency_ms);

    candidates
        .iter()
        .enumerate()
        .map(|(i, candidate)| {
            let score =
                weights.rpo * rpo[i] + weights.rto * rto[i] + weights.latency * latency[i];
            let score = (score * SCORE_SCALE).round() / SCORE_SCALE;
            tracing::debug!(
                provider = %candidate.provider,
                score,
                rpo = rpo[i],
                rto = rto[i],
                latency = latency[i],
                "Scored candidate"
            );
            (candidate.provider, score)
        })
        .collect()
}
