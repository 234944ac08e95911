//! hybridops - DR/burst target selection
//!
//! Decides which cloud provider (or the on-prem fallback) should receive a
//! disaster-recovery or burst workload. Inputs are per-provider recovery
//! metrics, available spend credits and a threshold policy; the output is an
//! auditable [`engine::DecisionRecord`] that can be replayed later.

pub mod cli;
pub mod config;
pub mod engine;
pub mod inputs;
pub mod logging;
pub mod provider;
