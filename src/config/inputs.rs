//! Default input locations

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Where `choose` reads its inputs when no CLI flag overrides them.
///
/// At most one credit source is used; inline credits win over the env file,
/// which wins over the Prometheus export.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputsConfig {
    /// Metrics JSON document
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metrics: Option<PathBuf>,
    /// Inline credits, e.g. "azure=100,gcp=40"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credits: Option<String>,
    /// Env file with AZURE_CREDITS=/GCP_CREDITS= lines
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credits_file: Option<PathBuf>,
    /// Prometheus text export with <provider>_available_credit samples
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credits_prom: Option<PathBuf>,
}
