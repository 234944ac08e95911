//! Error types for input normalization

use crate::provider::Provider;
use std::path::PathBuf;
use thiserror::Error;

/// Malformed input. Aborts before any decision is produced.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Unknown provider '{0}' (expected one of: azure, gcp, onprem)")]
    UnknownProvider(String),

    #[error("Invalid credits format: '{0}'. Use 'azure=NN,gcp=NN'")]
    CreditsSyntax(String),

    #[error("Invalid credit value for '{provider}': '{value}' (expected a non-negative number)")]
    CreditValue { provider: Provider, value: String },

    #[error("Duplicate credit entry for '{0}'")]
    DuplicateCredit(Provider),

    #[error("Invalid metric '{field}' for '{provider}': {message}")]
    MetricValue {
        provider: Provider,
        field: String,
        message: String,
    },

    #[error("Malformed metrics document: {0}")]
    MetricsShape(String),
}

/// Failure while resolving inputs from collaborators (files, env)
#[derive(Debug, Error)]
pub enum InputError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl InputError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        InputError::Io {
            path: path.into(),
            source,
        }
    }
}
