use serde::{Deserialize, Serialize};

/// One route alternative, in the order supplied by the provider.
///
/// Structured on purpose: the sink renders `label` and `duration_text`
/// directly instead of re-parsing a formatted "Via X: Y" string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteOption {
    /// Route summary, e.g. a highway name
    pub label: String,
    /// Human-readable driving duration, e.g. "27 mins"
    pub duration_text: String,
}

/// Directions provider errors
#[derive(Debug, thiserror::Error)]
pub enum CommuteError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("Provider error: {status}")]
    Provider { status: String },
    #[error("Malformed response: {0}")]
    Malformed(String),
}
