//! Error types for enhancement and persistence

use thiserror::Error;

/// The only message ever shown to users for a failed enhancement
pub const GENERIC_FAILURE_MESSAGE: &str = "Failed to enhance prompt. Please try again.";

/// Why an enhancement failed. Used for logs and diagnostics only.
#[derive(Debug, Error)]
pub enum FailureKind {
    #[error("no API key configured")]
    MissingCredential,

    #[error("failed to build request: {0}")]
    RequestBuild(String),

    #[error("request to generation service failed: {0}")]
    Network(String),

    #[error("API key invalid, expired or denied (HTTP {0})")]
    Unauthorized(u16),

    #[error("generation service returned HTTP {status}: {body}")]
    Service { status: u16, body: String },

    #[error("generation service returned an empty response")]
    EmptyResponse,

    #[error("response did not match the result schema: {0}")]
    Schema(String),
}

/// Enhancement failure.
///
/// Always displays as [`GENERIC_FAILURE_MESSAGE`]; the tagged cause is
/// available through [`EnhanceError::kind`] and the error source chain.
#[derive(Debug, Error)]
#[error("{}", GENERIC_FAILURE_MESSAGE)]
pub struct EnhanceError {
    #[source]
    kind: FailureKind,
}

impl EnhanceError {
    pub fn kind(&self) -> &FailureKind {
        &self.kind
    }
}

impl From<FailureKind> for EnhanceError {
    fn from(kind: FailureKind) -> Self {
        Self { kind }
    }
}

/// Snapshot store failures
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
