//! Error taxonomy for quiz generation.
//!
//! Only [`QuizError::InvalidParameters`] is ever returned to callers of the
//! public services. The other variants are produced internally by the
//! generative adapter and the response normalizer and are absorbed by the
//! services, which degrade to the local fallback generator.

use serde_json::Value;
use std::time::Duration;

/// Reasons the generative service could not produce text.
///
/// Every variant means the same thing to the orchestrator: the adapter is
/// unavailable for this request.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Unavailable {
    #[error("generative service is not configured")]
    NotConfigured,

    #[error("transport failure: {0}")]
    Transport(String),

    #[error("generative service responded with status {0}")]
    Status(u16),

    #[error("generative service did not answer within {0:?}")]
    Timeout(Duration),

    #[error("unexpected completion payload: {0}")]
    InvalidPayload(String),

    #[error("completion carried no text")]
    EmptyCompletion,

    #[error("completion exceeded {0} bytes")]
    ResponseTooLarge(usize),
}

/// Errors raised while producing a quiz, suggestions or an assistant reply.
#[derive(Debug, thiserror::Error)]
pub enum QuizError {
    #[error("{message}")]
    InvalidParameters { message: String, details: Value },

    #[error("generative service unavailable: {0}")]
    AdapterUnavailable(#[from] Unavailable),

    #[error("malformed generative response: {0}")]
    MalformedResponse(String),
}

impl QuizError {
    pub fn invalid_parameters(message: impl Into<String>, details: Value) -> Self {
        Self::InvalidParameters {
            message: message.into(),
            details,
        }
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedResponse(message.into())
    }

    /// Returns true for errors that cross the service boundary.
    ///
    /// Adapter and normalizer failures are handled by falling back to
    /// template generation, so only parameter errors are caller-visible.
    pub fn is_caller_visible(&self) -> bool {
        matches!(self, Self::InvalidParameters { .. })
    }

    /// Short machine-readable code, used by the CLI's JSON error output.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidParameters { .. } => "invalid_parameters",
            Self::AdapterUnavailable(_) => "adapter_unavailable",
            Self::MalformedResponse(_) => "malformed_response",
        }
    }
}

impl From<validator::ValidationErrors> for QuizError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let details = serde_json::to_value(&errors).unwrap_or(Value::Null);
        Self::invalid_parameters("Invalid quiz parameters", details)
    }
}

/// Result type used across the crate.
pub type QuizResult<T> = Result<T, QuizError>;
