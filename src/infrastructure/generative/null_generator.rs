//! Generator that is never available.

use super::service::{CompletionRequest, GenerationResult, TextGenerator};
use crate::error::Unavailable;
use async_trait::async_trait;
use tracing::debug;

/// A generator that reports itself unavailable for every request.
///
/// Used for offline runs and tests, where every quiz must come from the
/// template fallback.
pub struct NullGenerator;

impl NullGenerator {
    pub fn new() -> Self {
        debug!("Using NullGenerator (generative service disabled)");
        Self
    }
}

impl Default for NullGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TextGenerator for NullGenerator {
    async fn complete(&self, _request: CompletionRequest) -> GenerationResult<String> {
        Err(Unavailable::NotConfigured)
    }

    fn is_configured(&self) -> bool {
        false
    }
}
