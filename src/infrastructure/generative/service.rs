//! Text generator trait and request type.

use crate::domain::entities::ChatMessage;
use crate::error::Unavailable;
use async_trait::async_trait;

/// Result type for generator calls. The error side only ever means
/// "unavailable for this request".
pub type GenerationResult<T> = Result<T, Unavailable>;

/// One completion call: the conversation to send and the response budget.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub messages: Vec<ChatMessage>,
    /// Upper bound on generated tokens.
    pub max_tokens: u32,
}

impl CompletionRequest {
    pub fn new(messages: Vec<ChatMessage>, max_tokens: u32) -> Self {
        Self {
            messages,
            max_tokens,
        }
    }

    /// Text of the last user message, if any.
    pub fn user_prompt(&self) -> Option<&str> {
        self.messages
            .iter()
            .rev()
            .find(|m| m.role == crate::domain::entities::ChatRole::User)
            .map(|m| m.content.as_str())
    }
}

/// Trait for the external text-generation service.
///
/// Implementations never surface transport details to callers: a missing
/// credential, a timeout, a non-2xx status or an unreadable payload all map
/// to an [`Unavailable`] reason. The raw text is returned unvalidated;
/// interpreting it is the caller's job.
///
/// # Implementations
///
/// - [`crate::infrastructure::generative::OpenAiGenerator`] - chat-completions HTTP client
/// - [`crate::infrastructure::generative::NullGenerator`] - always unavailable
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Sends one completion request and returns the raw response text.
    ///
    /// # Errors
    ///
    /// Returns an [`Unavailable`] reason when no text could be obtained.
    async fn complete(&self, request: CompletionRequest) -> GenerationResult<String>;

    /// Returns whether a credential and endpoint are configured.
    ///
    /// Used for status reporting only; callers still handle
    /// [`Unavailable::NotConfigured`] from [`TextGenerator::complete`].
    fn is_configured(&self) -> bool;
}
