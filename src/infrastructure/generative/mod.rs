//! Generative text service adapter.
//!
//! Provides a [`TextGenerator`] trait with two implementations:
//! - [`OpenAiGenerator`] - OpenAI-compatible chat-completions client
//! - [`NullGenerator`] - Always unavailable, for offline runs and tests
//!
//! Prompt construction for quizzes, suggestions and the teaching assistant
//! lives in [`prompt`].

mod null_generator;
mod openai;
pub mod prompt;
mod service;

pub use null_generator::NullGenerator;
pub use openai::{
    DEFAULT_BASE_URL, DEFAULT_MODEL, DEFAULT_TEMPERATURE, DEFAULT_TIMEOUT, GeneratorConfig,
    MAX_RESPONSE_BYTES, OpenAiGenerator, PLACEHOLDER_API_KEY,
};
#[cfg(test)]
pub use service::MockTextGenerator;
pub use service::{CompletionRequest, GenerationResult, TextGenerator};
