//! # LMS Quiz Generator
//!
//! Generates quizzes, quiz topic suggestions and teaching-assistant replies
//! for a learning management system, using an OpenAI-compatible
//! chat-completions service when one is configured and local template
//! generation when it is not.
//!
//! ## Architecture
//!
//! - **Domain Layer** ([`domain`]) - Entities, template question bank and the
//!   fallback generator
//! - **Application Layer** ([`application`]) - Response normalization and the
//!   services that decide between service output and fallback
//! - **Infrastructure Layer** ([`infrastructure`]) - Generative service adapter
//!
//! ## Guarantees
//!
//! A quiz request with valid parameters always produces a complete quiz.
//! Missing credentials, network failures, timeouts and unusable responses all
//! degrade to the template generator; only invalid parameters are reported
//! as errors.
//!
//! ## Quick Start
//!
//! ```bash
//! export OPENAI_API_KEY="sk-..."  # Optional
//!
//! cargo run -- generate --topic Fractions --subject Math --difficulty hard
//! ```
//!
//! ## Configuration
//!
//! Configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;

pub use error::{QuizError, QuizResult};

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::{
        AssistantReply, AssistantService, ChatSession, QuizService, SuggestionService, Suggestions,
    };
    pub use crate::domain::entities::{
        Answer, Difficulty, Provenance, Question, QuestionType, Quiz, QuizParameters, Subject,
    };
    pub use crate::domain::random::{RandomSource, StdRandom};
    pub use crate::error::{QuizError, QuizResult, Unavailable};
    pub use crate::infrastructure::generative::{
        GeneratorConfig, NullGenerator, OpenAiGenerator, TextGenerator,
    };
}
