//! Application layer: turns raw generative output into quizzes and decides
//! when to fall back to local generation.
//!
//! - [`normalizer`] - Validates and repairs service responses
//! - [`services::QuizService`] - Quiz generation with fallback
//! - [`services::SuggestionService`] - Topic suggestions with a curated fallback
//! - [`services::AssistantService`] - Teaching assistant chat with canned fallback

pub mod normalizer;
pub mod services;
