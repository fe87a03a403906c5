//! Infrastructure layer for external integrations.
//!
//! This layer holds everything that talks to the outside world.
//!
//! # Modules
//!
//! - [`generative`] - Text generation service (OpenAI-compatible and no-op implementations)

pub mod generative;
