//! Domain layer: quiz entities and the local, I/O-free generation logic.
//!
//! # Architecture
//!
//! - [`entities`] - Parameters, questions, quizzes and chat messages
//! - [`templates`] - Static question stems per subject and type
//! - [`fallback`] - Template-based quiz generator
//! - [`random`] - Injectable random source used by the generator
//!
//! # Design Principles
//!
//! - Domain layer has no dependencies on infrastructure or presentation layers
//! - Nothing here performs I/O; the generative service lives in
//!   [`crate::infrastructure::generative`]
//! - Coordination between the two lives in [`crate::application::services`]

pub mod entities;
pub mod fallback;
pub mod random;
pub mod templates;
