//! Core domain entities of quiz generation.
//!
//! Entities are plain data structures. The only logic they carry is
//! derivation of values that must never be taken from outside input, such
//! as a quiz's total points and estimated time.
//!
//! # Entity Types
//!
//! - [`QuizParameters`] - Validated input of a generation request
//! - [`Question`] / [`Answer`] - A question and its type-dependent answer key
//! - [`Quiz`] - The generated quiz, tagged with its [`Provenance`]
//! - [`ChatMessage`] - A conversation turn sent to the generative service

pub mod chat;
pub mod parameters;
pub mod question;
pub mod quiz;

pub use chat::{ChatMessage, ChatRole};
pub use parameters::{Difficulty, QuestionType, QuizParameters, Subject};
pub use question::{Answer, OPTION_COUNT, Question};
pub use quiz::{Provenance, Quiz};
