//! Services exposed to the front end.

pub mod assistant_service;
pub mod quiz_service;
pub mod suggestion_service;

pub use assistant_service::{AssistantReply, AssistantService, ChatSession};
pub use quiz_service::QuizService;
pub use suggestion_service::{SuggestionService, Suggestions};
