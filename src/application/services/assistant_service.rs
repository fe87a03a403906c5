//! Teaching assistant chat.

use std::sync::Arc;

use crate::domain::entities::ChatMessage;
use crate::domain::random::RandomSource;
use crate::error::{QuizError, QuizResult};
use crate::infrastructure::generative::{TextGenerator, prompt};
use serde::Serialize;
use serde_json::json;
use tracing::{debug, warn};
use uuid::Uuid;

/// Number of prior messages kept per session.
pub const HISTORY_LIMIT: usize = 20;

const CANNED_REPLIES: [&str; 4] = [
    "I'm here to help you with your teaching needs! I can assist with lesson planning, classroom management, assessment strategies, and much more. What specific area would you like help with today?",
    "That's a great question! As your AI teaching assistant, I'd recommend breaking this down into smaller, manageable steps. Would you like me to help you create a detailed plan?",
    "I understand you're looking for teaching support. Here are some general strategies that might help: 1) Start with clear learning objectives, 2) Use varied instructional methods, 3) Provide regular feedback. What specific challenge are you facing?",
    "Excellent! I can help you with that. Teaching is both an art and a science. Let me suggest some evidence-based approaches that have proven effective in similar situations.",
];

const QUICK_SUGGESTIONS: [&str; 8] = [
    "Help me create a lesson plan for...",
    "What are some classroom management strategies?",
    "How can I engage struggling students?",
    "Create a rubric for assessing...",
    "Suggest activities for teaching...",
    "How to differentiate instruction?",
    "Ideas for parent communication",
    "Technology tools for my classroom",
];

const DASHBOARD_SUGGESTIONS: [&str; 3] = [
    "How can I improve student engagement?",
    "What are effective assessment strategies?",
    "Help me plan next week's lessons",
];

const COURSES_SUGGESTIONS: [&str; 3] = [
    "How to structure a new course?",
    "Create engaging course content",
    "Design course assessments",
];

const STUDENTS_SUGGESTIONS: [&str; 3] = [
    "How to support struggling students?",
    "Strategies for gifted students",
    "Improve classroom behavior",
];

const ASSIGNMENTS_SUGGESTIONS: [&str; 3] = [
    "Create meaningful assignments",
    "Design effective rubrics",
    "Provide better feedback",
];

/// Generic conversation starters.
pub fn quick_suggestions() -> &'static [&'static str] {
    &QUICK_SUGGESTIONS
}

/// Starters for the named LMS view. Unknown views get the dashboard set.
pub fn contextual_suggestions(view: &str) -> &'static [&'static str] {
    match view.trim().to_ascii_lowercase().as_str() {
        "courses" => &COURSES_SUGGESTIONS,
        "students" => &STUDENTS_SUGGESTIONS,
        "assignments" => &ASSIGNMENTS_SUGGESTIONS,
        _ => &DASHBOARD_SUGGESTIONS,
    }
}

/// One assistant conversation. Keeps the most recent [`HISTORY_LIMIT`]
/// messages.
#[derive(Debug, Clone)]
pub struct ChatSession {
    id: Uuid,
    messages: Vec<ChatMessage>,
}

impl ChatSession {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            messages: Vec::new(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn history(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn clear(&mut self) {
        self.messages.clear();
    }

    fn record(&mut self, user: &str, assistant: &str) {
        self.messages.push(ChatMessage::user(user));
        self.messages.push(ChatMessage::assistant(assistant));

        if self.messages.len() > HISTORY_LIMIT {
            let excess = self.messages.len() - HISTORY_LIMIT;
            self.messages.drain(..excess);
        }
    }
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssistantReply {
    pub message: String,
    pub from_service: bool,
}

/// Answers teacher questions, degrading to a canned reply when the
/// generative service cannot.
pub struct AssistantService<G: TextGenerator + ?Sized, R: RandomSource + ?Sized> {
    generator: Arc<G>,
    random: Arc<R>,
}

impl<G: TextGenerator + ?Sized, R: RandomSource + ?Sized> AssistantService<G, R> {
    pub fn new(generator: Arc<G>, random: Arc<R>) -> Self {
        Self { generator, random }
    }

    /// Sends a message in the given session and records both turns.
    ///
    /// # Errors
    ///
    /// Returns [`QuizError::InvalidParameters`] if the message is blank.
    pub async fn send_message(
        &self,
        session: &mut ChatSession,
        message: &str,
    ) -> QuizResult<AssistantReply> {
        let message = message.trim();
        if message.is_empty() {
            return Err(QuizError::invalid_parameters(
                "Message must not be empty",
                json!({ "message": "blank" }),
            ));
        }

        let request = prompt::chat_request(session.history(), message);
        let reply = match self.generator.complete(request).await {
            Ok(text) => AssistantReply {
                message: text.trim().to_string(),
                from_service: true,
            },
            Err(reason) => {
                warn!(session = %session.id(), "Assistant unavailable: {}", reason);
                AssistantReply {
                    message: self.canned_reply().to_string(),
                    from_service: false,
                }
            }
        };

        session.record(message, &reply.message);
        debug!(
            session = %session.id(),
            history = session.len(),
            from_service = reply.from_service,
            "Assistant replied"
        );
        Ok(reply)
    }

    fn canned_reply(&self) -> &'static str {
        CANNED_REPLIES[self.random.next_index(CANNED_REPLIES.len())]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::ChatRole;
    use crate::domain::random::{MockRandomSource, StdRandom};
    use crate::error::Unavailable;
    use crate::infrastructure::generative::{MockTextGenerator, NullGenerator};

    #[tokio::test]
    async fn test_blank_message_is_rejected() {
        let mut generator = MockTextGenerator::new();
        generator.expect_complete().times(0);
        let service = AssistantService::new(Arc::new(generator), Arc::new(StdRandom::seeded(3)));

        let mut session = ChatSession::new();
        let result = service.send_message(&mut session, "   ").await;

        assert!(matches!(result, Err(QuizError::InvalidParameters { .. })));
        assert!(session.is_empty());
    }

    #[tokio::test]
    async fn test_unavailable_service_gives_canned_reply() {
        let mut random = MockRandomSource::new();
        random.expect_next_index().returning(|_| 2);
        let service = AssistantService::new(Arc::new(NullGenerator::new()), Arc::new(random));

        let mut session = ChatSession::new();
        let reply = service
            .send_message(&mut session, "How do I grade essays?")
            .await
            .unwrap();

        assert!(!reply.from_service);
        assert_eq!(reply.message, CANNED_REPLIES[2]);
        assert_eq!(session.len(), 2);
    }

    #[tokio::test]
    async fn test_history_is_sent_and_recorded() {
        let mut generator = MockTextGenerator::new();
        generator
            .expect_complete()
            .withf(|request| {
                request.max_tokens == prompt::CHAT_RESPONSE_BUDGET
                    && request.messages[0].content == prompt::TEACHER_SYSTEM_PROMPT
            })
            .times(2)
            .returning(|request| Ok(format!(" reply to {} messages ", request.messages.len())));
        let service = AssistantService::new(Arc::new(generator), Arc::new(StdRandom::seeded(3)));

        let mut session = ChatSession::new();
        let first = service.send_message(&mut session, "hello").await.unwrap();
        let second = service.send_message(&mut session, "again").await.unwrap();

        assert!(first.from_service);
        assert_eq!(first.message, "reply to 2 messages");
        assert_eq!(second.message, "reply to 4 messages");
        assert_eq!(session.history()[2].role, ChatRole::User);
        assert_eq!(session.history()[2].content, "again");
    }

    #[tokio::test]
    async fn test_history_is_capped() {
        let mut generator = MockTextGenerator::new();
        generator
            .expect_complete()
            .returning(|_| Err(Unavailable::Status(429)));
        let service = AssistantService::new(Arc::new(generator), Arc::new(StdRandom::seeded(3)));

        let mut session = ChatSession::new();
        for i in 0..15 {
            service
                .send_message(&mut session, &format!("question {i}"))
                .await
                .unwrap();
        }

        assert_eq!(session.len(), HISTORY_LIMIT);
        assert_eq!(session.history()[0].role, ChatRole::User);
        assert_eq!(session.history()[0].content, "question 5");
    }

    #[test]
    fn test_suggestions() {
        assert_eq!(quick_suggestions().len(), 8);
        assert_eq!(contextual_suggestions("students")[1], "Strategies for gifted students");
        assert_eq!(contextual_suggestions("Courses").len(), 3);
        assert_eq!(contextual_suggestions("gradebook"), contextual_suggestions("dashboard"));
    }
}
