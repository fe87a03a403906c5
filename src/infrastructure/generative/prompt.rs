//! Prompts sent to the generative service.

use super::service::CompletionRequest;
use crate::domain::entities::{ChatMessage, QuizParameters, Subject};

/// Response budget for a full quiz.
pub const QUIZ_RESPONSE_BUDGET: u32 = 2000;
/// Response budget for a list of topic suggestions.
pub const SUGGESTION_RESPONSE_BUDGET: u32 = 200;
/// Response budget for one assistant reply.
pub const CHAT_RESPONSE_BUDGET: u32 = 500;

pub const QUIZ_SYSTEM_PROMPT: &str = "You are an expert educational content creator. \
Generate high-quality quiz questions and answers in JSON format. \
Always provide accurate, educational content appropriate for the specified grade level.";

pub const SUGGESTION_SYSTEM_PROMPT: &str = "You are an expert educational content creator. \
Generate specific, focused topic suggestions for creating educational quizzes.";

pub const TEACHER_SYSTEM_PROMPT: &str = "You are an AI teaching assistant designed to help educators with various classroom and educational tasks. You can assist with:

1. Lesson planning and curriculum development
2. Creating engaging activities and assignments
3. Classroom management strategies
4. Student assessment and feedback
5. Educational technology recommendations
6. Differentiated instruction techniques
7. Parent communication strategies
8. Professional development guidance
9. Subject-specific teaching methods
10. Educational policy and standards

Always provide practical, actionable advice tailored to the teacher's specific needs. Be encouraging, professional, and focus on student-centered learning approaches.";

const SCHEMA_SAMPLE: &str = r#"{
  "title": "Quiz title",
  "description": "Brief description",
  "questions": [
    {
      "id": "q1",
      "type": "multiple-choice",
      "question": "Question text",
      "points": 10,
      "options": ["Option A", "Option B", "Option C", "Option D"],
      "correctAnswer": 0,
      "explanation": "Why this answer is correct"
    }
  ]
}"#;

/// User prompt asking for a quiz in the canonical JSON schema.
pub fn quiz_prompt(params: &QuizParameters) -> String {
    let grade = match params.grade() {
        Some(grade) => format!("for {grade} grade students"),
        None => "for students".to_string(),
    };
    let types = params
        .types()
        .iter()
        .map(|t| t.as_str())
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        r#"Create a {level} quiz about "{topic}" in {subject} {grade}.

Requirements:
- Generate exactly {count} questions
- Question types: {types}
- Each question should be educational and test understanding of the topic
- Provide clear, accurate answers
- Include explanations for learning purposes

Format the response as a JSON object with this structure:
{schema}

Every question must include the fields id, type, question, points, correctAnswer and explanation.

For multiple-choice questions, use:
- "type": "multiple-choice"
- "options": exactly 4 strings
- "correctAnswer": the index (0-3) of the correct option

For true/false questions, use:
- "type": "true-false"
- "correctAnswer": true or false
- "options": not needed

For short-answer questions, use:
- "type": "short-answer"
- "correctAnswer": "Sample correct answer"
- "options": not needed

For fill-in-blank questions, use:
- "type": "fill-in-blank"
- "correctAnswer": "Correct answer"
- "options": not needed

Make sure the JSON is valid and properly formatted."#,
        level = params.difficulty.level_description(),
        topic = params.topic(),
        subject = params.subject,
        count = params.question_count,
        schema = SCHEMA_SAMPLE,
    )
}

pub fn quiz_request(params: &QuizParameters) -> CompletionRequest {
    CompletionRequest::new(
        vec![
            ChatMessage::system(QUIZ_SYSTEM_PROMPT),
            ChatMessage::user(quiz_prompt(params)),
        ],
        QUIZ_RESPONSE_BUDGET,
    )
}

/// User prompt asking for five topic suggestions as a JSON array.
pub fn suggestion_prompt(subject: &Subject) -> String {
    format!(
        r#"Generate 5 specific quiz topic suggestions for {subject} education.
Topics should be:
- Specific and focused
- Appropriate for creating educational quizzes
- Cover different aspects of {subject}
- Be engaging for students

Return only a JSON array of topic strings, like:
["Topic 1", "Topic 2", "Topic 3", "Topic 4", "Topic 5"]"#
    )
}

pub fn suggestion_request(subject: &Subject) -> CompletionRequest {
    CompletionRequest::new(
        vec![
            ChatMessage::system(SUGGESTION_SYSTEM_PROMPT),
            ChatMessage::user(suggestion_prompt(subject)),
        ],
        SUGGESTION_RESPONSE_BUDGET,
    )
}

/// Conversation for the teaching assistant: system prompt, prior turns,
/// then the new user message.
pub fn chat_request(history: &[ChatMessage], message: &str) -> CompletionRequest {
    let mut messages = Vec::with_capacity(history.len() + 2);
    messages.push(ChatMessage::system(TEACHER_SYSTEM_PROMPT));
    messages.extend(history.iter().cloned());
    messages.push(ChatMessage::user(message));
    CompletionRequest::new(messages, CHAT_RESPONSE_BUDGET)
}
