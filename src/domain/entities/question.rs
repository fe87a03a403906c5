//! Question entity and its type-dependent answer shape.

use super::parameters::QuestionType;
use serde::{Deserialize, Serialize};

/// Number of options every multiple-choice question carries.
pub const OPTION_COUNT: usize = 4;

/// Answer key of a question. Serialized with a `type` tag so the answer
/// shape is flattened into the question object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Answer {
    MultipleChoice {
        options: [String; OPTION_COUNT],
        #[serde(rename = "correctAnswer")]
        correct_answer: usize,
    },
    TrueFalse {
        #[serde(rename = "correctAnswer")]
        correct_answer: bool,
    },
    ShortAnswer {
        #[serde(rename = "correctAnswer")]
        correct_answer: String,
    },
    FillInBlank {
        #[serde(rename = "correctAnswer")]
        correct_answer: String,
    },
}

impl Answer {
    /// Builds a multiple-choice answer, rejecting an out-of-range index.
    pub fn multiple_choice(options: [String; OPTION_COUNT], correct_answer: usize) -> Option<Self> {
        (correct_answer < OPTION_COUNT).then_some(Answer::MultipleChoice {
            options,
            correct_answer,
        })
    }

    pub fn question_type(&self) -> QuestionType {
        match self {
            Answer::MultipleChoice { .. } => QuestionType::MultipleChoice,
            Answer::TrueFalse { .. } => QuestionType::TrueFalse,
            Answer::ShortAnswer { .. } => QuestionType::ShortAnswer,
            Answer::FillInBlank { .. } => QuestionType::FillInBlank,
        }
    }
}

/// A single quiz question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    /// Unique within its quiz (`q1`, `q2`, ...).
    pub id: String,

    #[serde(rename = "question")]
    pub prompt: String,

    pub points: u32,

    #[serde(flatten)]
    pub answer: Answer,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

impl Question {
    pub fn new(
        position: usize,
        prompt: impl Into<String>,
        points: u32,
        answer: Answer,
        explanation: Option<String>,
    ) -> Self {
        Self {
            id: question_id(position),
            prompt: prompt.into(),
            points,
            answer,
            explanation,
        }
    }

    pub fn question_type(&self) -> QuestionType {
        self.answer.question_type()
    }
}

/// Stable id for the question at a 1-based position.
pub fn question_id(position: usize) -> String {
    format!("q{position}")
}
