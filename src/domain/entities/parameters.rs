//! Quiz request parameters and the enums they are built from.

use crate::error::{QuizError, QuizResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use validator::{Validate, ValidationError};

/// Points awarded per question before the difficulty multiplier.
pub const BASE_POINTS: u32 = 10;

/// Inclusive bounds for the number of questions in one quiz.
pub const MIN_QUESTION_COUNT: u32 = 1;
pub const MAX_QUESTION_COUNT: u32 = 20;

/// Subject a quiz belongs to.
///
/// The four curated subjects have template and suggestion catalogs; any other
/// name is carried through verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Subject {
    Math,
    Science,
    English,
    History,
    Other(String),
}

impl Subject {
    pub fn name(&self) -> &str {
        match self {
            Subject::Math => "Math",
            Subject::Science => "Science",
            Subject::English => "English",
            Subject::History => "History",
            Subject::Other(name) => name,
        }
    }

    /// Returns true for subjects with curated catalogs.
    pub fn is_curated(&self) -> bool {
        !matches!(self, Subject::Other(_))
    }
}

impl From<String> for Subject {
    fn from(value: String) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "math" | "mathematics" => Subject::Math,
            "science" => Subject::Science,
            "english" => Subject::English,
            "history" => Subject::History,
            _ => Subject::Other(value.trim().to_string()),
        }
    }
}

impl From<&str> for Subject {
    fn from(value: &str) -> Self {
        Subject::from(value.to_string())
    }
}

impl From<Subject> for String {
    fn from(value: Subject) -> Self {
        value.name().to_string()
    }
}

impl FromStr for Subject {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Subject::from(s))
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Requested quiz difficulty.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub fn multiplier(self) -> f64 {
        match self {
            Difficulty::Easy => 1.0,
            Difficulty::Medium => 1.5,
            Difficulty::Hard => 2.0,
        }
    }

    /// Points for one question: `round(10 × multiplier)`, i.e. 10, 15 or 20.
    pub fn points(self) -> u32 {
        (f64::from(BASE_POINTS) * self.multiplier()).round() as u32
    }

    /// Wording used when describing the difficulty to the generative service.
    pub fn level_description(self) -> &'static str {
        match self {
            Difficulty::Easy => "beginner level",
            Difficulty::Medium => "intermediate level",
            Difficulty::Hard => "advanced level",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(format!(
                "unknown difficulty '{other}', expected easy, medium or hard"
            )),
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of question. Declaration order is the canonical order used for
/// round-robin selection and for prompt wording.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QuestionType {
    MultipleChoice,
    TrueFalse,
    ShortAnswer,
    FillInBlank,
}

impl QuestionType {
    pub const ALL: [QuestionType; 4] = [
        QuestionType::MultipleChoice,
        QuestionType::TrueFalse,
        QuestionType::ShortAnswer,
        QuestionType::FillInBlank,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            QuestionType::MultipleChoice => "multiple-choice",
            QuestionType::TrueFalse => "true-false",
            QuestionType::ShortAnswer => "short-answer",
            QuestionType::FillInBlank => "fill-in-blank",
        }
    }
}

impl FromStr for QuestionType {
    type Err = String;

    /// Accepts the kebab-case wire names and their snake_case spellings.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace(['_', ' '], "-");
        QuestionType::ALL
            .into_iter()
            .find(|t| t.as_str() == normalized)
            .ok_or_else(|| format!("unknown question type '{}'", s.trim()))
    }
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn default_question_count() -> u32 {
    5
}

fn default_question_types() -> BTreeSet<QuestionType> {
    BTreeSet::from([
        QuestionType::MultipleChoice,
        QuestionType::TrueFalse,
        QuestionType::ShortAnswer,
    ])
}

fn validate_topic(topic: &str) -> Result<(), ValidationError> {
    if topic.trim().is_empty() {
        let mut error = ValidationError::new("blank");
        error.message = Some("Topic must not be empty".into());
        return Err(error);
    }
    Ok(())
}

/// Parameters of one quiz generation request, as supplied by the quiz form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct QuizParameters {
    #[validate(custom(function = "validate_topic"))]
    pub topic: String,

    pub subject: Subject,

    /// Free text such as "7" or "K".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grade_level: Option<String>,

    #[serde(default)]
    pub difficulty: Difficulty,

    #[serde(default = "default_question_count")]
    #[validate(range(
        min = 1,
        max = 20,
        message = "Question count must be between 1 and 20"
    ))]
    pub question_count: u32,

    #[serde(default = "default_question_types")]
    #[validate(length(min = 1, message = "At least one question type is required"))]
    pub question_types: BTreeSet<QuestionType>,
}

impl QuizParameters {
    /// Creates parameters with the form defaults: medium difficulty, five
    /// questions, multiple-choice, true-false and short-answer types.
    pub fn new(topic: impl Into<String>, subject: impl Into<Subject>) -> Self {
        Self {
            topic: topic.into(),
            subject: subject.into(),
            grade_level: None,
            difficulty: Difficulty::default(),
            question_count: default_question_count(),
            question_types: default_question_types(),
        }
    }

    pub fn with_grade_level(mut self, grade_level: impl Into<String>) -> Self {
        self.grade_level = Some(grade_level.into());
        self
    }

    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = difficulty;
        self
    }

    pub fn with_question_count(mut self, question_count: u32) -> Self {
        self.question_count = question_count;
        self
    }

    pub fn with_question_types(mut self, types: impl IntoIterator<Item = QuestionType>) -> Self {
        self.question_types = types.into_iter().collect();
        self
    }

    /// Grade level with blank values treated as absent.
    pub fn grade(&self) -> Option<&str> {
        self.grade_level
            .as_deref()
            .map(str::trim)
            .filter(|g| !g.is_empty())
    }

    pub fn topic(&self) -> &str {
        self.topic.trim()
    }

    /// Requested question types in canonical order.
    pub fn types(&self) -> Vec<QuestionType> {
        self.question_types.iter().copied().collect()
    }

    /// Checks the parameters before any generation work starts.
    ///
    /// # Errors
    ///
    /// Returns [`QuizError::InvalidParameters`] for an empty topic, an empty
    /// type set, or a question count outside `1..=20`.
    pub fn ensure_valid(&self) -> QuizResult<()> {
        self.validate().map_err(QuizError::from)
    }
}
