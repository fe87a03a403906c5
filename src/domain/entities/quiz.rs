//! Quiz aggregate produced by one generation request.

use super::parameters::{Difficulty, QuizParameters, Subject};
use super::question::Question;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Minutes budgeted per question when estimating completion time.
pub const MINUTES_PER_QUESTION: u32 = 2;

/// Where the questions of a quiz came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provenance {
    /// Parsed from the generative service's response.
    Service,
    /// Synthesized locally from the template bank.
    Fallback,
}

impl fmt::Display for Provenance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Provenance::Service => f.write_str("service"),
            Provenance::Fallback => f.write_str("fallback"),
        }
    }
}

/// A generated quiz. Created once per request and not modified afterwards.
///
/// `total_points` and `estimated_time` are always derived from `questions`
/// by [`Quiz::assemble`]; values reported by the generative service are
/// never trusted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quiz {
    pub id: String,
    pub title: String,
    pub description: String,
    pub topic: String,
    pub subject: Subject,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grade_level: Option<String>,
    pub difficulty: Difficulty,
    pub questions: Vec<Question>,
    pub total_points: u32,
    /// Minutes.
    pub estimated_time: u32,
    pub created_at: DateTime<Utc>,
    pub provenance: Provenance,
}

impl Quiz {
    /// Builds a quiz from finished questions, deriving totals from them.
    pub fn assemble(
        params: &QuizParameters,
        title: String,
        description: String,
        questions: Vec<Question>,
        provenance: Provenance,
    ) -> Self {
        let total_points = questions.iter().map(|q| q.points).sum();
        let estimated_time = MINUTES_PER_QUESTION * questions.len() as u32;

        Self {
            id: Uuid::new_v4().to_string(),
            title,
            description,
            topic: params.topic().to_string(),
            subject: params.subject.clone(),
            grade_level: params.grade().map(str::to_string),
            difficulty: params.difficulty,
            questions,
            total_points,
            estimated_time,
            created_at: Utc::now(),
            provenance,
        }
    }

    pub fn question_count(&self) -> usize {
        self.questions.len()
    }

    pub fn is_fallback(&self) -> bool {
        self.provenance == Provenance::Fallback
    }
}

/// Title used when the service does not provide one.
pub fn default_title(params: &QuizParameters) -> String {
    format!("AI Generated Quiz: {}", params.topic())
}

/// Description used when the service does not provide one.
pub fn default_description(params: &QuizParameters) -> String {
    match params.grade() {
        Some(grade) => format!(
            "An AI-generated quiz about {} for {} grade {} students",
            params.topic(),
            grade,
            params.subject
        ),
        None => format!(
            "An AI-generated quiz about {} for {} students",
            params.topic(),
            params.subject
        ),
    }
}
