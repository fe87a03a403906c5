//! Quiz topic suggestions for the autocomplete field.

use std::sync::Arc;

use crate::application::normalizer::extract_span;
use crate::domain::entities::{Provenance, Subject};
use crate::infrastructure::generative::{TextGenerator, prompt};
use serde::Serialize;
use tracing::{debug, warn};

/// Maximum number of topics returned.
pub const SUGGESTION_COUNT: usize = 5;

const MATH: [&str; SUGGESTION_COUNT] = [
    "Algebraic Equations",
    "Geometry Basics",
    "Fractions and Decimals",
    "Word Problems",
    "Graphing Functions",
];

const SCIENCE: [&str; SUGGESTION_COUNT] = [
    "Scientific Method",
    "Ecosystems and Environment",
    "Matter and Energy",
    "Forces and Motion",
    "Earth and Space",
];

const ENGLISH: [&str; SUGGESTION_COUNT] = [
    "Grammar and Punctuation",
    "Reading Comprehension",
    "Creative Writing",
    "Literary Analysis",
    "Vocabulary Building",
];

const HISTORY: [&str; SUGGESTION_COUNT] = [
    "Ancient Civilizations",
    "American Revolution",
    "World Wars",
    "Government and Politics",
    "Cultural Movements",
];

const GENERIC: [&str; SUGGESTION_COUNT] = [
    "Key Concepts",
    "Important Topics",
    "Review Material",
    "Practice Problems",
    "Assessment Topics",
];

/// Fixed suggestions for a subject; unknown subjects get a generic list.
pub fn curated_suggestions(subject: &Subject) -> Vec<String> {
    let list = match subject {
        Subject::Math => &MATH,
        Subject::Science => &SCIENCE,
        Subject::English => &ENGLISH,
        Subject::History => &HISTORY,
        Subject::Other(_) => &GENERIC,
    };
    list.iter().map(|s| s.to_string()).collect()
}

/// Extracts up to five topics from a response holding a JSON array of
/// strings. Returns `None` if no usable topic is found.
pub fn parse_suggestions(raw: &str) -> Option<Vec<String>> {
    let candidate = extract_span(raw, '[', ']').unwrap_or(raw);
    let items: Vec<String> = serde_json::from_str(candidate).ok()?;

    let topics: Vec<String> = items
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .take(SUGGESTION_COUNT)
        .map(str::to_string)
        .collect();

    (!topics.is_empty()).then_some(topics)
}

/// Topic suggestions and where they came from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Suggestions {
    pub topics: Vec<String>,
    pub provenance: Provenance,
}

/// Service that proposes quiz topics for a subject.
///
/// Same degradation policy as [`crate::application::services::QuizService`]:
/// any service problem yields the curated list, never an error.
pub struct SuggestionService<G: TextGenerator + ?Sized> {
    generator: Arc<G>,
}

impl<G: TextGenerator + ?Sized> SuggestionService<G> {
    /// Creates a new suggestion service.
    pub fn new(generator: Arc<G>) -> Self {
        Self { generator }
    }

    pub async fn get_suggestions(&self, subject: &Subject) -> Suggestions {
        match self
            .generator
            .complete(prompt::suggestion_request(subject))
            .await
        {
            Ok(raw) => {
                if let Some(topics) = parse_suggestions(&raw) {
                    debug!(subject = %subject, count = topics.len(), "Suggestions from service");
                    return Suggestions {
                        topics,
                        provenance: Provenance::Service,
                    };
                }
                warn!("Unparseable suggestion response. Using curated list.");
            }
            Err(reason) => debug!("Suggestion service unavailable: {}", reason),
        }

        Suggestions {
            topics: curated_suggestions(subject),
            provenance: Provenance::Fallback,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Unavailable;
    use crate::infrastructure::generative::{MockTextGenerator, NullGenerator};

    #[tokio::test]
    async fn test_unconfigured_math_suggestions() {
        let service = SuggestionService::new(Arc::new(NullGenerator::new()));
        let suggestions = service.get_suggestions(&Subject::Math).await;

        assert_eq!(suggestions.provenance, Provenance::Fallback);
        assert_eq!(
            suggestions.topics,
            vec![
                "Algebraic Equations",
                "Geometry Basics",
                "Fractions and Decimals",
                "Word Problems",
                "Graphing Functions"
            ]
        );
    }

    #[tokio::test]
    async fn test_unknown_subject_gets_generic_list() {
        let service = SuggestionService::new(Arc::new(NullGenerator::new()));
        let suggestions = service.get_suggestions(&Subject::from("Woodworking")).await;

        assert_eq!(suggestions.topics.len(), 5);
        assert_eq!(suggestions.topics[0], "Key Concepts");
        assert_eq!(suggestions.topics[4], "Assessment Topics");
    }

    #[tokio::test]
    async fn test_service_topics_are_used() {
        let mut generator = MockTextGenerator::new();
        generator
            .expect_complete()
            .withf(|request| request.max_tokens == prompt::SUGGESTION_RESPONSE_BUDGET)
            .times(1)
            .returning(|_| {
                Ok(r#"Here are some ideas: ["Cell Biology", " ", "Genetics", "Plate Tectonics", "Optics", "Acids", "Bases"]"#.to_string())
            });

        let service = SuggestionService::new(Arc::new(generator));
        let suggestions = service.get_suggestions(&Subject::Science).await;

        assert_eq!(suggestions.provenance, Provenance::Service);
        assert_eq!(
            suggestions.topics,
            vec!["Cell Biology", "Genetics", "Plate Tectonics", "Optics", "Acids"]
        );
    }

    #[tokio::test]
    async fn test_unparseable_response_gets_curated_list() {
        let mut generator = MockTextGenerator::new();
        generator
            .expect_complete()
            .returning(|_| Ok("1. Cells\n2. Atoms".to_string()));

        let service = SuggestionService::new(Arc::new(generator));
        let suggestions = service.get_suggestions(&Subject::English).await;

        assert_eq!(suggestions.provenance, Provenance::Fallback);
        assert_eq!(suggestions.topics, curated_suggestions(&Subject::English));
    }

    #[tokio::test]
    async fn test_timeout_gets_curated_list() {
        let mut generator = MockTextGenerator::new();
        generator
            .expect_complete()
            .returning(|_| Err(Unavailable::Timeout(std::time::Duration::from_secs(1))));

        let service = SuggestionService::new(Arc::new(generator));
        let suggestions = service.get_suggestions(&Subject::History).await;

        assert_eq!(suggestions.topics, curated_suggestions(&Subject::History));
    }

    #[test]
    fn test_parse_suggestions() {
        assert_eq!(
            parse_suggestions(r#"["A", "B"]"#),
            Some(vec!["A".to_string(), "B".to_string()])
        );
        assert_eq!(parse_suggestions("[]"), None);
        assert_eq!(parse_suggestions("[1, 2]"), None);
        assert_eq!(parse_suggestions(r#"[1, "A"]"#), None);
        assert_eq!(parse_suggestions(r#"["A", null, "B"]"#), None);
        assert_eq!(parse_suggestions("nothing"), None);
    }
}
