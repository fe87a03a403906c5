//! Quiz generation entry point.

use std::sync::Arc;

use crate::application::normalizer;
use crate::domain::entities::{Quiz, QuizParameters};
use crate::domain::fallback::FallbackGenerator;
use crate::domain::random::RandomSource;
use crate::error::{QuizError, QuizResult, Unavailable};
use crate::infrastructure::generative::{TextGenerator, prompt};
use tracing::{debug, info, warn};

/// Service that produces quizzes from request parameters.
///
/// Asks the generative service first and falls back to template generation
/// whenever the service is unavailable or its response does not validate.
/// Callers only ever see [`QuizError::InvalidParameters`].
pub struct QuizService<G: TextGenerator + ?Sized, R: RandomSource + ?Sized> {
    generator: Arc<G>,
    fallback: FallbackGenerator<R>,
}

impl<G: TextGenerator + ?Sized, R: RandomSource + ?Sized> QuizService<G, R> {
    /// Creates a new quiz service.
    pub fn new(generator: Arc<G>, random: Arc<R>) -> Self {
        Self {
            generator,
            fallback: FallbackGenerator::new(random),
        }
    }

    /// Generates a quiz for the given parameters.
    ///
    /// The returned quiz is complete: it is either fully built from a
    /// validated service response or fully built by the fallback generator.
    ///
    /// # Errors
    ///
    /// Returns [`QuizError::InvalidParameters`] if the topic is blank, no
    /// question type is requested, or the count is outside `1..=20`. The
    /// generative service is not contacted in that case.
    pub async fn generate_quiz(&self, params: &QuizParameters) -> QuizResult<Quiz> {
        params.ensure_valid()?;

        match self.from_service(params).await {
            Ok(quiz) => {
                info!(
                    topic = params.topic(),
                    questions = quiz.question_count(),
                    total_points = quiz.total_points,
                    "Quiz generated by service"
                );
                Ok(quiz)
            }
            Err(err) => {
                match &err {
                    QuizError::AdapterUnavailable(Unavailable::NotConfigured) => {
                        debug!("Generative service not configured, using fallback generator");
                    }
                    _ => warn!("{}. Using fallback generator.", err),
                }

                let quiz = self.fallback.generate(params);
                info!(
                    topic = params.topic(),
                    questions = quiz.question_count(),
                    total_points = quiz.total_points,
                    "Quiz generated by fallback"
                );
                Ok(quiz)
            }
        }
    }

    async fn from_service(&self, params: &QuizParameters) -> QuizResult<Quiz> {
        let raw = self.generator.complete(prompt::quiz_request(params)).await?;
        normalizer::normalize(&raw, params)
    }
}
