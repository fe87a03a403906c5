//! Template-based quiz synthesis used when the generative service cannot
//! provide a usable quiz.
//!
//! The shape of the output depends only on the parameters: question count,
//! types (round-robin over the requested set in canonical order) and points
//! are fixed. Content varies through the injected [`RandomSource`]: the
//! position of the correct multiple-choice option and true/false polarity.

use std::sync::Arc;

use super::entities::quiz::{default_description, default_title};
use super::entities::{Answer, Provenance, Question, QuestionType, Quiz, QuizParameters};
use super::random::{RandomSource, shuffle};
use super::templates;
use tracing::debug;

/// Builds complete quizzes from the template bank without any I/O.
pub struct FallbackGenerator<R: RandomSource + ?Sized> {
    random: Arc<R>,
}

impl<R: RandomSource + ?Sized> Clone for FallbackGenerator<R> {
    fn clone(&self) -> Self {
        Self {
            random: self.random.clone(),
        }
    }
}

impl<R: RandomSource + ?Sized> FallbackGenerator<R> {
    pub fn new(random: Arc<R>) -> Self {
        Self { random }
    }

    /// Generates a quiz tagged [`Provenance::Fallback`].
    ///
    /// Expects parameters that already passed
    /// [`QuizParameters::ensure_valid`]; it never fails for those.
    pub fn generate(&self, params: &QuizParameters) -> Quiz {
        let types = params.types();
        let points = params.difficulty.points();

        let questions: Vec<Question> = (0..params.question_count as usize)
            .map(|index| {
                let question_type = types[index % types.len()];
                self.question(params, question_type, index, points)
            })
            .collect();

        debug!(
            topic = params.topic(),
            count = questions.len(),
            "Generated fallback quiz"
        );

        Quiz::assemble(
            params,
            default_title(params),
            default_description(params),
            questions,
            Provenance::Fallback,
        )
    }

    fn question(
        &self,
        params: &QuizParameters,
        question_type: QuestionType,
        index: usize,
        points: u32,
    ) -> Question {
        let topic = params.topic();
        let subject = &params.subject;
        let prompt = templates::stem(subject, question_type, index, topic);

        let (answer, explanation) = match question_type {
            QuestionType::MultipleChoice => (
                self.multiple_choice_answer(topic),
                format!("This question tests your understanding of {topic} in {subject}."),
            ),
            QuestionType::TrueFalse => {
                let correct_answer = self.random.next_bool();
                (
                    Answer::TrueFalse { correct_answer },
                    format!("This statement is {correct_answer} based on {subject} principles."),
                )
            }
            QuestionType::ShortAnswer => (
                Answer::ShortAnswer {
                    correct_answer: format!(
                        "Sample answer: This question requires students to demonstrate their understanding of {topic} in {subject}."
                    ),
                },
                format!(
                    "Students should provide a clear, detailed explanation showing their understanding of {topic}."
                ),
            ),
            QuestionType::FillInBlank => (
                Answer::FillInBlank {
                    correct_answer: format!("Sample answer for {topic}"),
                },
                format!(
                    "Students should fill in the blank with the correct term related to {topic}."
                ),
            ),
        };

        Question::new(index + 1, prompt, points, answer, Some(explanation))
    }

    fn multiple_choice_answer(&self, topic: &str) -> Answer {
        let correct = format!("Correct answer related to {topic}");
        let mut options = [
            correct.clone(),
            "Incorrect option 1".to_string(),
            "Incorrect option 2".to_string(),
            "Incorrect option 3".to_string(),
        ];
        shuffle(&mut options, self.random.as_ref());

        let correct_answer = options.iter().position(|o| *o == correct).unwrap_or(0);
        Answer::MultipleChoice {
            options,
            correct_answer,
        }
    }
}
