//! Validation and mapping of raw generative output onto the quiz schema.
//!
//! The service may wrap its JSON in prose or code fences, so the first
//! balanced `{...}` span is extracted before parsing. Every question is
//! validated; any problem rejects the whole response with
//! [`QuizError::MalformedResponse`] rather than producing a partial quiz.
//!
//! # Rules
//!
//! 1. `questions` must be a non-empty array
//! 2. Each entry needs a recognized `type` from the requested set and a
//!    non-empty `question`
//! 3. `points` defaults to 10 when absent, non-numeric or not positive;
//!    values above [`MAX_QUESTION_POINTS`] reject the response
//! 4. Multiple-choice entries need exactly 4 options and a correct answer
//!    that resolves to one of them
//! 5. Ids are renumbered `q1..qn`; totals and estimated time are recomputed
//! 6. Extra questions beyond the requested count are dropped; fewer valid
//!    questions than requested is a failure

use crate::domain::entities::parameters::BASE_POINTS;
use crate::domain::entities::quiz::{default_description, default_title};
use crate::domain::entities::{
    Answer, OPTION_COUNT, Provenance, Question, QuestionType, Quiz, QuizParameters,
};
use crate::error::{QuizError, QuizResult};
use serde_json::{Map, Value};
use std::collections::BTreeSet;
use tracing::debug;

/// Returns the first balanced span delimited by `open`/`close`.
///
/// Delimiters inside JSON string literals are ignored. Returns `None` when
/// no start position yields a balanced span.
pub fn extract_span(raw: &str, open: char, close: char) -> Option<&str> {
    raw.char_indices()
        .filter(|&(_, c)| c == open)
        .find_map(|(start, _)| balanced_from(raw, start, open, close))
}

fn balanced_from(raw: &str, start: usize, open: char, close: char) -> Option<&str> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, c) in raw[start..].char_indices() {
        if in_string {
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }

        if c == '"' {
            in_string = true;
        } else if c == open {
            depth += 1;
        } else if c == close {
            depth -= 1;
            if depth == 0 {
                let end = start + offset + c.len_utf8();
                return Some(&raw[start..end]);
            }
        }
    }

    None
}

/// Largest per-question point value accepted from the service.
pub const MAX_QUESTION_POINTS: u32 = 1000;

/// Candidate JSON text: the first balanced object, or the whole input.
pub fn extract_object(raw: &str) -> &str {
    extract_span(raw, '{', '}').unwrap_or(raw)
}

/// Converts a raw service response into a quiz tagged
/// [`Provenance::Service`].
///
/// # Errors
///
/// Returns [`QuizError::MalformedResponse`] if the text does not contain a
/// parseable object or any question fails validation.
///
/// Per-question points are kept as the service reports them; they are not
/// forced to the difficulty value the fallback generator uses.
pub fn normalize(raw: &str, params: &QuizParameters) -> QuizResult<Quiz> {
    let candidate = extract_object(raw);
    let parsed: Value = serde_json::from_str(candidate)
        .map_err(|e| QuizError::malformed(format!("response is not valid JSON: {e}")))?;

    let object = parsed
        .as_object()
        .ok_or_else(|| QuizError::malformed("response is not a JSON object"))?;

    let entries = object
        .get("questions")
        .and_then(Value::as_array)
        .filter(|questions| !questions.is_empty())
        .ok_or_else(|| QuizError::malformed("response has no questions"))?;

    let requested = params.question_count as usize;
    if entries.len() > requested {
        debug!(
            received = entries.len(),
            requested, "Dropping surplus questions from response"
        );
    }

    let questions = entries
        .iter()
        .take(requested)
        .enumerate()
        .map(|(index, entry)| question(index + 1, entry, &params.question_types))
        .collect::<QuizResult<Vec<_>>>()?;

    if questions.len() < requested {
        return Err(QuizError::malformed(format!(
            "response has {} questions, {} requested",
            questions.len(),
            requested
        )));
    }

    questions
        .iter()
        .try_fold(0u32, |total, q| total.checked_add(q.points))
        .ok_or_else(|| QuizError::malformed("question points overflow the quiz total"))?;

    let title = non_empty_text(object.get("title")).unwrap_or_else(|| default_title(params));
    let description =
        non_empty_text(object.get("description")).unwrap_or_else(|| default_description(params));

    Ok(Quiz::assemble(
        params,
        title,
        description,
        questions,
        Provenance::Service,
    ))
}

fn question(
    position: usize,
    entry: &Value,
    requested: &BTreeSet<QuestionType>,
) -> QuizResult<Question> {
    let fields = entry
        .as_object()
        .ok_or_else(|| QuizError::malformed(format!("question {position} is not an object")))?;

    let question_type = fields
        .get("type")
        .and_then(Value::as_str)
        .and_then(|t| t.parse::<QuestionType>().ok())
        .ok_or_else(|| {
            QuizError::malformed(format!("question {position} has an unrecognized type"))
        })?;

    if !requested.contains(&question_type) {
        return Err(QuizError::malformed(format!(
            "question {position} has type {question_type}, which was not requested"
        )));
    }

    let prompt = non_empty_text(fields.get("question"))
        .ok_or_else(|| QuizError::malformed(format!("question {position} has no text")))?;

    let answer = answer(position, question_type, fields)?;
    let points = points(position, fields.get("points"))?;
    let explanation = non_empty_text(fields.get("explanation"));

    Ok(Question::new(position, prompt, points, answer, explanation))
}

fn answer(
    position: usize,
    question_type: QuestionType,
    fields: &Map<String, Value>,
) -> QuizResult<Answer> {
    let correct = fields.get("correctAnswer");

    match question_type {
        QuestionType::MultipleChoice => {
            let options = options(position, fields.get("options"))?;
            let index = correct
                .and_then(|value| option_index(value, &options))
                .ok_or_else(|| {
                    QuizError::malformed(format!(
                        "question {position} has no valid correct option"
                    ))
                })?;
            Answer::multiple_choice(options, index).ok_or_else(|| {
                QuizError::malformed(format!("question {position} correct option out of range"))
            })
        }
        QuestionType::TrueFalse => {
            let correct_answer = correct.and_then(boolean).ok_or_else(|| {
                QuizError::malformed(format!("question {position} has no true/false answer"))
            })?;
            Ok(Answer::TrueFalse { correct_answer })
        }
        QuestionType::ShortAnswer | QuestionType::FillInBlank => {
            let correct_answer = correct.and_then(scalar_text).ok_or_else(|| {
                QuizError::malformed(format!("question {position} has no sample answer"))
            })?;
            Ok(if question_type == QuestionType::ShortAnswer {
                Answer::ShortAnswer { correct_answer }
            } else {
                Answer::FillInBlank { correct_answer }
            })
        }
    }
}

fn options(position: usize, value: Option<&Value>) -> QuizResult<[String; OPTION_COUNT]> {
    let texts = value
        .and_then(Value::as_array)
        .map(|items| items.iter().map(scalar_text).collect::<Option<Vec<_>>>())
        .ok_or_else(|| QuizError::malformed(format!("question {position} has no options")))?
        .ok_or_else(|| QuizError::malformed(format!("question {position} has a blank option")))?;

    let count = texts.len();
    texts.try_into().map_err(|_| {
        QuizError::malformed(format!(
            "question {position} has {count} options, expected {OPTION_COUNT}"
        ))
    })
}

/// Resolves a correct answer given as an index, a numeric string, the text
/// of one of the options, or a letter `A`-`D`.
fn option_index(value: &Value, options: &[String]) -> Option<usize> {
    match value {
        Value::Number(n) => n.as_u64().map(|i| i as usize),
        Value::String(s) => {
            let s = s.trim();
            if let Ok(index) = s.parse::<usize>() {
                return Some(index);
            }
            if let Some(index) = options.iter().position(|option| option == s) {
                return Some(index);
            }
            let mut chars = s.chars();
            match (chars.next(), chars.next()) {
                (Some(letter), None) if letter.is_ascii_alphabetic() => {
                    let index = (letter.to_ascii_uppercase() as u8 - b'A') as usize;
                    (index < options.len()).then_some(index)
                }
                _ => None,
            }
        }
        _ => None,
    }
}

fn boolean(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" => Some(true),
            "false" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

fn points(position: usize, value: Option<&Value>) -> QuizResult<u32> {
    let parsed = match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };

    match parsed.filter(|p| p.is_finite() && *p >= 0.5) {
        None => Ok(BASE_POINTS),
        Some(p) if p.round() > f64::from(MAX_QUESTION_POINTS) => Err(QuizError::malformed(
            format!("question {position} is worth {p} points, above {MAX_QUESTION_POINTS}"),
        )),
        Some(p) => Ok(p.round() as u32),
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    let text = match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => return None,
    };
    (!text.is_empty()).then_some(text)
}

fn non_empty_text(value: Option<&Value>) -> Option<String> {
    value
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
