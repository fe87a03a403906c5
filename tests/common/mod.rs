#![allow(dead_code)]

use async_trait::async_trait;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};
use lms_quizgen::domain::random::StdRandom;
use lms_quizgen::prelude::*;
use lms_quizgen::infrastructure::generative::{CompletionRequest, GenerationResult};
use parking_lot::Mutex;
use serde_json::{Value, json};
use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};

/// Endpoint that streams a 200 response with `Transfer-Encoding: chunked`
/// and no `Content-Length`, one chunk per entry of `chunks`.
pub struct ChunkedEndpoint {
    pub base_url: String,
}

impl ChunkedEndpoint {
    pub async fn start(chunks: Vec<String>) -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr: SocketAddr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            while let Ok((mut stream, _)) = listener.accept().await {
                let chunks = chunks.clone();
                tokio::spawn(async move {
                    read_request(&mut stream).await;
                    let head = "HTTP/1.1 200 OK\r\ncontent-type: application/json\r\n\
                                transfer-encoding: chunked\r\nconnection: close\r\n\r\n";
                    if stream.write_all(head.as_bytes()).await.is_err() {
                        return;
                    }
                    for chunk in chunks {
                        let frame = format!("{:x}\r\n{chunk}\r\n", chunk.len());
                        if stream.write_all(frame.as_bytes()).await.is_err() {
                            return;
                        }
                    }
                    let _ = stream.write_all(b"0\r\n\r\n").await;
                    let _ = stream.shutdown().await;
                });
            }
        });

        Self {
            base_url: format!("http://{addr}/v1"),
        }
    }

    pub fn generator(&self) -> OpenAiGenerator {
        OpenAiGenerator::new(
            GeneratorConfig::new(Some("sk-test-key".to_string()))
                .with_base_url(self.base_url.clone())
                .with_timeout(Duration::from_secs(5)),
        )
    }
}

/// Consumes request headers and a `Content-Length` body.
async fn read_request(stream: &mut tokio::net::TcpStream) {
    let mut received = Vec::new();
    let mut buf = [0u8; 4096];
    loop {
        let Ok(n) = stream.read(&mut buf).await else {
            return;
        };
        if n == 0 {
            return;
        }
        received.extend_from_slice(&buf[..n]);
        let Some(end) = received.windows(4).position(|w| w == b"\r\n\r\n") else {
            continue;
        };
        let head = String::from_utf8_lossy(&received[..end]).to_ascii_lowercase();
        let length = head
            .lines()
            .find_map(|line| line.strip_prefix("content-length:"))
            .and_then(|v| v.trim().parse::<usize>().ok())
            .unwrap_or(0);
        if received.len() >= end + 4 + length {
            return;
        }
    }
}

/// A request captured by [`StubEndpoint`].
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub authorization: Option<String>,
    pub body: Value,
}

#[derive(Clone)]
struct StubState {
    status: StatusCode,
    body: String,
    delay: Option<Duration>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

/// Local chat-completions endpoint answering every request with a fixed
/// status and body.
pub struct StubEndpoint {
    pub base_url: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl StubEndpoint {
    pub async fn start(status: StatusCode, body: impl Into<String>) -> Self {
        Self::start_with_delay(status, body, None).await
    }

    pub async fn start_with_delay(
        status: StatusCode,
        body: impl Into<String>,
        delay: Option<Duration>,
    ) -> Self {
        let requests = Arc::new(Mutex::new(Vec::new()));
        let state = StubState {
            status,
            body: body.into(),
            delay,
            requests: requests.clone(),
        };

        let app = Router::new()
            .route("/v1/chat/completions", post(chat_completions))
            .with_state(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr: SocketAddr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{addr}/v1"),
            requests,
        }
    }

    /// Endpoint replying 200 with a completion whose content is `content`.
    pub async fn completing(content: &str) -> Self {
        Self::start(StatusCode::OK, completion_body(content)).await
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().clone()
    }

    pub fn generator_config(&self) -> GeneratorConfig {
        GeneratorConfig::new(Some("sk-test-key".to_string()))
            .with_base_url(self.base_url.clone())
            .with_timeout(Duration::from_secs(5))
    }

    pub fn generator(&self) -> OpenAiGenerator {
        OpenAiGenerator::new(self.generator_config())
    }
}

async fn chat_completions(
    State(state): State<StubState>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> impl IntoResponse {
    let authorization = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    state
        .requests
        .lock()
        .push(RecordedRequest { authorization, body });

    if let Some(delay) = state.delay {
        tokio::time::sleep(delay).await;
    }

    (
        state.status,
        [(header::CONTENT_TYPE, "application/json")],
        state.body,
    )
}

/// Chat-completions response body carrying `content` as the first choice.
pub fn completion_body(content: &str) -> String {
    json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "choices": [
            {
                "index": 0,
                "message": { "role": "assistant", "content": content },
                "finish_reason": "stop"
            }
        ]
    })
    .to_string()
}

/// Generator returning the same scripted outcome for every request and
/// counting calls.
pub struct ScriptedGenerator {
    outcome: GenerationResult<String>,
    calls: AtomicUsize,
}

impl ScriptedGenerator {
    pub fn replying(text: impl Into<String>) -> Self {
        Self {
            outcome: Ok(text.into()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing(reason: Unavailable) -> Self {
        Self {
            outcome: Err(reason),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TextGenerator for ScriptedGenerator {
    async fn complete(&self, _request: CompletionRequest) -> GenerationResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.outcome.clone()
    }

    fn is_configured(&self) -> bool {
        true
    }
}

pub fn quiz_service<G: TextGenerator>(generator: Arc<G>) -> QuizService<G, StdRandom> {
    QuizService::new(generator, Arc::new(StdRandom::seeded(42)))
}

/// Fractions, Math, hard, three multiple-choice questions.
pub fn fractions_params() -> QuizParameters {
    QuizParameters::new("Fractions", "Math")
        .with_difficulty(Difficulty::Hard)
        .with_question_count(3)
        .with_question_types([QuestionType::MultipleChoice])
}

/// Four multiple-choice questions worth 10 points each, with a wrong
/// reported total, wrapped in explanatory prose.
pub fn four_question_response() -> String {
    let questions: Vec<Value> = (1..=4)
        .map(|i| {
            json!({
                "id": format!("q{i}"),
                "type": "multiple-choice",
                "question": format!("What is {i}/4 as a decimal?"),
                "points": 10,
                "options": ["0.25", "0.5", "0.75", "1.0"],
                "correctAnswer": i - 1,
                "explanation": format!("{i} divided by 4")
            })
        })
        .collect();

    let quiz = json!({
        "title": "Quarters",
        "description": "Converting quarters to decimals",
        "totalPoints": 999,
        "estimatedTime": 1,
        "questions": questions
    });

    format!("Sure! Here is your quiz:\n\n{quiz}\n\nLet me know if you need changes.")
}
