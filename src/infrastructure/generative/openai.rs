//! Chat-completions HTTP client.

use super::service::{CompletionRequest, GenerationResult, TextGenerator};
use crate::domain::entities::ChatMessage;
use crate::error::Unavailable;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

/// Upper bound on the HTTP body accepted from the service.
pub const MAX_RESPONSE_BYTES: usize = 256 * 1024;

/// Value shipped in sample `.env` files; treated as no credential.
pub const PLACEHOLDER_API_KEY: &str = "your_openai_api_key_here";

/// Explicit settings for [`OpenAiGenerator`].
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratorConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    pub timeout: Duration,
    pub temperature: f32,
}

impl GeneratorConfig {
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            temperature: DEFAULT_TEMPERATURE,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// The credential, unless it is missing, blank or the placeholder.
    pub fn credential(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty() && *key != PLACEHOLDER_API_KEY)
    }

    pub fn is_configured(&self) -> bool {
        self.credential().is_some() && !self.base_url.trim().is_empty()
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

#[derive(Serialize)]
struct ChatCompletionBody<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    max_tokens: u32,
    temperature: f32,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

/// Text generator backed by an OpenAI-compatible chat-completions endpoint.
///
/// Every request carries the configured timeout, so a call always resolves.
pub struct OpenAiGenerator {
    client: Client,
    config: GeneratorConfig,
}

impl OpenAiGenerator {
    pub fn new(config: GeneratorConfig) -> Self {
        Self::with_client(config, Client::new())
    }

    pub fn with_client(config: GeneratorConfig, client: Client) -> Self {
        if !config.is_configured() {
            debug!("OpenAI credential not configured; generator will report unavailable");
        }
        Self { client, config }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    fn map_transport_error(&self, error: reqwest::Error) -> Unavailable {
        if error.is_timeout() {
            Unavailable::Timeout(self.config.timeout)
        } else {
            Unavailable::Transport(error.to_string())
        }
    }
}

#[async_trait]
impl TextGenerator for OpenAiGenerator {
    async fn complete(&self, request: CompletionRequest) -> GenerationResult<String> {
        let Some(api_key) = self.config.credential() else {
            return Err(Unavailable::NotConfigured);
        };

        let body = ChatCompletionBody {
            model: &self.config.model,
            messages: &request.messages,
            max_tokens: request.max_tokens,
            temperature: self.config.temperature,
        };

        debug!(
            model = %self.config.model,
            messages = request.messages.len(),
            max_tokens = request.max_tokens,
            "Sending completion request"
        );

        let response = self
            .client
            .post(self.config.endpoint())
            .bearer_auth(api_key)
            .timeout(self.config.timeout)
            .json(&body)
            .send()
            .await
            .map_err(|e| self.map_transport_error(e))?;

        let status = response.status();
        if !status.is_success() {
            warn!("Completion endpoint returned {}", status);
            return Err(Unavailable::Status(status.as_u16()));
        }

        if let Some(length) = response.content_length()
            && length as usize > MAX_RESPONSE_BYTES
        {
            return Err(Unavailable::ResponseTooLarge(MAX_RESPONSE_BYTES));
        }

        let mut response = response;
        let mut bytes = Vec::new();
        while let Some(chunk) = response
            .chunk()
            .await
            .map_err(|e| self.map_transport_error(e))?
        {
            if bytes.len() + chunk.len() > MAX_RESPONSE_BYTES {
                warn!(read = bytes.len(), "Completion body exceeds size cap");
                return Err(Unavailable::ResponseTooLarge(MAX_RESPONSE_BYTES));
            }
            bytes.extend_from_slice(&chunk);
        }

        let parsed: ChatCompletionResponse = serde_json::from_slice(&bytes)
            .map_err(|e| Unavailable::InvalidPayload(e.to_string()))?;

        let content = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|text| !text.trim().is_empty())
            .ok_or(Unavailable::EmptyCompletion)?;

        debug!(bytes = content.len(), "Completion received");
        Ok(content)
    }

    fn is_configured(&self) -> bool {
        self.config.is_configured()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_key_is_not_a_credential() {
        assert!(!GeneratorConfig::new(None).is_configured());
        assert!(!GeneratorConfig::new(Some(String::new())).is_configured());
        assert!(!GeneratorConfig::new(Some("  ".to_string())).is_configured());
        assert!(!GeneratorConfig::new(Some(PLACEHOLDER_API_KEY.to_string())).is_configured());
        assert!(GeneratorConfig::new(Some("sk-test".to_string())).is_configured());
    }

    #[test]
    fn test_endpoint_joins_base_url() {
        let config = GeneratorConfig::new(None).with_base_url("http://localhost:8080/v1/");
        assert_eq!(config.endpoint(), "http://localhost:8080/v1/chat/completions");
    }

    #[tokio::test]
    async fn test_missing_credential_short_circuits() {
        let generator = OpenAiGenerator::new(
            GeneratorConfig::new(None).with_base_url("http://127.0.0.1:1"),
        );

        let result = generator
            .complete(CompletionRequest::new(vec![ChatMessage::user("hi")], 10))
            .await;

        assert_eq!(result, Err(Unavailable::NotConfigured));
    }

    #[test]
    fn test_body_shape() {
        let messages = vec![ChatMessage::system("s"), ChatMessage::user("u")];
        let body = ChatCompletionBody {
            model: "gpt-3.5-turbo",
            messages: &messages,
            max_tokens: 2000,
            temperature: 0.5,
        };

        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["model"], "gpt-3.5-turbo");
        assert_eq!(value["max_tokens"], 2000);
        assert_eq!(value["messages"][1]["role"], "user");
    }
}
