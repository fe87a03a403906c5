//! Configuration loaded from environment variables.
//!
//! Loaded once at startup and validated before any service is built.
//!
//! ## Variables
//!
//! ```bash
//! export OPENAI_API_KEY="sk-..."                       # optional
//! export OPENAI_BASE_URL="https://api.openai.com/v1"
//! export OPENAI_MODEL="gpt-3.5-turbo"
//! export GENERATION_TIMEOUT_SECONDS="30"
//! export GENERATION_TEMPERATURE="0.7"
//! ```
//!
//! Without a usable `OPENAI_API_KEY` every quiz, suggestion list and
//! assistant reply comes from the offline fallbacks.
//!
//! - `RUST_LOG` - Log level (default: `info`)
//! - `LOG_FORMAT` - Log format: `text` or `json` (default: `text`)

use crate::infrastructure::generative::{
    DEFAULT_BASE_URL, DEFAULT_MODEL, DEFAULT_TEMPERATURE, DEFAULT_TIMEOUT, GeneratorConfig,
};
use anyhow::{Context, Result};
use regex::Regex;
use std::env;
use std::str::FromStr;
use std::sync::LazyLock;
use std::time::Duration;

static BASE_URL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^https?://[^\s/]+(/\S*)?$").unwrap());

const MAX_TIMEOUT_SECONDS: u64 = 300;

/// Generator and logging configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Credential for the completion endpoint. Never logged in clear.
    pub openai_api_key: Option<String>,
    pub openai_base_url: String,
    pub openai_model: String,
    /// Per-request timeout (`GENERATION_TIMEOUT_SECONDS`, default: 30).
    pub generation_timeout_seconds: u64,
    pub generation_temperature: f32,
    pub log_level: String,
    pub log_format: String,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a numeric variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self> {
        let openai_api_key = env::var("OPENAI_API_KEY").ok();
        let openai_base_url =
            env::var("OPENAI_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let openai_model = env::var("OPENAI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());

        let generation_timeout_seconds =
            parse_var("GENERATION_TIMEOUT_SECONDS", DEFAULT_TIMEOUT.as_secs())?;
        let generation_temperature = parse_var("GENERATION_TEMPERATURE", DEFAULT_TEMPERATURE)?;

        let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
        let log_format = env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

        Ok(Self {
            openai_api_key,
            openai_base_url,
            openai_model,
            generation_timeout_seconds,
            generation_temperature,
            log_level,
            log_format,
        })
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `openai_base_url` is not an `http://` or `https://` URL
    /// - `openai_model` is empty
    /// - `generation_timeout_seconds` is outside `1..=300`
    /// - `generation_temperature` is outside `0.0..=2.0`
    /// - `log_format` is not `text` or `json`
    pub fn validate(&self) -> Result<()> {
        if !BASE_URL_REGEX.is_match(&self.openai_base_url) {
            anyhow::bail!(
                "OPENAI_BASE_URL must start with 'http://' or 'https://', got '{}'",
                self.openai_base_url
            );
        }

        if self.openai_model.trim().is_empty() {
            anyhow::bail!("OPENAI_MODEL must not be empty");
        }

        if self.generation_timeout_seconds == 0
            || self.generation_timeout_seconds > MAX_TIMEOUT_SECONDS
        {
            anyhow::bail!(
                "GENERATION_TIMEOUT_SECONDS must be between 1 and {}, got {}",
                MAX_TIMEOUT_SECONDS,
                self.generation_timeout_seconds
            );
        }

        if !(0.0..=2.0).contains(&self.generation_temperature) {
            anyhow::bail!(
                "GENERATION_TEMPERATURE must be between 0.0 and 2.0, got {}",
                self.generation_temperature
            );
        }

        if self.log_format != "text" && self.log_format != "json" {
            anyhow::bail!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                self.log_format
            );
        }

        Ok(())
    }

    /// Settings for the HTTP generator.
    pub fn generator_config(&self) -> GeneratorConfig {
        GeneratorConfig::new(self.openai_api_key.clone())
            .with_base_url(self.openai_base_url.clone())
            .with_model(self.openai_model.clone())
            .with_timeout(Duration::from_secs(self.generation_timeout_seconds))
            .with_temperature(self.generation_temperature)
    }

    /// Returns whether a usable credential is present.
    pub fn is_generation_enabled(&self) -> bool {
        self.generator_config().is_configured()
    }

    /// Prints configuration summary (without sensitive data).
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Endpoint: {}", self.openai_base_url);
        tracing::info!("  Model: {}", self.openai_model);

        match self.openai_api_key.as_deref() {
            Some(key) if self.is_generation_enabled() => {
                tracing::info!("  API key: {} (enabled)", mask_api_key(key));
            }
            _ => tracing::info!("  API key: not configured (offline fallback)"),
        }

        tracing::info!("  Timeout: {}s", self.generation_timeout_seconds);
        tracing::info!("  Temperature: {}", self.generation_temperature);
        tracing::info!("  Log level: {}", self.log_level);
        tracing::info!("  Log format: {}", self.log_format);
    }
}

fn parse_var<T>(name: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(value) => value
            .trim()
            .parse()
            .with_context(|| format!("{name} has an invalid value '{value}'")),
        Err(_) => Ok(default),
    }
}

/// Masks an API key for logging.
///
/// Keeps the first four characters: `sk-abcdef` → `sk-a***`. Keys of four
/// characters or fewer are fully masked.
pub fn mask_api_key(key: &str) -> String {
    let key = key.trim();
    match key.char_indices().nth(4) {
        Some((cut, _)) => format!("{}***", &key[..cut]),
        None => "***".to_string(),
    }
}

/// Loads and validates configuration from environment variables.
///
/// # Errors
///
/// Returns an error if a variable cannot be parsed or validation fails.
///
/// # Note
///
/// This function expects environment variables to be already loaded
/// (e.g., via `dotenvy::dotenv()` in `main.rs`).
pub fn load_from_env() -> Result<Config> {
    let config = Config::from_env()?;
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const VARS: [&str; 7] = [
        "OPENAI_API_KEY",
        "OPENAI_BASE_URL",
        "OPENAI_MODEL",
        "GENERATION_TIMEOUT_SECONDS",
        "GENERATION_TEMPERATURE",
        "RUST_LOG",
        "LOG_FORMAT",
    ];

    fn clear_env() {
        // SAFETY: callers are marked #[serial]
        unsafe {
            for var in VARS {
                env::remove_var(var);
            }
        }
    }

    fn sample() -> Config {
        Config {
            openai_api_key: Some("sk-test-key".to_string()),
            openai_base_url: DEFAULT_BASE_URL.to_string(),
            openai_model: DEFAULT_MODEL.to_string(),
            generation_timeout_seconds: 30,
            generation_temperature: 0.7,
            log_level: "info".to_string(),
            log_format: "text".to_string(),
        }
    }

    #[test]
    fn test_mask_api_key() {
        assert_eq!(mask_api_key("sk-abcdef123"), "sk-a***");
        assert_eq!(mask_api_key("abcd"), "***");
        assert_eq!(mask_api_key(""), "***");
    }

    #[test]
    fn test_config_validation() {
        let mut config = sample();
        assert!(config.validate().is_ok());

        config.openai_base_url = "ftp://example.com".to_string();
        assert!(config.validate().is_err());
        config.openai_base_url = "http://127.0.0.1:8080/v1".to_string();
        assert!(config.validate().is_ok());

        config.openai_model = " ".to_string();
        assert!(config.validate().is_err());
        config.openai_model = DEFAULT_MODEL.to_string();

        config.generation_timeout_seconds = 0;
        assert!(config.validate().is_err());
        config.generation_timeout_seconds = 301;
        assert!(config.validate().is_err());
        config.generation_timeout_seconds = 30;

        config.generation_temperature = 2.5;
        assert!(config.validate().is_err());
        config.generation_temperature = 0.0;
        assert!(config.validate().is_ok());

        config.log_format = "xml".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_generator_config() {
        let mut config = sample();
        config.generation_timeout_seconds = 12;

        let generator = config.generator_config();
        assert_eq!(generator.timeout, Duration::from_secs(12));
        assert_eq!(generator.credential(), Some("sk-test-key"));
        assert!(config.is_generation_enabled());

        config.openai_api_key = Some("your_openai_api_key_here".to_string());
        assert!(!config.is_generation_enabled());
    }

    #[test]
    #[serial]
    fn test_defaults_from_empty_env() {
        clear_env();

        let config = load_from_env().unwrap();

        assert_eq!(config.openai_api_key, None);
        assert_eq!(config.openai_base_url, DEFAULT_BASE_URL);
        assert_eq!(config.openai_model, DEFAULT_MODEL);
        assert_eq!(config.generation_timeout_seconds, 30);
        assert_eq!(config.log_format, "text");
        assert!(!config.is_generation_enabled());
    }

    #[test]
    #[serial]
    fn test_values_from_env() {
        clear_env();
        // SAFETY: Tests are run serially due to #[serial], so no concurrent access
        unsafe {
            env::set_var("OPENAI_API_KEY", "sk-live");
            env::set_var("OPENAI_MODEL", "gpt-4o-mini");
            env::set_var("GENERATION_TIMEOUT_SECONDS", "5");
            env::set_var("GENERATION_TEMPERATURE", "0.2");
            env::set_var("LOG_FORMAT", "json");
        }

        let config = load_from_env().unwrap();
        assert_eq!(config.openai_model, "gpt-4o-mini");
        assert_eq!(config.generation_timeout_seconds, 5);
        assert!((config.generation_temperature - 0.2).abs() < f32::EPSILON);
        assert!(config.is_generation_enabled());

        clear_env();
    }

    #[test]
    #[serial]
    fn test_unparseable_timeout_is_an_error() {
        clear_env();
        // SAFETY: Tests are run serially
        unsafe {
            env::set_var("GENERATION_TIMEOUT_SECONDS", "soon");
        }

        assert!(Config::from_env().is_err());

        clear_env();
    }
}
