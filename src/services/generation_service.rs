use async_openai::{
    config::OpenAIConfig,
    error::OpenAIError,
    types::chat::{
        ChatCompletionRequestMessage, ChatCompletionRequestUserMessageArgs,
        CreateChatCompletionRequestArgs,
    },
    Client,
};
use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use secrecy::ExposeSecret;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

use crate::{
    config::Config,
    constants::build_quiz_prompt,
    errors::{AppError, AppResult},
    models::domain::GeneratedQuiz,
};

/// Character window submitted on the primary invocation.
pub const PRIMARY_WINDOW_CHARS: usize = 30_000;
/// Smaller window used for the single fallback invocation.
pub const FALLBACK_WINDOW_CHARS: usize = 10_000;

const MAX_INVOKE_ATTEMPTS: u32 = 3;
const BACKOFF_BASE_SECS: u64 = 2;
const BACKOFF_CAP_SECS: u64 = 10;

static FENCE_OPEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^```(?:json)?\s*").expect("FENCE_OPEN is a valid regex pattern"));
static FENCE_CLOSE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s*```$").expect("FENCE_CLOSE is a valid regex pattern"));

/// Errors surfaced by a generation backend. Only the rate-limit class is
/// retried; everything else goes straight to the fallback step.
#[derive(Debug, Clone, Error)]
pub enum BackendError {
    #[error("rate limited: {0}")]
    RateLimited(String),

    #[error("{0}")]
    Backend(String),
}

impl BackendError {
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, BackendError::RateLimited(_))
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GenerationBackend: Send + Sync {
    /// Sends one prompt and returns the raw response text.
    async fn complete(&self, prompt: &str) -> Result<String, BackendError>;
}

/// Chat-completion backend over an OpenAI-compatible endpoint (Gemini by
/// default, see `Config`).
pub struct OpenAiBackend {
    client: Client<OpenAIConfig>,
    model: String,
}

impl OpenAiBackend {
    pub fn new(config: &Config) -> Self {
        let openai_config = OpenAIConfig::new()
            .with_api_key(config.llm_api_key.expose_secret())
            .with_api_base(&config.llm_api_base);

        Self {
            client: Client::with_config(openai_config),
            model: config.llm_model.clone(),
        }
    }
}

#[async_trait]
impl GenerationBackend for OpenAiBackend {
    async fn complete(&self, prompt: &str) -> Result<String, BackendError> {
        log::debug!(
            "Calling generation backend, model: {}, prompt length: {}",
            self.model,
            prompt.len()
        );

        let user_message = ChatCompletionRequestUserMessageArgs::default()
            .content(prompt)
            .build()
            .map_err(classify_error)?;

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(vec![ChatCompletionRequestMessage::User(user_message)])
            .temperature(0.7)
            .build()
            .map_err(classify_error)?;

        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(classify_error)?;

        response
            .choices
            .first()
            .and_then(|choice| choice.message.content.clone())
            .ok_or_else(|| BackendError::Backend("empty response from backend".to_string()))
    }
}

fn classify_error(err: OpenAIError) -> BackendError {
    if let OpenAIError::ApiError(api) = &err {
        let code_429 = api
            .code
            .as_ref()
            .map(|c| c.to_string().contains("429"))
            .unwrap_or(false);
        let quota_type = api
            .r#type
            .as_deref()
            .map(|t| t.contains("rate_limit") || t.contains("quota"))
            .unwrap_or(false);
        let quota_message = {
            let msg = api.message.to_lowercase();
            msg.contains("quota") || msg.contains("rate limit") || msg.contains("resource exhausted")
        };

        if code_429 || quota_type || quota_message {
            return BackendError::RateLimited(api.message.clone());
        }
    }
    BackendError::Backend(err.to_string())
}

/// Drives the generate pipeline: format the prompt from a bounded text
/// window, invoke the backend with quota-error retries, fall back once to
/// a smaller window, then fence-strip and JSON-parse the response.
pub struct GenerationService {
    backend: Arc<dyn GenerationBackend>,
}

impl GenerationService {
    pub fn new(backend: Arc<dyn GenerationBackend>) -> Self {
        Self { backend }
    }

    pub async fn generate_quiz(&self, text: &str) -> AppResult<GeneratedQuiz> {
        let prompt = build_quiz_prompt(&truncate_chars(text, PRIMARY_WINDOW_CHARS));

        let raw = match self.invoke_with_retry(&prompt).await {
            Ok(raw) => raw,
            Err(err) => {
                log::warn!("Generation failed: {}. Retrying with smaller context...", err);
                let fallback_prompt =
                    build_quiz_prompt(&truncate_chars(text, FALLBACK_WINDOW_CHARS));
                self.backend
                    .complete(&fallback_prompt)
                    .await
                    .map_err(|e| AppError::GenerationError(e.to_string()))?
            }
        };

        parse_generated(&raw)
    }

    /// Retries rate-limit-class failures up to 3 attempts total with
    /// exponential backoff; any other failure propagates immediately.
    async fn invoke_with_retry(&self, prompt: &str) -> Result<String, BackendError> {
        let mut attempt = 1;
        loop {
            match self.backend.complete(prompt).await {
                Ok(raw) => return Ok(raw),
                Err(err) if err.is_rate_limited() && attempt < MAX_INVOKE_ATTEMPTS => {
                    let delay = backoff_delay(attempt);
                    log::warn!(
                        "Backend rate limited (attempt {}/{}), backing off for {:?}",
                        attempt,
                        MAX_INVOKE_ATTEMPTS,
                        delay
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }
}

/// Strips leading/trailing markdown code-fence markers, then parses the
/// remainder as the quiz JSON object. Invalid JSON is terminal.
pub fn parse_generated(raw: &str) -> AppResult<GeneratedQuiz> {
    let content = strip_code_fences(raw);

    serde_json::from_str(&content).map_err(|err| {
        log::error!("JSON decode error: {}; content was: {}", err, content);
        AppError::ParseError(err.to_string())
    })
}

pub fn strip_code_fences(raw: &str) -> String {
    let trimmed = raw.trim();
    let without_open = FENCE_OPEN.replace(trimmed, "");
    FENCE_CLOSE.replace(&without_open, "").to_string()
}

fn backoff_delay(attempt: u32) -> Duration {
    let secs = (BACKOFF_BASE_SECS << (attempt - 1)).min(BACKOFF_CAP_SECS);
    Duration::from_secs(secs)
}

fn truncate_chars(s: &str, limit: usize) -> String {
    s.chars().take(limit).collect()
}
