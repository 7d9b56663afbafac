/// LLM Client — the completion gateway for every AI endpoint.
///
/// ARCHITECTURAL RULE: handlers never call the completions API directly.
/// They receive an `Arc<dyn TextGenerator>` through `AppState`.
///
/// `complete` never fails. Upstream problems (missing key, transport error,
/// timeout, non-2xx status) are logged and replaced with fallback text.
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, error, info, warn};

use crate::config::{optional_env, Config, API_KEY_ENV};

pub mod prompts;

const TEMPERATURE: f32 = 0.7;
const MAX_TOKENS: u32 = 1000;
const REQUEST_TIMEOUT: Duration = Duration::from_secs(45);
/// Characters of the prompt echoed back in fallback text.
const FALLBACK_ECHO_CHARS: usize = 150;
/// Characters of the prompt written to the log for each call.
const LOG_ECHO_CHARS: usize = 100;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("DEEPSEEK_API_KEY is not configured")]
    MissingCredential,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("LLM returned no choices")]
    EmptyContent,
}

/// Where a completion's text came from. Logged, never sent to clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionSource {
    Model,
    Fallback,
}

/// Text produced by a `TextGenerator`. Callers treat both sources as valid output.
#[derive(Debug, Clone)]
pub struct Completion {
    pub text: String,
    pub source: CompletionSource,
}

impl Completion {
    fn model(text: String) -> Self {
        Self {
            text,
            source: CompletionSource::Model,
        }
    }

    fn fallback(prompt: &str) -> Self {
        Self {
            text: fallback_text(prompt),
            source: CompletionSource::Fallback,
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.source == CompletionSource::Fallback
    }
}

/// Capability injected into handlers: turn a prompt into text, infallibly.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn complete(&self, prompt: &str) -> Completion;
}

/// Deterministic text returned whenever the upstream call cannot be made.
pub fn fallback_text(prompt: &str) -> String {
    format!(
        "Professional response (fallback): {}... [Note: Check API key in .env file]",
        truncate_chars(prompt, FALLBACK_ECHO_CHARS)
    )
}

/// Returns at most `max` characters of `text` without splitting a code point.
pub fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
    stream: bool,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: String,
}

/// Chat-completions client for the DeepSeek API.
///
/// The credential is looked up in the environment at call time, so a key
/// added or rotated after startup is picked up without a restart. The value
/// seen at startup is used when the variable is unset.
#[derive(Clone)]
pub struct DeepSeekClient {
    client: Client,
    key_env: &'static str,
    api_key: Option<String>,
    api_url: String,
    model: String,
}

impl DeepSeekClient {
    pub fn new(config: &Config) -> Result<Self, LlmError> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            client,
            key_env: API_KEY_ENV,
            api_key: config.deepseek_api_key.clone(),
            api_url: config.deepseek_api_url.clone(),
            model: config.deepseek_model.clone(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn has_credential(&self) -> bool {
        self.resolve_api_key().is_some()
    }

    fn resolve_api_key(&self) -> Option<String> {
        optional_env(self.key_env).or_else(|| self.api_key.clone())
    }

    /// Makes one call to the completions endpoint. No retries.
    async fn call(&self, prompt: &str) -> Result<String, LlmError> {
        let api_key = self.resolve_api_key().ok_or(LlmError::MissingCredential)?;

        let request_body = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
            stream: false,
        };

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&api_key)
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let chat: ChatResponse = response.json().await?;
        chat.choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or(LlmError::EmptyContent)
    }
}

#[async_trait]
impl TextGenerator for DeepSeekClient {
    async fn complete(&self, prompt: &str) -> Completion {
        info!(
            "Completion requested: {}...",
            truncate_chars(prompt, LOG_ECHO_CHARS)
        );

        match self.call(prompt).await {
            Ok(text) => {
                debug!("Completion received ({} chars)", text.chars().count());
                Completion::model(text)
            }
            Err(LlmError::MissingCredential) => {
                error!("DEEPSEEK_API_KEY is missing; add it to the environment or .env file");
                Completion::fallback(prompt)
            }
            Err(LlmError::Api { status, message }) => {
                error!("Completions API returned {status}: {message}");
                Completion::fallback(prompt)
            }
            Err(e) => {
                error!("Completions API error: {e}");
                Completion::fallback(prompt)
            }
        }
    }
}

/// Degraded-mode generator used when the HTTP client cannot be constructed.
#[derive(Debug, Clone, Default)]
pub struct FallbackGenerator;

#[async_trait]
impl TextGenerator for FallbackGenerator {
    async fn complete(&self, prompt: &str) -> Completion {
        warn!("Fallback generator in use; returning placeholder completion");
        Completion::fallback(prompt)
    }
}
