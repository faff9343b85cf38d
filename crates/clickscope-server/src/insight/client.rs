//! OpenAI-compatible chat-completions client.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use clickscope_core::config::Config;

/// Why a generation call produced no text.
///
/// `Display` is the user-visible fallback string returned in place of an insight.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    #[error("Error calling AI API: request timed out after {0}s")]
    Timeout(u64),

    #[error("Error calling AI API: {0}")]
    Transport(String),

    #[error("Error calling AI API: HTTP {0}")]
    Status(u16),

    #[error("AI returned an unexpected response format.")]
    MalformedBody,

    #[error("AI returned an empty response.")]
    EmptyContent,
}

/// Turns a prompt into generated text.
#[async_trait]
pub trait TextGenerator: Send + Sync + 'static {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError>;
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 1],
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    #[serde(default)]
    message: Option<ChatChoiceMessage>,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Extract the first choice's message content from a response body.
///
/// Unparseable bodies and bodies without choices are `MalformedBody`; a choice
/// with missing or blank content is `EmptyContent`.
pub fn parse_completion(body: &[u8]) -> Result<String, GenerationError> {
    let parsed: ChatResponse =
        serde_json::from_slice(body).map_err(|_| GenerationError::MalformedBody)?;
    let choice = parsed
        .choices
        .into_iter()
        .next()
        .ok_or(GenerationError::MalformedBody)?;
    choice
        .message
        .and_then(|m| m.content)
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty())
        .ok_or(GenerationError::EmptyContent)
}

/// [`TextGenerator`] backed by an HTTP chat-completions endpoint
/// (OpenRouter by default).
pub struct ChatCompletionsClient {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
    model: String,
    timeout_secs: u64,
}

impl ChatCompletionsClient {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let timeout = config.ai_timeout();
        let client = reqwest::Client::builder()
            .connect_timeout(timeout.min(Duration::from_secs(3)))
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::none())
            .build()?;
        Ok(Self {
            client,
            endpoint: config.ai_api_url.trim().to_string(),
            api_key: config.ai_api_key.clone(),
            model: config.ai_model.clone(),
            timeout_secs: config.ai_timeout_secs,
        })
    }

    fn transport_error(&self, err: reqwest::Error) -> GenerationError {
        if err.is_timeout() {
            GenerationError::Timeout(self.timeout_secs)
        } else {
            GenerationError::Transport(err.to_string())
        }
    }
}

#[async_trait]
impl TextGenerator for ChatCompletionsClient {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        let body = ChatRequest {
            model: &self.model,
            messages: [ChatMessage {
                role: "user",
                content: prompt,
            }],
        };

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(GenerationError::Status(status.as_u16()));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| self.transport_error(e))?;
        parse_completion(&bytes)
    }
}
