//! Chat-completion transport.
//!
//! The proposal loop only needs "send these two messages, get text back";
//! [`CompletionClient`] is that seam. [`OpenRouterClient`] is the HTTP
//! implementation against an OpenRouter-compatible `/chat/completions`.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

use crate::errors::CompletionError;

pub const DEFAULT_BASE_URL: &str = "https://openrouter.ai/api/v1";
pub const APP_TITLE: &str = "Plum Arena";
const ERROR_BODY_EXCERPT: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplingParams {
    pub max_tokens: u32,
    pub temperature: f32,
    pub top_p: f32,
}

impl Default for SamplingParams {
    fn default() -> Self {
        Self {
            max_tokens: 32_000,
            temperature: 0.5,
            top_p: 0.8,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CompletionRequest {
    pub model: String,
    pub system: String,
    pub prompt: String,
    pub sampling: SamplingParams,
    pub timeout: Duration,
}

#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Reply text of the first choice; empty when the model returned none.
    async fn complete(&self, request: &CompletionRequest) -> Result<String, CompletionError>;
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct ChatBody<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    max_tokens: u32,
    temperature: f32,
    top_p: f32,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: Option<ChatReply>,
}

#[derive(Deserialize)]
struct ChatReply {
    content: Option<String>,
}

pub struct OpenRouterClient {
    http: Client,
    base_url: String,
    api_key: String,
}

impl OpenRouterClient {
    pub fn new(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_owned(),
            api_key: api_key.into(),
        }
    }
}

#[async_trait]
impl CompletionClient for OpenRouterClient {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, CompletionError> {
        let body = ChatBody {
            model: &request.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: &request.system,
                },
                ChatMessage {
                    role: "user",
                    content: &request.prompt,
                },
            ],
            max_tokens: request.sampling.max_tokens,
            temperature: request.sampling.temperature,
            top_p: request.sampling.top_p,
        };

        let response = self
            .http
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .header("X-Title", APP_TITLE)
            .timeout(request.timeout)
            .json(&body)
            .send()
            .await
            .map_err(|e| transport_error(e, request.timeout))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(status_error(status, &text));
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| transport_error(e, request.timeout))?;
        Ok(first_choice_text(parsed))
    }
}

fn first_choice_text(response: ChatResponse) -> String {
    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message)
        .and_then(|message| message.content)
        .unwrap_or_default()
}

fn transport_error(err: reqwest::Error, timeout: Duration) -> CompletionError {
    if err.is_timeout() {
        CompletionError::Timeout(timeout)
    } else if err.is_decode() {
        CompletionError::MalformedResponse(err.to_string())
    } else {
        CompletionError::Transport(err.to_string())
    }
}

pub(crate) fn status_error(status: StatusCode, body: &str) -> CompletionError {
    match status.as_u16() {
        401 => CompletionError::Unauthorized,
        402 => CompletionError::InsufficientCredits,
        429 => CompletionError::RateLimited,
        code if code >= 500 => CompletionError::Server { status: code },
        code => CompletionError::Status {
            status: code,
            body: excerpt(body, ERROR_BODY_EXCERPT),
        },
    }
}

/// At most `limit` characters, cut on a char boundary.
pub(crate) fn excerpt(text: &str, limit: usize) -> String {
    text.chars().take(limit).collect()
}

#[cfg(test)]
mod tests {
    use super::{excerpt, first_choice_text, status_error, ChatResponse};
    use crate::errors::CompletionError;
    use reqwest::StatusCode;

    #[test]
    fn statuses_map_to_reasons() {
        assert!(matches!(
            status_error(StatusCode::UNAUTHORIZED, ""),
            CompletionError::Unauthorized
        ));
        assert!(matches!(
            status_error(StatusCode::PAYMENT_REQUIRED, ""),
            CompletionError::InsufficientCredits
        ));
        assert!(matches!(
            status_error(StatusCode::TOO_MANY_REQUESTS, ""),
            CompletionError::RateLimited
        ));
        assert!(matches!(
            status_error(StatusCode::BAD_GATEWAY, ""),
            CompletionError::Server { status: 502 }
        ));

        let long_body = "x".repeat(300);
        match status_error(StatusCode::BAD_REQUEST, &long_body) {
            CompletionError::Status { status, body } => {
                assert_eq!(status, 400);
                assert_eq!(body.len(), 100);
            }
            other => panic!("unexpected mapping: {other:?}"),
        }
    }

    #[test]
    fn reply_text_comes_from_first_choice() {
        let parsed: ChatResponse = serde_json::from_str(
            r#"{"choices":[{"message":{"role":"assistant","content":"from:e2 to:e4"}},{"message":{"content":"x"}}]}"#,
        )
        .expect("response should deserialize");
        assert_eq!(first_choice_text(parsed), "from:e2 to:e4");
    }

    #[test]
    fn missing_content_is_empty_text() {
        for raw in [
            r#"{"choices":[]}"#,
            r#"{}"#,
            r#"{"choices":[{"message":{"content":null}}]}"#,
            r#"{"choices":[{"finish_reason":"length"}]}"#,
        ] {
            let parsed: ChatResponse =
                serde_json::from_str(raw).expect("response should deserialize");
            assert_eq!(first_choice_text(parsed), "", "raw: {raw}");
        }
    }

    #[test]
    fn excerpt_respects_char_boundaries() {
        assert_eq!(excerpt("♜♞♝", 2), "♜♞");
        assert_eq!(excerpt("ok", 10), "ok");
    }
}
