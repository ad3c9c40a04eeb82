use axum::http::StatusCode;
use serde_json::{json, Value};
use thiserror::Error;

use super::envelope::Envelope;

pub const MODEL: &str = "openai/gpt-3.5-turbo";

const REFERER: &str = "http://localhost:3000";
const TITLE: &str = "AI Float Assistant";

/// How an upstream call can go wrong, and what the relay tells the widget
/// about it. Display strings are the exact texts the widget renders.
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("Invalid OpenRouter API key or permission denied.")]
    PermissionDenied,
    #[error("Rate limit exceeded. Please try again later.")]
    RateLimited,
    #[error("Invalid response from OpenRouter API")]
    MalformedReply,
    #[error("Failed to get response from AI assistant.")]
    Failed { details: Option<String> },
}

impl UpstreamError {
    pub fn status(&self) -> StatusCode {
        match self {
            UpstreamError::PermissionDenied => StatusCode::UNAUTHORIZED,
            UpstreamError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            UpstreamError::MalformedReply | UpstreamError::Failed { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn into_envelope(self) -> Envelope {
        let details = match &self {
            UpstreamError::Failed { details } => details.clone(),
            _ => None,
        };
        Envelope::Failure {
            error: self.to_string(),
            details,
        }
    }
}

/// First choice of an upstream completion, plus whatever usage metadata the
/// provider reported.
#[derive(Debug, Clone)]
pub struct ChatReply {
    pub message: String,
    pub usage: Value,
}

/// Thin client for the OpenAI-compatible completions endpoint. One request
/// per chat turn, no retry, no timeout.
pub struct UpstreamClient {
    http: reqwest::Client,
    url: String,
    api_key: String,
}

impl UpstreamClient {
    pub fn new(url: &str, api_key: &str) -> UpstreamClient {
        UpstreamClient {
            http: reqwest::Client::new(),
            url: url.to_string(),
            api_key: api_key.to_string(),
        }
    }

    /// Forwards the conversation verbatim and unwraps the first choice.
    pub async fn chat(&self, messages: &[Value]) -> Result<ChatReply, UpstreamError> {
        let response = self
            .http
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .header("HTTP-Referer", REFERER)
            .header("X-Title", TITLE)
            .json(&json!({ "model": MODEL, "messages": messages }))
            .send()
            .await
            .map_err(|err| {
                tracing::error!("upstream request failed: {err}");
                UpstreamError::Failed {
                    details: Some(err.to_string()),
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body: Value = response.json().await.unwrap_or_default();
            tracing::error!(%status, %body, "upstream returned an error");
            return Err(match status.as_u16() {
                400 | 401 | 403 => UpstreamError::PermissionDenied,
                429 => UpstreamError::RateLimited,
                _ => UpstreamError::Failed {
                    details: body
                        .pointer("/error/message")
                        .and_then(Value::as_str)
                        .map(str::to_string),
                },
            });
        }

        let body: Value = response.json().await.map_err(|err| {
            tracing::error!("undecodable upstream body: {err}");
            UpstreamError::MalformedReply
        })?;
        let message = body
            .pointer("/choices/0/message/content")
            .and_then(Value::as_str)
            .ok_or_else(|| {
                tracing::error!(%body, "upstream reply missing choices");
                UpstreamError::MalformedReply
            })?
            .to_string();
        let usage = body.get("usage").cloned().unwrap_or_else(|| json!({}));

        Ok(ChatReply { message, usage })
    }
}
