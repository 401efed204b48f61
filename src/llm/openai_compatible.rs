// ABOUTME: OpenAI-compatible chat completion provider used for coaching analysis
// ABOUTME: Posts model, messages, and temperature to /chat/completions with bearer authentication
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # `OpenAI`-Compatible Provider
//!
//! Works with any endpoint implementing the `OpenAI` chat completions API.
//! The base URL is configurable so tests and self-hosted gateways can stand
//! in for the public endpoint.

use async_trait::async_trait;
use coach_core::constants::timeouts;
use coach_core::errors::{AppError, AppResult};
use coach_providers::http_client::{create_client_with_timeout, transport_error};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, instrument};

use super::{ChatMessage, ChatRequest, ChatResponse, LlmProvider, TokenUsage};
use crate::config::OpenAiConfig;

/// Characters of a non-JSON error body quoted in messages
const ERROR_BODY_PREVIEW_CHARS: usize = 200;

// ============================================================================
// API Request/Response Types (OpenAI-compatible format)
// ============================================================================

/// OpenAI-compatible API request structure
#[derive(Debug, Serialize)]
struct OpenAiRequest<'a> {
    model: &'a str,
    messages: Vec<OpenAiMessage<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

/// Message structure for OpenAI-compatible API
#[derive(Debug, Serialize)]
struct OpenAiMessage<'a> {
    role: &'static str,
    content: &'a str,
}

impl<'a> From<&'a ChatMessage> for OpenAiMessage<'a> {
    fn from(msg: &'a ChatMessage) -> Self {
        Self {
            role: msg.role.as_str(),
            content: &msg.content,
        }
    }
}

/// OpenAI-compatible API response structure
#[derive(Debug, Deserialize)]
struct OpenAiResponse {
    choices: Vec<OpenAiChoice>,
    #[serde(default)]
    usage: Option<OpenAiUsage>,
    #[serde(default)]
    model: Option<String>,
}

/// Choice in response
#[derive(Debug, Deserialize)]
struct OpenAiChoice {
    message: OpenAiResponseMessage,
    finish_reason: Option<String>,
}

/// Message in response
#[derive(Debug, Deserialize)]
struct OpenAiResponseMessage {
    content: Option<String>,
}

/// Usage statistics in response
#[derive(Debug, Deserialize)]
struct OpenAiUsage {
    #[serde(rename = "prompt_tokens")]
    prompt: u32,
    #[serde(rename = "completion_tokens")]
    completion: u32,
    #[serde(rename = "total_tokens")]
    total: u32,
}

/// Error response structure
#[derive(Debug, Deserialize)]
struct OpenAiErrorResponse {
    error: OpenAiErrorDetail,
}

/// Error detail structure
#[derive(Debug, Deserialize)]
struct OpenAiErrorDetail {
    message: String,
    #[serde(rename = "type")]
    error_type: Option<String>,
}

// ============================================================================
// Provider Configuration
// ============================================================================

/// Configuration for the `OpenAI`-compatible provider
#[derive(Clone)]
pub struct OpenAiCompatibleConfig {
    /// Base URL for the API (e.g., <https://api.openai.com/v1>)
    pub base_url: String,
    /// Bearer credential
    pub api_key: String,
    /// Model used when a request does not name one
    pub default_model: String,
    /// Per-request time bound in seconds
    pub request_timeout_secs: u64,
}

impl From<&OpenAiConfig> for OpenAiCompatibleConfig {
    fn from(config: &OpenAiConfig) -> Self {
        Self {
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
            default_model: config.model.clone(),
            request_timeout_secs: timeouts::CHAT_COMPLETION_SECS,
        }
    }
}

// ============================================================================
// Provider Implementation
// ============================================================================

/// Generic `OpenAI`-compatible LLM provider
pub struct OpenAiCompatibleProvider {
    client: Client,
    config: OpenAiCompatibleConfig,
}

impl OpenAiCompatibleProvider {
    /// Create a new provider with the given configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(config: OpenAiCompatibleConfig) -> AppResult<Self> {
        let client =
            create_client_with_timeout(config.request_timeout_secs, timeouts::CONNECT_SECS)?;
        Ok(Self { client, config })
    }

    /// Create a provider from the chat endpoint settings
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn from_config(config: &OpenAiConfig) -> AppResult<Self> {
        Self::new(OpenAiCompatibleConfig::from(config))
    }

    /// Build the API URL for a given endpoint
    fn api_url(&self, endpoint: &str) -> String {
        format!("{}/{endpoint}", self.config.base_url.trim_end_matches('/'))
    }

    /// Parse error response from API
    fn parse_error_response(status: StatusCode, body: &str) -> AppError {
        serde_json::from_str::<OpenAiErrorResponse>(body).map_or_else(
            |_| {
                AppError::generation(format!(
                    "Chat endpoint error ({status}): {}",
                    body.chars().take(ERROR_BODY_PREVIEW_CHARS).collect::<String>()
                ))
            },
            |error_response| {
                let error_type = error_response
                    .error
                    .error_type
                    .unwrap_or_else(|| "unknown".to_owned());
                AppError::generation(format!(
                    "Chat endpoint error ({status}, {error_type}): {}",
                    error_response.error.message
                ))
            },
        )
    }
}

#[async_trait]
impl LlmProvider for OpenAiCompatibleProvider {
    fn name(&self) -> &'static str {
        "openai"
    }

    fn default_model(&self) -> &str {
        &self.config.default_model
    }

    #[instrument(skip(self, request), fields(model = %request.model.as_deref().unwrap_or(&self.config.default_model)))]
    async fn complete(&self, request: &ChatRequest) -> AppResult<ChatResponse> {
        let model = request
            .model
            .as_deref()
            .unwrap_or(&self.config.default_model);

        let openai_request = OpenAiRequest {
            model,
            messages: request.messages.iter().map(OpenAiMessage::from).collect(),
            temperature: request.temperature,
        };
        debug!(
            messages = openai_request.messages.len(),
            "Sending chat completion request"
        );

        let response = self
            .client
            .post(self.api_url("chat/completions"))
            .bearer_auth(&self.config.api_key)
            .json(&openai_request)
            .send()
            .await
            .map_err(|e| {
                error!("Failed to send chat completion request: {e}");
                transport_error("Chat endpoint", e, AppError::generation)
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| transport_error("Chat endpoint", e, AppError::generation))?;

        if !status.is_success() {
            return Err(Self::parse_error_response(status, &body));
        }

        let openai_response: OpenAiResponse = serde_json::from_str(&body).map_err(|e| {
            error!("Failed to parse chat completion response: {e}");
            AppError::generation(format!("Failed to parse chat completion response: {e}"))
                .with_source(e)
        })?;

        let choice = openai_response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| AppError::generation("Chat endpoint returned no choices"))?;

        let content = choice.message.content.unwrap_or_default();
        debug!(
            chars = content.len(),
            finish_reason = ?choice.finish_reason,
            "Received chat completion"
        );

        Ok(ChatResponse {
            content,
            model: openai_response.model.unwrap_or_else(|| model.to_owned()),
            usage: openai_response.usage.map(|u| TokenUsage {
                prompt_tokens: u.prompt,
                completion_tokens: u.completion,
                total_tokens: u.total,
            }),
            finish_reason: choice.finish_reason,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use coach_core::errors::ErrorCode;

    #[test]
    fn test_request_body_shape() {
        let messages = [ChatMessage::system("coach"), ChatMessage::user("data")];
        let body = OpenAiRequest {
            model: "gpt-5",
            messages: messages.iter().map(OpenAiMessage::from).collect(),
            temperature: Some(1.0),
        };

        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "model": "gpt-5",
                "messages": [
                    {"role": "system", "content": "coach"},
                    {"role": "user", "content": "data"}
                ],
                "temperature": 1.0
            })
        );
    }

    #[test]
    fn test_error_response_is_generation_failure() {
        let structured = OpenAiCompatibleProvider::parse_error_response(
            StatusCode::TOO_MANY_REQUESTS,
            r#"{"error":{"message":"Rate limit reached","type":"requests"}}"#,
        );
        assert_eq!(structured.code, ErrorCode::GenerationFailed);
        assert!(structured.message.contains("Rate limit reached"));

        let plain =
            OpenAiCompatibleProvider::parse_error_response(StatusCode::BAD_GATEWAY, "upstream down");
        assert_eq!(plain.code, ErrorCode::GenerationFailed);
        assert!(plain.message.contains("upstream down"));
    }

    #[test]
    fn test_api_url_joins_base() {
        let provider = OpenAiCompatibleProvider::new(OpenAiCompatibleConfig {
            base_url: "http://localhost:9000/v1/".to_owned(),
            api_key: "key".to_owned(),
            default_model: "gpt-5".to_owned(),
            request_timeout_secs: 5,
        })
        .unwrap();
        assert_eq!(
            provider.api_url("chat/completions"),
            "http://localhost:9000/v1/chat/completions"
        );
    }
}
