// ABOUTME: LLM provider abstraction and the analysis client used by the coaching drivers
// ABOUTME: Role-based chat messages, a provider trait for chat completion, and trimmed text generation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # LLM Provider Interface
//!
//! The drivers never talk to a chat endpoint directly. They hand a message
//! pair to [`AnalysisClient::generate`], which forwards it to an
//! [`LlmProvider`] implementation with the configured model and temperature.
//!
//! ## Example
//!
//! ```rust,no_run
//! use strava_coach::llm::{AnalysisClient, ChatMessage, OpenAiCompatibleProvider};
//! use strava_coach::config::CoachConfig;
//! use coach_core::errors::AppResult;
//!
//! async fn example(config: &CoachConfig) -> AppResult<String> {
//!     let provider = OpenAiCompatibleProvider::from_config(&config.openai)?;
//!     let client = AnalysisClient::new(Box::new(provider), &config.openai.model, 1.0);
//!     client
//!         .generate(&[
//!             ChatMessage::system("You are an experienced running coach."),
//!             ChatMessage::user("Analyze this session."),
//!         ])
//!         .await
//! }
//! ```

mod openai_compatible;
pub mod prompts;

pub use openai_compatible::{OpenAiCompatibleConfig, OpenAiCompatibleProvider};
pub use prompts::PromptBuilder;

use async_trait::async_trait;
use coach_core::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

// ============================================================================
// Message Types
// ============================================================================

/// Role of a message in the conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// System instruction message
    System,
    /// User input message
    User,
}

impl MessageRole {
    /// Convert to string representation for API calls
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::System => "system",
            Self::User => "user",
        }
    }
}

/// A single message in a chat conversation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Role of the message sender
    pub role: MessageRole,
    /// Content of the message
    pub content: String,
}

impl ChatMessage {
    /// Create a new chat message
    #[must_use]
    pub fn new(role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    /// Create a system message
    #[must_use]
    pub fn system(content: impl Into<String>) -> Self {
        Self::new(MessageRole::System, content)
    }

    /// Create a user message
    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(MessageRole::User, content)
    }
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Configuration for a chat completion request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    /// Conversation messages
    pub messages: Vec<ChatMessage>,
    /// Model identifier (provider-specific)
    pub model: Option<String>,
    /// Temperature for response randomness (0.0 - 2.0)
    pub temperature: Option<f32>,
}

impl ChatRequest {
    /// Create a new chat request with messages
    #[must_use]
    pub const fn new(messages: Vec<ChatMessage>) -> Self {
        Self {
            messages,
            model: None,
            temperature: None,
        }
    }

    /// Set the model to use
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Set the temperature
    #[must_use]
    pub const fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }
}

/// Response from a chat completion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    /// Generated message content
    pub content: String,
    /// Model used for generation
    pub model: String,
    /// Token usage statistics
    pub usage: Option<TokenUsage>,
    /// Finish reason (stop, length, etc.)
    pub finish_reason: Option<String>,
}

/// Token usage statistics
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TokenUsage {
    /// Number of tokens in the prompt
    pub prompt_tokens: u32,
    /// Number of tokens in the completion
    pub completion_tokens: u32,
    /// Total tokens used
    pub total_tokens: u32,
}

// ============================================================================
// Provider Trait
// ============================================================================

/// LLM provider trait for chat completion
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Unique provider identifier (e.g., "openai")
    fn name(&self) -> &'static str;

    /// Default model to use if not specified in request
    fn default_model(&self) -> &str;

    /// Perform a chat completion
    ///
    /// # Errors
    ///
    /// Returns `GenerationFailed` if the endpoint rejects the request or
    /// answers with an unusable body, and `Timeout` if it does not answer
    /// within its bound.
    async fn complete(&self, request: &ChatRequest) -> AppResult<ChatResponse>;
}

// ============================================================================
// Analysis Client
// ============================================================================

/// Sends prompts to the chat endpoint and returns the trimmed analysis text
///
/// No retries: one failed call fails the run.
pub struct AnalysisClient {
    provider: Box<dyn LlmProvider>,
    model: String,
    temperature: f32,
}

impl AnalysisClient {
    /// Create a client over a provider with fixed model and temperature
    #[must_use]
    pub fn new(provider: Box<dyn LlmProvider>, model: impl Into<String>, temperature: f32) -> Self {
        Self {
            provider,
            model: model.into(),
            temperature,
        }
    }

    /// Generate analysis text for a message sequence
    ///
    /// # Errors
    ///
    /// Propagates provider errors and returns `GenerationFailed` when the
    /// completion contains no text.
    #[instrument(skip(self, messages), fields(provider = self.provider.name(), model = %self.model))]
    pub async fn generate(&self, messages: &[ChatMessage]) -> AppResult<String> {
        let request = ChatRequest::new(messages.to_vec())
            .with_model(&self.model)
            .with_temperature(self.temperature);

        let response = self.provider.complete(&request).await?;
        let text = response.content.trim();
        if text.is_empty() {
            return Err(AppError::generation(format!(
                "{} returned an empty completion",
                self.provider.name()
            )));
        }

        info!(
            chars = text.len(),
            finish_reason = response.finish_reason.as_deref().unwrap_or("unknown"),
            total_tokens = response.usage.map(|usage| usage.total_tokens),
            "Analysis generated"
        );
        Ok(text.to_owned())
    }
}
