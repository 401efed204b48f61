// ABOUTME: Unified error handling for the coaching pipeline with a small, fixed taxonomy
// ABOUTME: Maps configuration, auth, upstream, timeout, and generation failures to one AppError
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Unified Error Handling
//!
//! Every fallible operation in the workspace returns [`AppResult`]. The
//! [`ErrorCode`] carried by an [`AppError`] identifies which failure class
//! occurred, so drivers can decide whether a failure is fatal for the run or
//! can be downgraded (laps and streams retrieval).

use serde::{Deserialize, Serialize};
use std::error::Error as StdError;
use std::fmt;
use std::io;
use thiserror::Error;

/// Standard error codes used throughout the coaching pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorCode {
    // Configuration
    /// A required credential or setting is absent
    #[serde(rename = "CONFIG_MISSING")]
    ConfigMissing,
    /// A setting is present but unusable
    #[serde(rename = "CONFIG_INVALID")]
    ConfigInvalid,

    // Authorization server
    /// The refresh exchange failed or returned malformed data
    #[serde(rename = "AUTH_FAILED")]
    AuthFailed,

    // Fitness data API
    /// Non-2xx response after the retry budget was spent, or no response at all
    #[serde(rename = "UPSTREAM_ERROR")]
    Upstream,

    // Any network call
    /// Request exceeded its time bound
    #[serde(rename = "TIMEOUT")]
    Timeout,

    // Chat completion endpoint
    /// Chat endpoint failed or produced no usable text
    #[serde(rename = "GENERATION_FAILED")]
    GenerationFailed,

    // Local resources
    /// File system operation failed
    #[serde(rename = "STORAGE_ERROR")]
    StorageError,
    /// JSON could not be encoded or decoded
    #[serde(rename = "SERIALIZATION_ERROR")]
    SerializationError,
    /// Unexpected internal failure
    #[serde(rename = "INTERNAL_ERROR")]
    InternalError,
}

impl ErrorCode {
    /// Get a user-friendly description of this error
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::ConfigMissing => "Required configuration is missing",
            Self::ConfigInvalid => "Configuration is invalid",
            Self::AuthFailed => "Token refresh with the authorization server failed",
            Self::Upstream => "The fitness data API returned an error",
            Self::Timeout => "A network request timed out",
            Self::GenerationFailed => "Analysis generation failed",
            Self::StorageError => "Storage operation failed",
            Self::SerializationError => "Data serialization/deserialization failed",
            Self::InternalError => "An internal error occurred",
        }
    }

    /// Whether this code belongs to the configuration class
    #[must_use]
    pub const fn is_configuration(&self) -> bool {
        matches!(self, Self::ConfigMissing | Self::ConfigInvalid)
    }
}

/// Status and body of a rejected upstream response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpstreamResponse {
    /// HTTP status code
    pub status: u16,
    /// Raw response body
    pub body: String,
}

/// Unified error type for the coaching pipeline
#[derive(Debug, Error)]
#[error("{}: {}", .code.description(), .message)]
pub struct AppError {
    /// Error code
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Upstream response details for `Upstream` errors
    pub upstream: Option<UpstreamResponse>,
    /// Source error for error chaining
    #[source]
    pub source: Option<Box<dyn StdError + Send + Sync>>,
}

impl AppError {
    /// Create a new `AppError` with the given code and message
    #[must_use]
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            upstream: None,
            source: None,
        }
    }

    /// Add a source error for error chaining
    #[must_use]
    pub fn with_source(mut self, source: impl StdError + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Required configuration value is absent
    #[must_use]
    pub fn config_missing(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigMissing, message)
    }

    /// Configuration value is present but unusable
    #[must_use]
    pub fn config_invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigInvalid, message)
    }

    /// Refresh exchange failed
    #[must_use]
    pub fn auth_failed(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::AuthFailed, message)
    }

    /// Upstream returned a non-2xx status
    #[must_use]
    pub fn upstream(path: &str, status: u16, body: impl Into<String>) -> Self {
        let body = body.into();
        Self {
            code: ErrorCode::Upstream,
            message: format!("GET {path} returned status {status}"),
            upstream: Some(UpstreamResponse { status, body }),
            source: None,
        }
    }

    /// Upstream could not be reached (no HTTP status available)
    #[must_use]
    pub fn upstream_unreachable(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Upstream, message)
    }

    /// Network call exceeded its bound
    #[must_use]
    pub fn timeout(service: &str, message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Timeout, format!("{service}: {}", message.into()))
    }

    /// Chat endpoint failure
    #[must_use]
    pub fn generation(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::GenerationFailed, message)
    }

    /// File system failure
    #[must_use]
    pub fn storage(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::StorageError, message)
    }

    /// JSON encode/decode failure
    #[must_use]
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::SerializationError, message)
    }

    /// Internal error
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }

    /// Status of the rejected upstream response, if any
    #[must_use]
    pub fn upstream_status(&self) -> Option<u16> {
        self.upstream.as_ref().map(|response| response.status)
    }

    /// Whether this error reports an exceeded time bound
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        self.code == ErrorCode::Timeout
    }
}

impl fmt::Display for UpstreamResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.status, self.body)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(error: serde_json::Error) -> Self {
        Self::serialization(error.to_string()).with_source(error)
    }
}

impl From<io::Error> for AppError {
    fn from(error: io::Error) -> Self {
        Self::storage(error.to_string()).with_source(error)
    }
}

/// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;
