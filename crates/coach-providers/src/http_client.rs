// ABOUTME: HTTP client construction with bounded per-request timeouts
// ABOUTME: Separate clients for token exchange and data API calls, plus transport error mapping
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use coach_core::constants::timeouts;
use coach_core::errors::{AppError, AppResult};
use reqwest::{Client, ClientBuilder};
use std::time::Duration;

/// Create a new HTTP client with custom timeout settings
///
/// # Errors
///
/// Returns `InternalError` if the TLS backend cannot be initialized.
pub fn create_client_with_timeout(timeout_secs: u64, connect_timeout_secs: u64) -> AppResult<Client> {
    ClientBuilder::new()
        .timeout(Duration::from_secs(timeout_secs))
        .connect_timeout(Duration::from_secs(connect_timeout_secs))
        .build()
        .map_err(|e| AppError::internal(format!("Failed to create HTTP client: {e}")).with_source(e))
}

/// Client for OAuth token exchanges (30s bound)
///
/// # Errors
///
/// Returns `InternalError` if the client cannot be built.
pub fn token_client() -> AppResult<Client> {
    create_client_with_timeout(timeouts::TOKEN_EXCHANGE_SECS, timeouts::CONNECT_SECS)
}

/// Client for fitness data API calls (60s bound)
///
/// # Errors
///
/// Returns `InternalError` if the client cannot be built.
pub fn data_api_client() -> AppResult<Client> {
    create_client_with_timeout(timeouts::DATA_API_SECS, timeouts::CONNECT_SECS)
}

/// Map a transport-level failure, surfacing exceeded bounds as `Timeout`
///
/// Non-timeout failures are handed to `otherwise` so each caller keeps its
/// own error class.
pub fn transport_error(
    service: &str,
    error: reqwest::Error,
    otherwise: impl FnOnce(String) -> AppError,
) -> AppError {
    if error.is_timeout() {
        AppError::timeout(service, format!("request exceeded its time bound: {error}"))
            .with_source(error)
    } else {
        otherwise(format!("{service} request failed: {error}")).with_source(error)
    }
}
