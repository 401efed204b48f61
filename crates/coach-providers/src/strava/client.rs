// ABOUTME: Authenticated GET primitive for the Strava data API
// ABOUTME: Bearer auth from the token manager with exactly one forced refresh and retry on 401
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use coach_core::errors::{AppError, AppResult};
use reqwest::{Client, Response, StatusCode};
use serde_json::Value;
use tracing::{debug, info, instrument, warn};

use super::config::StravaConfig;
use super::token_manager::TokenManager;
use crate::http_client::{data_api_client, transport_error};

const SERVICE: &str = "Strava API";

/// Authenticated client for the fitness data API
pub struct AuthenticatedClient {
    http: Client,
    api_base_url: String,
    tokens: TokenManager,
}

impl AuthenticatedClient {
    /// Create a client over an existing HTTP client and token manager
    #[must_use]
    pub fn new(http: Client, api_base_url: impl Into<String>, tokens: TokenManager) -> Self {
        Self {
            http,
            api_base_url: api_base_url.into(),
            tokens,
        }
    }

    /// Client with the 60s data API bound
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn for_strava(config: &StravaConfig, tokens: TokenManager) -> AppResult<Self> {
        Ok(Self::new(data_api_client()?, &config.api_base_url, tokens))
    }

    /// GET a resource and parse its JSON body
    ///
    /// A 401 triggers one forced token refresh and one retry; any other
    /// non-2xx status, or a second 401, is returned as `Upstream`.
    ///
    /// # Errors
    ///
    /// Returns `Upstream` for rejected requests, `Timeout` when the
    /// request exceeds its bound, `SerializationError` for a non-JSON body,
    /// and any token manager error.
    #[instrument(skip(self, query), fields(path = %path))]
    pub async fn get_json(&self, path: &str, query: &[(&str, String)]) -> AppResult<Value> {
        let access_token = self.tokens.valid_access_token().await?;
        let mut response = self.send(path, query, &access_token).await?;

        if response.status() == StatusCode::UNAUTHORIZED {
            warn!("Access token rejected, forcing one refresh and retrying");
            let refreshed = self.tokens.force_refresh().await?;
            response = self.send(path, query, &refreshed).await?;
        }

        Self::parse_response(path, response).await
    }

    async fn send(&self, path: &str, query: &[(&str, String)], token: &str) -> AppResult<Response> {
        let url = self.url(path);
        debug!(%url, "Sending authenticated GET");
        let response = self
            .http
            .get(&url)
            .bearer_auth(token)
            .query(query)
            .send()
            .await
            .map_err(|e| transport_error(SERVICE, e, AppError::upstream_unreachable))?;
        info!(status = response.status().as_u16(), "Received {SERVICE} response");
        Ok(response)
    }

    async fn parse_response(path: &str, response: Response) -> AppResult<Value> {
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| transport_error(SERVICE, e, AppError::upstream_unreachable))?;

        if !status.is_success() {
            return Err(AppError::upstream(path, status.as_u16(), body));
        }

        serde_json::from_str(&body).map_err(|e| {
            AppError::serialization(format!("{SERVICE} returned invalid JSON for {path}"))
                .with_source(e)
        })
    }

    fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.api_base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}
