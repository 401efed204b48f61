// ABOUTME: Strava OAuth token lifecycle: cached access token reuse and refresh exchange
// ABOUTME: Refreshes when the token is within the expiry margin and persists every new pair
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use async_trait::async_trait;
use chrono::Utc;
use coach_core::constants::oauth::GRANT_TYPE_REFRESH;
use coach_core::errors::{AppError, AppResult};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info, instrument, warn};

use super::config::StravaConfig;
use super::token_store::{TokenRecord, TokenStore};
use crate::http_client::{token_client, transport_error};

/// Maximum number of body characters quoted in auth error messages
const ERROR_BODY_PREVIEW_CHARS: usize = 200;

/// Exchange of a refresh token for a new token pair
#[async_trait]
pub trait TokenExchange: Send + Sync {
    /// Perform the refresh exchange
    ///
    /// # Errors
    ///
    /// Returns `AuthFailed` if the exchange is rejected or malformed, and
    /// `Timeout` if the authorization server does not answer in time.
    async fn refresh(&self, refresh_token: &str) -> AppResult<TokenRecord>;
}

/// Strava token endpoint response
#[derive(Debug, Deserialize)]
struct RefreshResponse {
    access_token: String,
    refresh_token: String,
    expires_at: i64,
}

/// Refresh exchange against the Strava authorization server
pub struct StravaTokenExchange {
    client: Client,
    token_url: String,
    client_id: String,
    client_secret: String,
}

impl StravaTokenExchange {
    /// Create an exchange with the 30s token client
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(config: &StravaConfig) -> AppResult<Self> {
        Ok(Self::with_client(token_client()?, config))
    }

    /// Create an exchange over an existing HTTP client
    #[must_use]
    pub fn with_client(client: Client, config: &StravaConfig) -> Self {
        Self {
            client,
            token_url: config.token_url.clone(),
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
        }
    }
}

#[async_trait]
impl TokenExchange for StravaTokenExchange {
    #[instrument(skip_all, fields(token_url = %self.token_url))]
    async fn refresh(&self, refresh_token: &str) -> AppResult<TokenRecord> {
        info!("Refreshing Strava access token");

        let params = [
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.as_str()),
            ("grant_type", GRANT_TYPE_REFRESH),
            ("refresh_token", refresh_token),
        ];

        let response = self
            .client
            .post(&self.token_url)
            .form(&params)
            .send()
            .await
            .map_err(|e| transport_error("Strava token exchange", e, AppError::auth_failed))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| transport_error("Strava token exchange", e, AppError::auth_failed))?;

        if !status.is_success() {
            warn!(status = status.as_u16(), "Token refresh rejected");
            let preview: String = body.chars().take(ERROR_BODY_PREVIEW_CHARS).collect();
            return Err(AppError::auth_failed(format!(
                "Token refresh failed with status {status}: {preview}"
            )));
        }

        let parsed: RefreshResponse = serde_json::from_str(&body).map_err(|e| {
            AppError::auth_failed(format!("Malformed token refresh response: {e}")).with_source(e)
        })?;

        if parsed.access_token.is_empty() || parsed.refresh_token.is_empty() {
            return Err(AppError::auth_failed(
                "Token refresh response contained an empty token",
            ));
        }

        Ok(TokenRecord {
            access_token: parsed.access_token,
            refresh_token: parsed.refresh_token,
            expires_at: parsed.expires_at,
            obtained_at: Some(Utc::now().timestamp()),
        })
    }
}

/// Decides whether the cached access token is usable and refreshes it when not
pub struct TokenManager {
    store: TokenStore,
    exchange: Box<dyn TokenExchange>,
    fallback_refresh_token: Option<String>,
}

impl TokenManager {
    /// Create a manager over a store and an exchange implementation
    #[must_use]
    pub fn new(
        store: TokenStore,
        exchange: Box<dyn TokenExchange>,
        fallback_refresh_token: Option<String>,
    ) -> Self {
        Self {
            store,
            exchange,
            fallback_refresh_token: fallback_refresh_token.filter(|token| !token.is_empty()),
        }
    }

    /// Manager using the Strava token endpoint from configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn for_strava(store: TokenStore, config: &StravaConfig) -> AppResult<Self> {
        let exchange = StravaTokenExchange::new(config)?;
        Ok(Self::new(
            store,
            Box::new(exchange),
            config.fallback_refresh_token.clone(),
        ))
    }

    /// Token store backing this manager
    #[must_use]
    pub const fn store(&self) -> &TokenStore {
        &self.store
    }

    /// Return a usable access token, refreshing it first if needed
    ///
    /// # Errors
    ///
    /// Returns `ConfigMissing` if there is neither a token file nor a fallback
    /// refresh token, `AuthFailed` if the exchange fails, or a storage error
    /// if the token file cannot be read or written.
    pub async fn valid_access_token(&self) -> AppResult<String> {
        let now = Utc::now().timestamp();
        match self.store.load()? {
            Some(record) if !record.needs_refresh(now) => {
                debug!(expires_at = record.expires_at, "Using cached access token");
                Ok(record.access_token)
            }
            Some(record) => {
                info!(
                    expires_at = record.expires_at,
                    "Access token expired or about to expire"
                );
                self.refresh_with(&record.refresh_token).await
            }
            None => {
                let refresh_token = self.fallback_refresh_token()?;
                info!("No token file found, bootstrapping from configured refresh token");
                self.refresh_with(&refresh_token).await
            }
        }
    }

    /// Refresh unconditionally, bypassing the expiry check
    ///
    /// # Errors
    ///
    /// Same as [`Self::valid_access_token`].
    pub async fn force_refresh(&self) -> AppResult<String> {
        let refresh_token = match self.store.load()? {
            Some(record) => record.refresh_token,
            None => self.fallback_refresh_token()?,
        };
        self.refresh_with(&refresh_token).await
    }

    async fn refresh_with(&self, refresh_token: &str) -> AppResult<String> {
        let record = self.exchange.refresh(refresh_token).await?;
        // the previous refresh token is dead from here on, persist before use
        self.store.save(&record)?;
        info!(expires_at = record.expires_at, "Stored refreshed token pair");
        Ok(record.access_token)
    }

    fn fallback_refresh_token(&self) -> AppResult<String> {
        self.fallback_refresh_token.clone().ok_or_else(|| {
            AppError::config_missing(format!(
                "No token file at {} and STRAVA_REFRESH_TOKEN is not set; run the authorization bootstrap first",
                self.store.path().display()
            ))
        })
    }
}
