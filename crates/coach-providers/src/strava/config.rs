// ABOUTME: Configuration for Strava API integration
// ABOUTME: Client credentials, endpoint URLs, and the optional fallback refresh token
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use coach_core::constants::strava;
use std::fmt;

/// Configuration for Strava API integration
#[derive(Clone)]
pub struct StravaConfig {
    /// OAuth client ID
    pub client_id: String,
    /// OAuth client secret
    pub client_secret: String,
    /// Data API base URL
    pub api_base_url: String,
    /// Token endpoint URL
    pub token_url: String,
    /// Refresh token used only when no token file exists yet
    pub fallback_refresh_token: Option<String>,
}

impl StravaConfig {
    /// Configuration against the public Strava endpoints
    #[must_use]
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            api_base_url: strava::API_BASE.to_owned(),
            token_url: strava::TOKEN_URL.to_owned(),
            fallback_refresh_token: None,
        }
    }
}

impl fmt::Debug for StravaConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StravaConfig")
            .field("client_id", &self.client_id)
            .field("client_secret", &"[REDACTED]")
            .field("api_base_url", &self.api_base_url)
            .field("token_url", &self.token_url)
            .field(
                "fallback_refresh_token",
                &self.fallback_refresh_token.as_ref().map(|_| "[REDACTED]"),
            )
            .finish()
    }
}
