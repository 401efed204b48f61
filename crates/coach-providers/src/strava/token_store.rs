// ABOUTME: Durable on-disk record of the current Strava access/refresh token pair
// ABOUTME: Loads the token file if present and replaces it wholesale on every refresh
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use coach_core::constants::oauth::REFRESH_MARGIN_SECS;
use coach_core::errors::AppResult;
use coach_core::storage::{read_json, write_json_atomic};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Current OAuth token pair with expiry bookkeeping
///
/// `refresh_token` is always the most recently issued one; the previous value
/// is invalid as soon as a refresh succeeds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenRecord {
    /// Short-lived bearer credential
    pub access_token: String,
    /// Credential used to mint the next access token
    pub refresh_token: String,
    /// Unix timestamp when `access_token` expires
    pub expires_at: i64,
    /// Unix timestamp when the pair was obtained
    #[serde(default)]
    pub obtained_at: Option<i64>,
}

impl TokenRecord {
    /// Whether the access token is expired or expires within the safety margin
    #[must_use]
    pub const fn needs_refresh(&self, now: i64) -> bool {
        self.expires_at <= now + REFRESH_MARGIN_SECS
    }
}

/// File-backed token store
#[derive(Debug, Clone)]
pub struct TokenStore {
    path: PathBuf,
}

impl TokenStore {
    /// Store backed by the given file
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the token file
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the record, `None` if no token file exists
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(&self) -> AppResult<Option<TokenRecord>> {
        read_json(&self.path)
    }

    /// Replace the stored record
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save(&self, record: &TokenRecord) -> AppResult<()> {
        write_json_atomic(&self.path, record)?;
        debug!(path = %self.path.display(), expires_at = record.expires_at, "Token record saved");
        Ok(())
    }
}
