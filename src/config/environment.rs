// ABOUTME: Environment configuration for the daily and weekly coaching runs
// ABOUTME: Builds one CoachConfig from process variables with defaults for every optional setting
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Environment-based configuration, built once per process and passed into
//! every component constructor.

use coach_core::constants::{env_vars, files, llm, strava};
use coach_core::errors::{AppError, AppResult};
use coach_providers::strava::StravaConfig;
use std::env;
use std::fmt;
use std::path::PathBuf;
use tracing::info;

/// Default directory for the token and state files
const DEFAULT_DATA_DIR: &str = "data";

/// Default root for the `daily/` and `weekly/` output directories
const DEFAULT_OUTPUT_DIR: &str = ".";

/// Chat completion endpoint settings
#[derive(Clone)]
pub struct OpenAiConfig {
    /// Bearer credential for the chat endpoint
    pub api_key: String,
    /// Model name sent with every request
    pub model: String,
    /// Base URL, `/chat/completions` is appended
    pub base_url: String,
    /// Sampling temperature
    pub temperature: f32,
}

impl fmt::Debug for OpenAiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenAiConfig")
            .field("api_key", &"[REDACTED]")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("temperature", &self.temperature)
            .finish()
    }
}

/// Optional external prompt templates per mode
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PromptTemplateConfig {
    /// Template replacing the built-in daily instructions
    pub daily: Option<PathBuf>,
    /// Template replacing the built-in weekly instructions
    pub weekly: Option<PathBuf>,
}

/// Complete configuration for one coaching run
#[derive(Debug, Clone)]
pub struct CoachConfig {
    /// Strava credentials and endpoints
    pub strava: StravaConfig,
    /// Chat endpoint settings
    pub openai: OpenAiConfig,
    /// Directory holding the token and state files
    pub data_dir: PathBuf,
    /// Root directory for analysis artifacts
    pub output_dir: PathBuf,
    /// External prompt templates
    pub prompts: PromptTemplateConfig,
}

impl CoachConfig {
    /// Load configuration from the process environment
    ///
    /// # Errors
    ///
    /// Returns `ConfigMissing` if a required variable is absent or empty and
    /// `ConfigInvalid` if a value cannot be parsed.
    pub fn from_env() -> AppResult<Self> {
        info!("Loading configuration from environment variables");
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    ///
    /// # Errors
    ///
    /// Same as [`Self::from_env`].
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let require = |key: &str| {
            get(key).ok_or_else(|| AppError::config_missing(format!("{key} is not set")))
        };

        let mut strava_config = StravaConfig::new(
            require(env_vars::STRAVA_CLIENT_ID)?,
            require(env_vars::STRAVA_CLIENT_SECRET)?,
        );
        strava_config.api_base_url =
            get(env_vars::STRAVA_API_BASE).unwrap_or_else(|| strava::API_BASE.to_owned());
        strava_config.token_url =
            get(env_vars::STRAVA_TOKEN_URL).unwrap_or_else(|| strava::TOKEN_URL.to_owned());
        strava_config.fallback_refresh_token = get(env_vars::STRAVA_REFRESH_TOKEN);

        let openai = OpenAiConfig {
            api_key: require(env_vars::OPENAI_API_KEY)?,
            model: get(env_vars::OPENAI_MODEL).unwrap_or_else(|| llm::DEFAULT_MODEL.to_owned()),
            base_url: get(env_vars::OPENAI_BASE_URL)
                .unwrap_or_else(|| llm::OPENAI_BASE_URL.to_owned()),
            temperature: parse_temperature(get(env_vars::OPENAI_TEMPERATURE))?,
        };

        Ok(Self {
            strava: strava_config,
            openai,
            data_dir: get(env_vars::COACH_DATA_DIR)
                .map_or_else(|| PathBuf::from(DEFAULT_DATA_DIR), PathBuf::from),
            output_dir: get(env_vars::COACH_OUTPUT_DIR)
                .map_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR), PathBuf::from),
            prompts: PromptTemplateConfig {
                daily: get(env_vars::DAILY_PROMPT_FILE).map(PathBuf::from),
                weekly: get(env_vars::WEEKLY_PROMPT_FILE).map(PathBuf::from),
            },
        })
    }

    /// Path of the token file
    #[must_use]
    pub fn token_path(&self) -> PathBuf {
        self.data_dir.join(files::TOKENS)
    }

    /// Path of the state file
    #[must_use]
    pub fn state_path(&self) -> PathBuf {
        self.data_dir.join(files::STATE)
    }

    /// Summary of the configuration for logging (without secrets)
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "Coach configuration: data_dir={}, output_dir={}, model={}, strava_api={}, daily_template={}, weekly_template={}",
            self.data_dir.display(),
            self.output_dir.display(),
            self.openai.model,
            self.strava.api_base_url,
            self.prompts
                .daily
                .as_ref()
                .map_or_else(|| "built-in".to_owned(), |path| path.display().to_string()),
            self.prompts
                .weekly
                .as_ref()
                .map_or_else(|| "built-in".to_owned(), |path| path.display().to_string()),
        )
    }
}

fn parse_temperature(raw: Option<String>) -> AppResult<f32> {
    let Some(raw) = raw else {
        return Ok(llm::DEFAULT_TEMPERATURE);
    };
    match raw.trim().parse::<f32>() {
        Ok(value) if value.is_finite() && (0.0..=2.0).contains(&value) => Ok(value),
        _ => Err(AppError::config_invalid(format!(
            "{} must be a number between 0 and 2, got {raw:?}",
            env_vars::OPENAI_TEMPERATURE
        ))),
    }
}
