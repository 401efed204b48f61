// ABOUTME: Coaching drivers wiring repository, prompts, analysis, output, and state together
// ABOUTME: Daily newest-activity check and weekly rollup of recent runs
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Coaching Drivers
//!
//! A [`Coach`] owns every component a run needs. Components are built once
//! from [`CoachConfig`] in `main` (or from fakes in tests) and calls are
//! awaited one after another; nothing runs concurrently.

mod daily;
mod weekly;

pub use daily::DailyOutcome;
pub use weekly::{select_recent_runs, WeeklyOutcome};

use coach_core::errors::AppResult;
use coach_providers::strava::{
    ActivityRepository, AuthenticatedClient, Fetched, TokenManager, TokenStore,
};
use serde_json::Value;
use tracing::warn;

use crate::config::CoachConfig;
use crate::llm::{AnalysisClient, OpenAiCompatibleProvider, PromptBuilder};
use crate::output::OutputWriter;
use crate::state::StateStore;

/// Components shared by the daily and weekly drivers
pub struct Coach {
    activities: ActivityRepository,
    prompts: PromptBuilder,
    analysis: AnalysisClient,
    output: OutputWriter,
    state: StateStore,
}

impl Coach {
    /// Assemble a coach from prepared components
    #[must_use]
    pub const fn new(
        activities: ActivityRepository,
        prompts: PromptBuilder,
        analysis: AnalysisClient,
        output: OutputWriter,
        state: StateStore,
    ) -> Self {
        Self {
            activities,
            prompts,
            analysis,
            output,
            state,
        }
    }

    /// Build every component from configuration
    ///
    /// # Errors
    ///
    /// Returns `ConfigInvalid` for an unreadable prompt template and
    /// `InternalError` if an HTTP client cannot be created.
    pub fn from_config(config: &CoachConfig) -> AppResult<Self> {
        let tokens = TokenManager::for_strava(TokenStore::new(config.token_path()), &config.strava)?;
        let client = AuthenticatedClient::for_strava(&config.strava, tokens)?;
        let provider = OpenAiCompatibleProvider::from_config(&config.openai)?;

        Ok(Self::new(
            ActivityRepository::new(client),
            PromptBuilder::from_templates(&config.prompts)?,
            AnalysisClient::new(
                Box::new(provider),
                &config.openai.model,
                config.openai.temperature,
            ),
            OutputWriter::new(&config.output_dir),
            StateStore::new(config.state_path()),
        ))
    }
}

/// Downgrade a failed laps or streams fetch to an empty value
///
/// `empty_raw` stands in for the provider payload in the raw bundle.
fn or_empty<T: Default>(
    result: AppResult<Fetched<T>>,
    empty_raw: Value,
    what: &str,
    activity_id: u64,
) -> Fetched<T> {
    result.unwrap_or_else(|error| {
        warn!(
            activity_id,
            code = ?error.code,
            "{what} not available, continuing without them: {error}"
        );
        Fetched {
            data: T::default(),
            raw: empty_raw,
        }
    })
}
