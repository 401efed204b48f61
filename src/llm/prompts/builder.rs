// ABOUTME: Prompt builder turning normalized activity data into coaching chat messages
// ABOUTME: Caps every stream series at a fixed sample count and keeps absent values as null
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use coach_core::constants::prompts::{SINGLE_STREAM_CAP, WEEKLY_STREAM_CAP};
use coach_core::constants::strava::STREAM_KEYS;
use coach_core::errors::{AppError, AppResult};
use coach_core::models::{ActivitySummary, EnrichedActivity, LapSummary, StreamBundle};
use serde::Serialize;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

use super::{DAILY_INSTRUCTIONS, DAILY_SYSTEM_PROMPT, WEEKLY_INSTRUCTIONS, WEEKLY_SYSTEM_PROMPT};
use crate::config::PromptTemplateConfig;
use crate::llm::ChatMessage;

/// Core activity fields included in every prompt
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PromptCore<'a> {
    /// Activity identifier
    pub id: u64,
    /// Activity title
    pub name: Option<&'a str>,
    /// Athlete's description
    pub description: Option<&'a str>,
    /// Activity type
    #[serde(rename = "type")]
    pub activity_type: Option<&'a str>,
    /// Local start time
    pub start_date_local: Option<&'a str>,
    /// Distance in meters
    pub distance_m: Option<f64>,
    /// Moving time in seconds
    pub moving_time_s: Option<u64>,
    /// Elapsed time in seconds
    pub elapsed_time_s: Option<u64>,
    /// Average speed in m/s
    pub average_speed_mps: Option<f64>,
    /// Maximum speed in m/s
    pub max_speed_mps: Option<f64>,
    /// Average heart rate
    pub average_heartrate: Option<f64>,
    /// Maximum heart rate
    pub max_heartrate: Option<f64>,
    /// Elevation gain in meters
    pub elev_gain_m: Option<f64>,
    /// Pace in minutes per km, null when speed is zero or unknown
    pub pace_min_per_km: Option<f64>,
}

impl<'a> From<&'a ActivitySummary> for PromptCore<'a> {
    fn from(activity: &'a ActivitySummary) -> Self {
        Self {
            id: activity.id,
            name: activity.name.as_deref(),
            description: activity.description.as_deref(),
            activity_type: activity.activity_type.as_deref(),
            start_date_local: activity.start_date_local.as_deref(),
            distance_m: activity.distance_m,
            moving_time_s: activity.moving_time_s,
            elapsed_time_s: activity.elapsed_time_s,
            average_speed_mps: activity.average_speed_mps,
            max_speed_mps: activity.max_speed_mps,
            average_heartrate: activity.average_heartrate,
            max_heartrate: activity.max_heartrate,
            elev_gain_m: activity.elev_gain_m,
            pace_min_per_km: activity.pace_min_per_km,
        }
    }
}

/// One run in the weekly payload
#[derive(Debug, Serialize)]
struct WeeklyEntry<'a> {
    activity: PromptCore<'a>,
    laps: &'a [LapSummary],
    streams: StreamBundle,
}

/// Builds the system/user message pair for each mode
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptBuilder {
    daily_instructions: String,
    weekly_instructions: String,
}

impl Default for PromptBuilder {
    fn default() -> Self {
        Self {
            daily_instructions: DAILY_INSTRUCTIONS.trim().to_owned(),
            weekly_instructions: WEEKLY_INSTRUCTIONS.trim().to_owned(),
        }
    }
}

impl PromptBuilder {
    /// Builder with the built-in instructions for both modes
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder honoring configured template files
    ///
    /// # Errors
    ///
    /// Returns `ConfigInvalid` if a configured template cannot be read or is
    /// empty.
    pub fn from_templates(templates: &PromptTemplateConfig) -> AppResult<Self> {
        let mut builder = Self::default();
        if let Some(path) = &templates.daily {
            builder.daily_instructions = read_template(path)?;
        }
        if let Some(path) = &templates.weekly {
            builder.weekly_instructions = read_template(path)?;
        }
        Ok(builder)
    }

    /// Messages for analyzing a single activity
    ///
    /// Each stream series is cut to the first 600 samples.
    ///
    /// # Errors
    ///
    /// Returns `SerializationError` if the data cannot be encoded.
    pub fn for_single(&self, activity: &EnrichedActivity) -> AppResult<Vec<ChatMessage>> {
        let core = serde_json::to_string(&PromptCore::from(&activity.summary))?;
        let laps = serde_json::to_string(&activity.laps)?;
        let streams = serde_json::to_string(&compact_streams(&activity.streams, SINGLE_STREAM_CAP))?;

        let user = format!(
            "{}\n\nCore data including description:\n{core}\n\nLaps:\n{laps}\n\nStreams (shortened):\n{streams}",
            self.daily_instructions
        );
        debug!(
            activity_id = activity.summary.id,
            chars = user.len(),
            "Built single-activity prompt"
        );

        Ok(vec![
            ChatMessage::system(DAILY_SYSTEM_PROMPT.trim()),
            ChatMessage::user(user),
        ])
    }

    /// Messages for the weekly rollup over enriched runs, most recent first
    ///
    /// Each stream series is cut to the first 300 samples.
    ///
    /// # Errors
    ///
    /// Returns `SerializationError` if the data cannot be encoded.
    pub fn for_week(&self, runs: &[EnrichedActivity]) -> AppResult<Vec<ChatMessage>> {
        let entries: Vec<WeeklyEntry<'_>> = runs
            .iter()
            .map(|run| WeeklyEntry {
                activity: PromptCore::from(&run.summary),
                laps: &run.laps,
                streams: compact_streams(&run.streams, WEEKLY_STREAM_CAP),
            })
            .collect();
        let payload = serde_json::to_string(&entries)?;

        let user = format!(
            "{}\n\nRuns ({} sessions, streams shortened):\n{payload}",
            self.weekly_instructions,
            runs.len()
        );
        debug!(runs = runs.len(), chars = user.len(), "Built weekly prompt");

        Ok(vec![
            ChatMessage::system(WEEKLY_SYSTEM_PROMPT.trim()),
            ChatMessage::user(user),
        ])
    }
}

/// Requested stream keys only, each capped at `cap` samples
fn compact_streams(streams: &StreamBundle, cap: usize) -> StreamBundle {
    let capped = streams.truncated(cap);
    let mut compact = StreamBundle::new();
    for key in STREAM_KEYS {
        if let Some(samples) = capped.get(key) {
            compact.insert(key, samples.to_vec());
        }
    }
    compact
}

fn read_template(path: &Path) -> AppResult<String> {
    let text = fs::read_to_string(path).map_err(|e| {
        AppError::config_invalid(format!(
            "Prompt template {} cannot be read: {e}",
            path.display()
        ))
        .with_source(e)
    })?;
    let text = text.trim();
    if text.is_empty() {
        return Err(AppError::config_invalid(format!(
            "Prompt template {} is empty",
            path.display()
        )));
    }
    info!(path = %path.display(), "Using external prompt template");
    Ok(text.to_owned())
}
