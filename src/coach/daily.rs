// ABOUTME: Daily driver analyzing the newest activity once and recording it as processed
// ABOUTME: State advances only after both analysis and artifact persistence succeed
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use coach_core::constants::strava::STREAM_KEYS;
use coach_core::errors::AppResult;
use coach_core::models::{EnrichedActivity, StreamBundle};
use coach_providers::strava::Fetched;
use serde_json::{json, Value};
use std::fmt;
use tracing::{info, instrument};

use super::{or_empty, Coach};
use crate::output::{OutputArtifact, OutputKind};

/// Result of a daily check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DailyOutcome {
    /// The athlete has no activities
    NoActivities,
    /// The newest activity was already analyzed
    AlreadyProcessed {
        /// Stored last-seen id
        last_seen: String,
    },
    /// The newest activity was analyzed and saved
    Analyzed {
        /// Analyzed activity id
        activity_id: u64,
        /// Written files
        artifact: OutputArtifact,
    },
}

impl fmt::Display for DailyOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoActivities => f.write_str("No activities found."),
            Self::AlreadyProcessed { last_seen } => {
                write!(f, "No new activity. Last seen: {last_seen}")
            }
            Self::Analyzed { activity_id, .. } => {
                write!(f, "New activity {activity_id} analyzed and saved.")
            }
        }
    }
}

impl Coach {
    /// Analyze the newest activity unless it was already processed
    ///
    /// Laps and streams are fetched for runs only and are best-effort.
    ///
    /// # Errors
    ///
    /// Any failure listing activities, fetching the activity detail,
    /// generating the analysis, or writing output aborts the run without
    /// touching the state file.
    #[instrument(skip(self))]
    pub async fn daily_check(&self) -> AppResult<DailyOutcome> {
        let mut state = self.state.load()?;

        let Some(latest) = self.activities.list_activities(1, 1).await?.into_iter().next() else {
            info!("Activity list is empty");
            return Ok(DailyOutcome::NoActivities);
        };
        let activity_id = latest.data.id;

        if state.has_seen(activity_id) {
            info!(activity_id, "Newest activity already analyzed");
            return Ok(DailyOutcome::AlreadyProcessed {
                last_seen: state.last_seen().unwrap_or_default(),
            });
        }

        let details = self.activities.get_activity(activity_id).await?;
        let (streams, laps) = if details.data.is_run() {
            let streams = or_empty(
                self.activities.get_streams(activity_id, &STREAM_KEYS).await,
                json!({}),
                "Streams",
                activity_id,
            );
            let laps = or_empty(
                self.activities.get_laps(activity_id).await,
                json!([]),
                "Laps",
                activity_id,
            );
            (streams, laps)
        } else {
            info!(
                activity_id,
                activity_type = ?details.data.activity_type,
                "Not a run, skipping laps and streams"
            );
            (
                Fetched {
                    data: StreamBundle::new(),
                    raw: json!({}),
                },
                Fetched {
                    data: Vec::new(),
                    raw: json!([]),
                },
            )
        };

        let enriched = EnrichedActivity {
            summary: details.data,
            laps: laps.data,
            streams: streams.data,
        };
        let messages = self.prompts.for_single(&enriched)?;
        let analysis = self.analysis.generate(&messages).await?;

        let raw = json!({
            "activity": details.raw,
            "streams": streams.raw,
            "laps": laps.raw,
            "analysis": Value::String(analysis.clone()),
        });
        let slug = format!("activity_{activity_id}");
        let artifact = self
            .output
            .write(OutputKind::Daily, &slug, &analysis, &raw)?;

        state.mark_seen(activity_id);
        self.state.save(&state)?;
        info!(activity_id, "Daily analysis complete");

        Ok(DailyOutcome::Analyzed {
            activity_id,
            artifact,
        })
    }
}
