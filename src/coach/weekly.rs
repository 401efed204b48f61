// ABOUTME: Weekly driver analyzing the most recent runs in one rollup
// ABOUTME: Pages the activity list, selects the newest runs, enriches each, and never touches state
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use coach_core::constants::strava::STREAM_KEYS;
use coach_core::constants::weekly::{MAX_PAGES, MAX_SUMMARIES, PER_PAGE, RUN_COUNT, SLUG};
use coach_core::errors::AppResult;
use coach_core::models::{ActivitySummary, EnrichedActivity};
use serde_json::{json, Value};
use std::fmt;
use tracing::{debug, info, instrument};

use super::{or_empty, Coach};
use crate::output::{OutputArtifact, OutputKind};

/// Result of a weekly rollup
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WeeklyOutcome {
    /// No qualifying runs in the fetched window
    NoRecentRuns,
    /// Rollup analyzed and saved
    Analyzed {
        /// Number of runs included
        runs: usize,
        /// Written files
        artifact: OutputArtifact,
    },
}

impl fmt::Display for WeeklyOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoRecentRuns => f.write_str("No recent runs found."),
            Self::Analyzed { .. } => f.write_str("Weekly analysis saved."),
        }
    }
}

/// Newest `count` runs, ordered by local start time descending
///
/// Runs without a start time sort last.
#[must_use]
pub fn select_recent_runs(summaries: Vec<ActivitySummary>, count: usize) -> Vec<ActivitySummary> {
    let mut runs: Vec<ActivitySummary> = summaries
        .into_iter()
        .filter(ActivitySummary::is_run)
        .collect();
    runs.sort_by(|a, b| b.start_date_local.cmp(&a.start_date_local));
    runs.truncate(count);
    runs
}

impl Coach {
    /// Analyze the most recent runs together
    ///
    /// Fewer than seven runs still produce an analysis; none at all is a
    /// no-op without output.
    ///
    /// # Errors
    ///
    /// Any failure listing activities, fetching a run's detail, generating
    /// the analysis, or writing output aborts the run.
    #[instrument(skip(self))]
    pub async fn weekly_analysis(&self) -> AppResult<WeeklyOutcome> {
        let summaries = self.collect_recent_summaries().await?;
        let selected = select_recent_runs(summaries, RUN_COUNT);
        if selected.is_empty() {
            info!("No qualifying runs in the fetched window");
            return Ok(WeeklyOutcome::NoRecentRuns);
        }

        let mut enriched = Vec::with_capacity(selected.len());
        let mut input_runs = Vec::with_capacity(selected.len());
        for run in &selected {
            let details = self.activities.get_activity(run.id).await?;
            let laps = or_empty(
                self.activities.get_laps(run.id).await,
                json!([]),
                "Laps",
                run.id,
            );
            let streams = or_empty(
                self.activities.get_streams(run.id, &STREAM_KEYS).await,
                json!({}),
                "Streams",
                run.id,
            );

            input_runs.push(json!({
                "details": details.raw,
                "laps": laps.raw,
                "streams": streams.raw,
            }));
            enriched.push(EnrichedActivity {
                summary: details.data,
                laps: laps.data,
                streams: streams.data,
            });
        }

        let messages = self.prompts.for_week(&enriched)?;
        let analysis = self.analysis.generate(&messages).await?;

        let raw = json!({
            "input_runs": input_runs,
            "analysis": Value::String(analysis.clone()),
        });
        let artifact = self.output.write(OutputKind::Weekly, SLUG, &analysis, &raw)?;
        info!(runs = enriched.len(), "Weekly analysis complete");

        Ok(WeeklyOutcome::Analyzed {
            runs: enriched.len(),
            artifact,
        })
    }

    /// Page through the activity list until a page is empty or enough summaries were seen
    async fn collect_recent_summaries(&self) -> AppResult<Vec<ActivitySummary>> {
        let mut summaries = Vec::new();
        for page in 1..=MAX_PAGES {
            let batch = self.activities.list_activities(PER_PAGE, page).await?;
            if batch.is_empty() {
                break;
            }
            summaries.extend(batch.into_iter().map(|fetched| fetched.data));
            debug!(page, collected = summaries.len(), "Fetched activity page");
            if summaries.len() >= MAX_SUMMARIES {
                break;
            }
        }
        Ok(summaries)
    }
}
