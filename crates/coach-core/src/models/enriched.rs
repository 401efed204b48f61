// ABOUTME: Activity bundled with its laps and streams for prompt construction
// ABOUTME: Laps and streams default to empty when their retrieval was skipped or failed
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};

use super::{ActivitySummary, LapSummary, StreamBundle};

/// Activity summary together with its optional telemetry
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EnrichedActivity {
    /// Normalized activity detail
    pub summary: ActivitySummary,
    /// Lap sequence, empty when unavailable
    pub laps: Vec<LapSummary>,
    /// Stream bundle, empty when unavailable
    pub streams: StreamBundle,
}

impl EnrichedActivity {
    /// Activity without laps or streams
    #[must_use]
    pub fn bare(summary: ActivitySummary) -> Self {
        Self {
            summary,
            ..Self::default()
        }
    }
}
