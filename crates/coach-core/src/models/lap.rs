// ABOUTME: Per-lap metrics normalized from the provider's lap payload
// ABOUTME: Ordered lap sequence used in prompts; empty for activities without laps
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};

/// Metrics for a single lap
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LapSummary {
    /// Lap index within the activity
    #[serde(rename = "lap")]
    pub lap_index: Option<u32>,
    /// Split number
    pub split: Option<u32>,
    /// Distance in meters
    pub distance_m: Option<f64>,
    /// Elapsed time in seconds
    pub elapsed_time_s: Option<u64>,
    /// Moving time in seconds
    pub moving_time_s: Option<u64>,
    /// Average speed in meters per second
    pub avg_speed_mps: Option<f64>,
    /// Average heart rate in BPM
    pub avg_hr: Option<f64>,
    /// Maximum heart rate in BPM
    pub max_hr: Option<f64>,
    /// Average cadence
    pub cadence: Option<f64>,
}
