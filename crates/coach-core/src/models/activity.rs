// ABOUTME: Normalized activity summary derived from the provider's activity payload
// ABOUTME: Optional fields for every provider value plus the derived pace in minutes per km
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};

use crate::constants::strava::RUN_TYPES;

/// Normalized subset of a provider activity
///
/// Every provider field except the identifier is optional; absence is
/// represented as `None` (serialized as `null`) rather than a default number.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActivitySummary {
    /// Provider activity identifier
    pub id: u64,
    /// Activity title
    pub name: Option<String>,
    /// Free-text description entered by the athlete
    pub description: Option<String>,
    /// Provider activity type (e.g. "Run", "Ride")
    #[serde(rename = "type")]
    pub activity_type: Option<String>,
    /// Start timestamp in UTC (ISO 8601)
    pub start_date: Option<String>,
    /// Start timestamp in the athlete's local time (ISO 8601)
    pub start_date_local: Option<String>,
    /// Distance in meters
    pub distance_m: Option<f64>,
    /// Moving time in seconds
    pub moving_time_s: Option<u64>,
    /// Elapsed time in seconds
    pub elapsed_time_s: Option<u64>,
    /// Average speed in meters per second
    pub average_speed_mps: Option<f64>,
    /// Maximum speed in meters per second
    pub max_speed_mps: Option<f64>,
    /// Average heart rate in BPM
    pub average_heartrate: Option<f64>,
    /// Maximum heart rate in BPM
    pub max_heartrate: Option<f64>,
    /// Total elevation gain in meters
    pub elev_gain_m: Option<f64>,
    /// Derived pace, absent when speed is zero or unknown
    pub pace_min_per_km: Option<f64>,
}

impl ActivitySummary {
    /// Whether the activity type counts as a run
    #[must_use]
    pub fn is_run(&self) -> bool {
        self.activity_type
            .as_deref()
            .is_some_and(|kind| RUN_TYPES.contains(&kind))
    }
}

/// Pace in minutes per kilometer for an average speed in m/s
///
/// Returns `None` when the speed is missing, zero, negative, or not finite,
/// so callers never see `0` or infinity.
#[must_use]
pub fn pace_min_per_km(average_speed_mps: Option<f64>) -> Option<f64> {
    average_speed_mps
        .filter(|speed| speed.is_finite() && *speed > 0.0)
        .map(|speed| 1000.0 / (speed * 60.0))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_pace_from_speed() {
        let pace = pace_min_per_km(Some(3.333_333_333)).unwrap();
        assert!((pace - 5.0).abs() < 1e-6);
    }

    #[test]
    fn test_pace_absent_for_zero_or_missing_speed() {
        assert_eq!(pace_min_per_km(Some(0.0)), None);
        assert_eq!(pace_min_per_km(None), None);
        assert_eq!(pace_min_per_km(Some(-1.0)), None);
        assert_eq!(pace_min_per_km(Some(f64::NAN)), None);
    }

    #[test]
    fn test_absent_pace_serializes_as_null() {
        let summary = ActivitySummary {
            id: 7,
            ..ActivitySummary::default()
        };
        let json = serde_json::to_value(&summary).unwrap();
        assert!(json["pace_min_per_km"].is_null());
        assert!(json.get("type").is_some());
    }

    #[test]
    fn test_run_types() {
        let mut summary = ActivitySummary {
            activity_type: Some("VirtualRun".to_owned()),
            ..ActivitySummary::default()
        };
        assert!(summary.is_run());

        summary.activity_type = Some("Ride".to_owned());
        assert!(!summary.is_run());

        summary.activity_type = None;
        assert!(!summary.is_run());
    }
}
