// ABOUTME: Typed accessors for Strava activities, laps, and streams over the authenticated client
// ABOUTME: Converts provider payloads into normalized models while keeping the raw JSON for audit
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use coach_core::constants::strava::ATHLETE_ACTIVITIES_PATH;
use coach_core::errors::{AppError, AppResult};
use coach_core::models::{pace_min_per_km, ActivitySummary, LapSummary, StreamBundle};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, instrument};

use super::client::AuthenticatedClient;
use crate::utils::conversions::f64_to_u64;

/// A normalized value together with the provider payload it came from
#[derive(Debug, Clone, PartialEq)]
pub struct Fetched<T> {
    /// Normalized value
    pub data: T,
    /// Provider payload as received
    pub raw: Value,
}

impl<T: Default> Default for Fetched<T> {
    fn default() -> Self {
        Self {
            data: T::default(),
            raw: Value::Null,
        }
    }
}

/// Strava API response for activity data
#[derive(Debug, Deserialize)]
struct StravaActivityResponse {
    id: u64,
    name: Option<String>,
    description: Option<String>,
    #[serde(rename = "type")]
    activity_type: Option<String>,
    start_date: Option<String>,
    start_date_local: Option<String>,
    distance: Option<f64>,
    moving_time: Option<f64>,
    elapsed_time: Option<f64>,
    average_speed: Option<f64>,
    max_speed: Option<f64>,
    average_heartrate: Option<f64>,
    max_heartrate: Option<f64>,
    total_elevation_gain: Option<f64>,
}

impl From<StravaActivityResponse> for ActivitySummary {
    fn from(activity: StravaActivityResponse) -> Self {
        Self {
            id: activity.id,
            name: activity.name,
            description: activity.description,
            activity_type: activity.activity_type,
            start_date: activity.start_date,
            start_date_local: activity.start_date_local,
            distance_m: activity.distance,
            moving_time_s: activity.moving_time.map(f64_to_u64),
            elapsed_time_s: activity.elapsed_time.map(f64_to_u64),
            average_speed_mps: activity.average_speed,
            max_speed_mps: activity.max_speed,
            average_heartrate: activity.average_heartrate,
            max_heartrate: activity.max_heartrate,
            elev_gain_m: activity.total_elevation_gain,
            pace_min_per_km: pace_min_per_km(activity.average_speed),
        }
    }
}

/// Strava API response for lap data
#[derive(Debug, Deserialize)]
struct StravaLapResponse {
    lap_index: Option<u32>,
    split: Option<u32>,
    distance: Option<f64>,
    elapsed_time: Option<f64>,
    moving_time: Option<f64>,
    average_speed: Option<f64>,
    average_heartrate: Option<f64>,
    max_heartrate: Option<f64>,
    average_cadence: Option<f64>,
}

impl From<StravaLapResponse> for LapSummary {
    fn from(lap: StravaLapResponse) -> Self {
        Self {
            lap_index: lap.lap_index,
            split: lap.split,
            distance_m: lap.distance,
            elapsed_time_s: lap.elapsed_time.map(f64_to_u64),
            moving_time_s: lap.moving_time.map(f64_to_u64),
            avg_speed_mps: lap.average_speed,
            avg_hr: lap.average_heartrate,
            max_hr: lap.max_heartrate,
            cadence: lap.average_cadence,
        }
    }
}

/// Typed access to the activity endpoints
pub struct ActivityRepository {
    client: AuthenticatedClient,
}

impl ActivityRepository {
    /// Create a repository over an authenticated client
    #[must_use]
    pub const fn new(client: AuthenticatedClient) -> Self {
        Self { client }
    }

    /// List the athlete's activities, most recent first
    ///
    /// # Errors
    ///
    /// Returns any client error, or `SerializationError` if the payload is
    /// not a list of activities with identifiers.
    #[instrument(skip(self))]
    pub async fn list_activities(
        &self,
        per_page: u32,
        page: u32,
    ) -> AppResult<Vec<Fetched<ActivitySummary>>> {
        let query = [("per_page", per_page.to_string()), ("page", page.to_string())];
        let raw = self.client.get_json(ATHLETE_ACTIVITIES_PATH, &query).await?;

        let Value::Array(items) = raw else {
            return Err(AppError::serialization(
                "Activity list response is not a JSON array",
            ));
        };

        let activities = items
            .into_iter()
            .map(|item| {
                let summary = parse_activity(&item)?;
                Ok(Fetched {
                    data: summary,
                    raw: item,
                })
            })
            .collect::<AppResult<Vec<_>>>()?;

        debug!(count = activities.len(), "Listed activities");
        Ok(activities)
    }

    /// Full activity detail by id
    ///
    /// # Errors
    ///
    /// Returns any client error, or `SerializationError` if the payload has
    /// no usable identifier.
    #[instrument(skip(self))]
    pub async fn get_activity(&self, id: u64) -> AppResult<Fetched<ActivitySummary>> {
        let raw = self.client.get_json(&format!("/activities/{id}"), &[]).await?;
        let summary = parse_activity(&raw)?;
        Ok(Fetched { data: summary, raw })
    }

    /// Laps of an activity, possibly empty
    ///
    /// # Errors
    ///
    /// Returns any client error, or `SerializationError` if the payload is
    /// not a list.
    #[instrument(skip(self))]
    pub async fn get_laps(&self, id: u64) -> AppResult<Fetched<Vec<LapSummary>>> {
        let raw = self
            .client
            .get_json(&format!("/activities/{id}/laps"), &[])
            .await?;
        let laps = parse_laps(&raw)?;
        Ok(Fetched { data: laps, raw })
    }

    /// Streams of an activity for the requested keys
    ///
    /// Keys the provider has no data for are absent from the bundle.
    ///
    /// # Errors
    ///
    /// Returns any client error.
    #[instrument(skip(self))]
    pub async fn get_streams(&self, id: u64, keys: &[&str]) -> AppResult<Fetched<StreamBundle>> {
        let query = [
            ("keys", keys.join(",")),
            ("key_by_type", "true".to_owned()),
        ];
        let raw = self
            .client
            .get_json(&format!("/activities/{id}/streams"), &query)
            .await?;
        let streams = parse_streams(&raw);
        Ok(Fetched { data: streams, raw })
    }
}

fn parse_activity(raw: &Value) -> AppResult<ActivitySummary> {
    StravaActivityResponse::deserialize(raw)
        .map(ActivitySummary::from)
        .map_err(|e| AppError::serialization(format!("Unexpected activity payload: {e}")).with_source(e))
}

fn parse_laps(raw: &Value) -> AppResult<Vec<LapSummary>> {
    Vec::<StravaLapResponse>::deserialize(raw)
        .map(|laps| laps.into_iter().map(LapSummary::from).collect())
        .map_err(|e| AppError::serialization(format!("Unexpected laps payload: {e}")).with_source(e))
}

/// Parse either the keyed (`key_by_type=true`) or the list form of a streams payload
///
/// Series without a numeric `data` array are skipped.
fn parse_streams(raw: &Value) -> StreamBundle {
    let mut bundle = StreamBundle::new();
    match raw {
        Value::Object(map) => {
            for (key, stream) in map {
                if let Some(samples) = numeric_samples(stream) {
                    bundle.insert(key.as_str(), samples);
                }
            }
        }
        Value::Array(items) => {
            for stream in items {
                let key = stream.get("type").and_then(Value::as_str);
                if let (Some(key), Some(samples)) = (key, numeric_samples(stream)) {
                    bundle.insert(key, samples);
                }
            }
        }
        _ => {}
    }
    bundle
}

fn numeric_samples(stream: &Value) -> Option<Vec<f64>> {
    stream
        .get("data")?
        .as_array()?
        .iter()
        .map(Value::as_f64)
        .collect()
}
