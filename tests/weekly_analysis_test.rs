// ABOUTME: Integration tests for the weekly rollup driver
// ABOUTME: Covers run selection across pages, short weeks, empty windows, and statelessness
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use coach_core::errors::ErrorCode;
use common::{activity_json, laps_json, streams_json, ScriptedProvider, StravaFixture};
use serde_json::{json, Value};
use std::fs;
use strava_coach::coach::WeeklyOutcome;
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

fn run_on_day(id: u64, day: u32) -> Value {
    activity_json(id, "Run", &format!("2025-03-{day:02}T07:00:00Z"))
}

async fn mount_enrichment(fixture: &StravaFixture, activity: Value, expected_calls: u64) {
    let id = activity["id"].as_u64().unwrap();
    Mock::given(method("GET"))
        .and(path(format!("/activities/{id}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(activity))
        .expect(expected_calls)
        .mount(&fixture.server)
        .await;
    fixture
        .mock_streams(
            id,
            ResponseTemplate::new(200).set_body_json(streams_json(400)),
            expected_calls,
        )
        .await;
    fixture.mock_laps(id, laps_json(), expected_calls).await;
}

#[tokio::test]
async fn test_short_week_is_analyzed_newest_first() {
    let fixture = StravaFixture::start().await;
    let older = run_on_day(11, 8);
    let newer = run_on_day(12, 9);
    let ride = activity_json(13, "Ride", "2025-03-09T17:00:00Z");
    fixture
        .mock_activity_page(1, json!([older.clone(), ride, newer.clone()]))
        .await;
    fixture.mock_activity_page(2, json!([])).await;
    mount_enrichment(&fixture, older, 1).await;
    mount_enrichment(&fixture, newer, 1).await;
    let provider = ScriptedProvider::replying("Two runs, good balance.");

    let outcome = fixture.coach(&provider).weekly_analysis().await.unwrap();

    let WeeklyOutcome::Analyzed { runs, artifact } = &outcome else {
        panic!("expected an analysis, got {outcome:?}");
    };
    assert_eq!(*runs, 2);
    assert_eq!(outcome.to_string(), "Weekly analysis saved.");
    assert!(artifact
        .markdown_path
        .to_string_lossy()
        .ends_with("_last7_runs.md"));
    assert!(artifact.markdown_path.starts_with(fixture.output_root().join("weekly")));

    let raw: Value = serde_json::from_str(&fs::read_to_string(&artifact.json_path).unwrap()).unwrap();
    let input_runs = raw["input_runs"].as_array().unwrap();
    assert_eq!(input_runs.len(), 2);
    assert_eq!(input_runs[0]["details"]["id"], 12);
    assert_eq!(input_runs[1]["details"]["id"], 11);
    assert_eq!(input_runs[0]["laps"], laps_json());
    assert_eq!(raw["analysis"], "Two runs, good balance.");

    let prompt = provider.last_user_prompt();
    assert!(prompt.contains("Runs (2 sessions, streams shortened):"));
    assert!(!fixture.state_path().exists());
}

#[tokio::test]
async fn test_only_the_seven_newest_runs_are_enriched() {
    let fixture = StravaFixture::start().await;
    let runs: Vec<Value> = (1..=10).map(|day| run_on_day(100 + u64::from(day), day)).collect();
    fixture.mock_activity_page(1, Value::Array(runs.clone())).await;
    fixture.mock_activity_page(2, json!([])).await;
    for run in runs {
        let day = run["id"].as_u64().unwrap() - 100;
        let expected_calls = u64::from(day >= 4);
        mount_enrichment(&fixture, run, expected_calls).await;
    }
    let provider = ScriptedProvider::replying("Solid week.");

    let outcome = fixture.coach(&provider).weekly_analysis().await.unwrap();

    let WeeklyOutcome::Analyzed { runs, artifact } = outcome else {
        panic!("expected an analysis");
    };
    assert_eq!(runs, 7);
    let raw: Value = serde_json::from_str(&fs::read_to_string(artifact.json_path).unwrap()).unwrap();
    let ids: Vec<u64> = raw["input_runs"]
        .as_array()
        .unwrap()
        .iter()
        .map(|run| run["details"]["id"].as_u64().unwrap())
        .collect();
    assert_eq!(ids, vec![110, 109, 108, 107, 106, 105, 104]);
}

#[tokio::test]
async fn test_no_runs_is_a_noop() {
    let fixture = StravaFixture::start().await;
    fixture
        .mock_activity_page(1, json!([activity_json(1, "Swim", "2025-03-09T07:00:00Z")]))
        .await;
    fixture.mock_activity_page(2, json!([])).await;
    let provider = ScriptedProvider::replying("unused");

    let outcome = fixture.coach(&provider).weekly_analysis().await.unwrap();

    assert_eq!(outcome, WeeklyOutcome::NoRecentRuns);
    assert_eq!(outcome.to_string(), "No recent runs found.");
    assert_eq!(provider.calls(), 0);
    assert!(fixture.output_files("weekly").is_empty());
}

#[tokio::test]
async fn test_paging_stops_after_two_hundred_summaries() {
    let fixture = StravaFixture::start().await;
    let rides: Vec<Value> = (1..=50)
        .map(|id| activity_json(id, "Ride", "2025-03-09T07:00:00Z"))
        .collect();
    Mock::given(method("GET"))
        .and(path("/athlete/activities"))
        .respond_with(ResponseTemplate::new(200).set_body_json(Value::Array(rides)))
        .expect(4)
        .mount(&fixture.server)
        .await;
    let provider = ScriptedProvider::replying("unused");

    let outcome = fixture.coach(&provider).weekly_analysis().await.unwrap();

    assert_eq!(outcome, WeeklyOutcome::NoRecentRuns);
}

#[tokio::test]
async fn test_generation_failure_writes_nothing() {
    let fixture = StravaFixture::start().await;
    let run = run_on_day(21, 9);
    fixture.mock_activity_page(1, json!([run.clone()])).await;
    fixture.mock_activity_page(2, json!([])).await;
    mount_enrichment(&fixture, run, 1).await;
    let provider = ScriptedProvider::failing("quota exceeded");

    let error = fixture.coach(&provider).weekly_analysis().await.unwrap_err();

    assert_eq!(error.code, ErrorCode::GenerationFailed);
    assert!(fixture.output_files("weekly").is_empty());
}
