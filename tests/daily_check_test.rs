// ABOUTME: Integration tests for the daily newest-activity driver
// ABOUTME: Exercises state gating, best-effort enrichment, artifact writing, and failure atomicity
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
use std::path::Path;
use strava_coach::coach::DailyOutcome;
use wiremock::ResponseTemplate;

fn read_json(path: &Path) -> Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

#[tokio::test]
async fn test_no_activities_is_a_noop() {
    let fixture = StravaFixture::start().await;
    fixture.mock_activity_page(1, json!([])).await;
    let provider = ScriptedProvider::replying("unused");

    let outcome = fixture.coach(&provider).daily_check().await.unwrap();

    assert_eq!(outcome, DailyOutcome::NoActivities);
    assert_eq!(outcome.to_string(), "No activities found.");
    assert_eq!(provider.calls(), 0);
    assert!(!fixture.state_path().exists());
    assert!(fixture.output_files("daily").is_empty());
}

#[tokio::test]
async fn test_already_processed_activity_is_skipped() {
    let fixture = StravaFixture::start().await;
    fs::write(fixture.state_path(), r#"{"last_seen_activity_id": "1001"}"#).unwrap();
    fixture
        .mock_activity_page(1, json!([activity_json(1001, "Run", "2025-03-09T07:00:00Z")]))
        .await;
    let provider = ScriptedProvider::replying("unused");

    let outcome = fixture.coach(&provider).daily_check().await.unwrap();

    assert_eq!(outcome.to_string(), "No new activity. Last seen: 1001");
    assert_eq!(provider.calls(), 0);
    assert!(fixture.output_files("daily").is_empty());
    assert_eq!(
        read_json(&fixture.state_path()),
        json!({"last_seen_activity_id": "1001"})
    );
}

#[tokio::test]
async fn test_new_run_is_analyzed_saved_and_marked_seen() {
    let fixture = StravaFixture::start().await;
    let run = activity_json(2002, "Run", "2025-03-09T07:00:00Z");
    fs::write(
        fixture.state_path(),
        r#"{"last_seen_activity_id": 1001, "note": "kept"}"#,
    )
    .unwrap();
    fixture.mock_activity_page(1, json!([run.clone()])).await;
    fixture.mock_activity(run.clone()).await;
    fixture
        .mock_streams(2002, ResponseTemplate::new(200).set_body_json(streams_json(900)), 1)
        .await;
    fixture.mock_laps(2002, laps_json(), 1).await;
    let provider = ScriptedProvider::replying("  Controlled aerobic run.\n");

    let outcome = fixture.coach(&provider).daily_check().await.unwrap();

    let DailyOutcome::Analyzed {
        activity_id,
        artifact,
    } = &outcome
    else {
        panic!("expected an analysis, got {outcome:?}");
    };
    assert_eq!(*activity_id, 2002);
    assert_eq!(outcome.to_string(), "New activity 2002 analyzed and saved.");

    assert_eq!(
        fs::read_to_string(&artifact.markdown_path).unwrap(),
        "Controlled aerobic run."
    );
    let raw = read_json(&artifact.json_path);
    assert_eq!(raw["activity"], run);
    assert_eq!(raw["laps"], laps_json());
    assert_eq!(raw["streams"]["time"]["data"].as_array().unwrap().len(), 900);
    assert_eq!(raw["analysis"], "Controlled aerobic run.");
    assert!(artifact
        .json_path
        .file_name()
        .unwrap()
        .to_string_lossy()
        .ends_with("_activity_2002.json"));

    let prompt = provider.last_user_prompt();
    assert!(prompt.contains("Core data including description:"));
    assert!(prompt.contains("Easy loop around the park"));
    assert!(prompt.contains("Streams (shortened):"));

    let state = read_json(&fixture.state_path());
    assert_eq!(state["last_seen_activity_id"], json!(2002));
    assert_eq!(state["note"], "kept");
}

#[tokio::test]
async fn test_non_run_skips_laps_and_streams() {
    let fixture = StravaFixture::start().await;
    let ride = activity_json(3003, "Ride", "2025-03-09T07:00:00Z");
    fixture.mock_activity_page(1, json!([ride.clone()])).await;
    fixture.mock_activity(ride).await;
    fixture
        .mock_streams(3003, ResponseTemplate::new(200).set_body_json(streams_json(10)), 0)
        .await;
    fixture.mock_laps(3003, laps_json(), 0).await;
    let provider = ScriptedProvider::replying("Nice ride.");

    let outcome = fixture.coach(&provider).daily_check().await.unwrap();

    let DailyOutcome::Analyzed { artifact, .. } = outcome else {
        panic!("expected an analysis");
    };
    let raw = read_json(&artifact.json_path);
    assert_eq!(raw["streams"], json!({}));
    assert_eq!(raw["laps"], json!([]));
    assert_eq!(provider.calls(), 1);
}

#[tokio::test]
async fn test_stream_failure_is_best_effort() {
    let fixture = StravaFixture::start().await;
    let run = activity_json(4004, "TrailRun", "2025-03-09T07:00:00Z");
    fixture.mock_activity_page(1, json!([run.clone()])).await;
    fixture.mock_activity(run).await;
    fixture
        .mock_streams(4004, ResponseTemplate::new(404).set_body_string("Record Not Found"), 1)
        .await;
    fixture.mock_laps(4004, laps_json(), 1).await;
    let provider = ScriptedProvider::replying("Hilly and steady.");

    let outcome = fixture.coach(&provider).daily_check().await.unwrap();

    let DailyOutcome::Analyzed { artifact, .. } = outcome else {
        panic!("expected an analysis");
    };
    let raw = read_json(&artifact.json_path);
    assert_eq!(raw["streams"], json!({}));
    assert_eq!(raw["laps"].as_array().unwrap().len(), 2);
    assert_eq!(read_json(&fixture.state_path())["last_seen_activity_id"], json!(4004));
}

#[tokio::test]
async fn test_generation_failure_leaves_state_untouched() {
    let fixture = StravaFixture::start().await;
    let run = activity_json(5005, "Run", "2025-03-09T07:00:00Z");
    fs::write(fixture.state_path(), r#"{"last_seen_activity_id": 1001}"#).unwrap();
    fixture.mock_activity_page(1, json!([run.clone()])).await;
    fixture.mock_activity(run).await;
    fixture
        .mock_streams(5005, ResponseTemplate::new(200).set_body_json(streams_json(5)), 1)
        .await;
    fixture.mock_laps(5005, json!([]), 1).await;
    let provider = ScriptedProvider::failing("model overloaded");

    let error = fixture.coach(&provider).daily_check().await.unwrap_err();

    assert_eq!(error.code, ErrorCode::GenerationFailed);
    assert_eq!(provider.calls(), 1);
    assert!(fixture.output_files("daily").is_empty());
    assert_eq!(
        read_json(&fixture.state_path()),
        json!({"last_seen_activity_id": 1001})
    );
}

#[tokio::test]
async fn test_detail_failure_aborts_the_run() {
    let fixture = StravaFixture::start().await;
    fixture
        .mock_activity_page(1, json!([activity_json(6006, "Run", "2025-03-09T07:00:00Z")]))
        .await;
    let provider = ScriptedProvider::replying("unused");

    let error = fixture.coach(&provider).daily_check().await.unwrap_err();

    assert_eq!(error.code, ErrorCode::Upstream);
    assert_eq!(error.upstream_status(), Some(404));
    assert_eq!(provider.calls(), 0);
    assert!(!fixture.state_path().exists());
}
