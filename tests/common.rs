// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Mock Strava server wiring, a scripted LLM provider, and coach assembly helpers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used,
    clippy::expect_used
)]
//! Shared test utilities for `strava_coach`
//!
//! Each fixture owns a wiremock server standing in for both the Strava data
//! API and its token endpoint, plus a temporary directory for token, state,
//! and output files.

use async_trait::async_trait;
use chrono::Utc;
use coach_core::errors::{AppError, AppResult};
use coach_providers::strava::{
    ActivityRepository, AuthenticatedClient, StravaConfig, TokenManager, TokenRecord, TokenStore,
};
use serde_json::{json, Value};
use std::env;
use std::fs;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, Once};
use strava_coach::coach::Coach;
use strava_coach::llm::{AnalysisClient, ChatRequest, ChatResponse, LlmProvider, PromptBuilder};
use strava_coach::output::OutputWriter;
use strava_coach::state::StateStore;
use tempfile::TempDir;
use tracing::Level;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => Level::TRACE,
            Ok("DEBUG") => Level::DEBUG,
            Ok("INFO") => Level::INFO,
            Ok("WARN" | "ERROR") | _ => Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

// ============================================================================
// Scripted LLM provider
// ============================================================================

/// Provider answering every request with the same reply, recording requests
#[derive(Clone)]
pub struct ScriptedProvider {
    reply: Result<String, String>,
    pub requests: Arc<Mutex<Vec<ChatRequest>>>,
}

impl ScriptedProvider {
    pub fn replying(text: &str) -> Self {
        Self {
            reply: Ok(text.to_owned()),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            reply: Err(message.to_owned()),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// User message of the most recent request
    pub fn last_user_prompt(&self) -> String {
        let requests = self.requests.lock().unwrap();
        let request = requests.last().expect("no request recorded");
        request.messages[1].content.clone()
    }
}

#[async_trait]
impl LlmProvider for ScriptedProvider {
    fn name(&self) -> &'static str {
        "scripted"
    }

    fn default_model(&self) -> &str {
        "scripted-model"
    }

    async fn complete(&self, request: &ChatRequest) -> AppResult<ChatResponse> {
        self.requests.lock().unwrap().push(request.clone());
        match &self.reply {
            Ok(text) => Ok(ChatResponse {
                content: text.clone(),
                model: "scripted-model".to_owned(),
                usage: None,
                finish_reason: Some("stop".to_owned()),
            }),
            Err(message) => Err(AppError::generation(message.clone())),
        }
    }
}

// ============================================================================
// Strava fixture
// ============================================================================

/// Mock Strava server plus scratch directories
pub struct StravaFixture {
    pub server: MockServer,
    pub dir: TempDir,
}

impl StravaFixture {
    /// Start a server and seed a token file that is valid for hours
    pub async fn start() -> Self {
        init_test_logging();
        let fixture = Self {
            server: MockServer::start().await,
            dir: tempfile::tempdir().unwrap(),
        };
        fixture.seed_tokens("valid-access", "valid-refresh", Utc::now().timestamp() + 6 * 3600);
        fixture
    }

    pub fn token_path(&self) -> PathBuf {
        self.dir.path().join("strava_tokens.json")
    }

    pub fn state_path(&self) -> PathBuf {
        self.dir.path().join("state.json")
    }

    pub fn output_root(&self) -> PathBuf {
        self.dir.path().join("out")
    }

    pub fn seed_tokens(&self, access: &str, refresh: &str, expires_at: i64) {
        TokenStore::new(self.token_path())
            .save(&TokenRecord {
                access_token: access.to_owned(),
                refresh_token: refresh.to_owned(),
                expires_at,
                obtained_at: None,
            })
            .unwrap();
    }

    pub fn stored_tokens(&self) -> TokenRecord {
        TokenStore::new(self.token_path()).load().unwrap().unwrap()
    }

    pub fn strava_config(&self) -> StravaConfig {
        let mut config = StravaConfig::new("client-id", "client-secret");
        config.api_base_url = self.server.uri();
        config.token_url = format!("{}/oauth/token", self.server.uri());
        config
    }

    pub fn authenticated_client(&self) -> AuthenticatedClient {
        let config = self.strava_config();
        let tokens = TokenManager::for_strava(TokenStore::new(self.token_path()), &config).unwrap();
        AuthenticatedClient::for_strava(&config, tokens).unwrap()
    }

    pub fn repository(&self) -> ActivityRepository {
        ActivityRepository::new(self.authenticated_client())
    }

    pub fn coach(&self, provider: &ScriptedProvider) -> Coach {
        Coach::new(
            self.repository(),
            PromptBuilder::new(),
            AnalysisClient::new(Box::new(provider.clone()), "gpt-5", 1.0),
            OutputWriter::new(self.output_root()),
            StateStore::new(self.state_path()),
        )
    }

    /// Files under `<output>/<kind>/`, sorted
    pub fn output_files(&self, kind: &str) -> Vec<PathBuf> {
        let dir = self.output_root().join(kind);
        let Ok(entries) = fs::read_dir(dir) else {
            return Vec::new();
        };
        let mut files: Vec<PathBuf> = entries.map(|entry| entry.unwrap().path()).collect();
        files.sort();
        files
    }

    // ------------------------------------------------------------------------
    // Endpoint mocks
    // ------------------------------------------------------------------------

    pub async fn mock_activity_page(&self, page: u32, activities: Value) {
        Mock::given(method("GET"))
            .and(path("/athlete/activities"))
            .and(query_param("page", page.to_string()))
            .respond_with(ResponseTemplate::new(200).set_body_json(activities))
            .mount(&self.server)
            .await;
    }

    pub async fn mock_activity(&self, activity: Value) {
        let id = activity["id"].as_u64().unwrap();
        Mock::given(method("GET"))
            .and(path(format!("/activities/{id}")))
            .respond_with(ResponseTemplate::new(200).set_body_json(activity))
            .mount(&self.server)
            .await;
    }

    pub async fn mock_laps(&self, id: u64, laps: Value, expected_calls: u64) {
        Mock::given(method("GET"))
            .and(path(format!("/activities/{id}/laps")))
            .respond_with(ResponseTemplate::new(200).set_body_json(laps))
            .expect(expected_calls)
            .mount(&self.server)
            .await;
    }

    pub async fn mock_streams(&self, id: u64, template: ResponseTemplate, expected_calls: u64) {
        Mock::given(method("GET"))
            .and(path(format!("/activities/{id}/streams")))
            .respond_with(template)
            .expect(expected_calls)
            .mount(&self.server)
            .await;
    }
}

// ============================================================================
// Payload builders
// ============================================================================

/// Activity payload shaped like the Strava detail endpoint
pub fn activity_json(id: u64, kind: &str, start_local: &str) -> Value {
    json!({
        "id": id,
        "name": format!("{kind} {id}"),
        "type": kind,
        "sport_type": kind,
        "start_date": start_local,
        "start_date_local": start_local,
        "distance": 10_000.0,
        "moving_time": 3000,
        "elapsed_time": 3100,
        "average_speed": 3.3333,
        "average_heartrate": 152.0,
        "max_heartrate": 176.0,
        "average_cadence": 86.0,
        "total_elevation_gain": 42.0,
        "description": "Easy loop around the park",
        "device_name": "Watch"
    })
}

pub fn laps_json() -> Value {
    json!([
        {"lap_index": 1, "distance": 5000.0, "moving_time": 1500, "elapsed_time": 1510,
         "average_speed": 3.33, "average_heartrate": 150.0, "max_heartrate": 165.0,
         "average_cadence": 85.0},
        {"lap_index": 2, "distance": 5000.0, "moving_time": 1500, "elapsed_time": 1590,
         "average_speed": 3.33, "average_heartrate": 155.0, "max_heartrate": 176.0,
         "average_cadence": 87.0}
    ])
}

pub fn streams_json(samples: usize) -> Value {
    let series = |scale: f64| -> Vec<f64> { (0..samples).map(|i| i as f64 * scale).collect() };
    json!({
        "time": {"data": series(1.0), "series_type": "time", "original_size": samples},
        "heartrate": {"data": series(0.1), "series_type": "time", "original_size": samples},
        "velocity_smooth": {"data": series(0.01), "series_type": "time", "original_size": samples},
        "cadence": {"data": series(0.05), "series_type": "time", "original_size": samples}
    })
}
