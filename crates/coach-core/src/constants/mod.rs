// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Endpoints, timing bounds, prompt sizing limits, and environment variable names
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Constants grouped by domain.

/// Strava API endpoints and request parameters
pub mod strava {
    /// Default data API base URL
    pub const API_BASE: &str = "https://www.strava.com/api/v3";
    /// Default OAuth token endpoint
    pub const TOKEN_URL: &str = "https://www.strava.com/oauth/token";
    /// Activity list path
    pub const ATHLETE_ACTIVITIES_PATH: &str = "/athlete/activities";
    /// Stream keys requested for enrichment
    pub const STREAM_KEYS: [&str; 4] = ["time", "heartrate", "velocity_smooth", "cadence"];
    /// Activity types treated as runs
    pub const RUN_TYPES: [&str; 3] = ["Run", "VirtualRun", "TrailRun"];
}

/// OAuth token lifecycle
pub mod oauth {
    /// Seconds before `expires_at` at which a cached token is considered stale
    pub const REFRESH_MARGIN_SECS: i64 = 60;
    /// Grant type for the refresh exchange
    pub const GRANT_TYPE_REFRESH: &str = "refresh_token";
}

/// Per-request time bounds
pub mod timeouts {
    /// Token exchange bound
    pub const TOKEN_EXCHANGE_SECS: u64 = 30;
    /// Data API bound
    pub const DATA_API_SECS: u64 = 60;
    /// Chat completion bound
    pub const CHAT_COMPLETION_SECS: u64 = 300;
    /// Connection establishment bound
    pub const CONNECT_SECS: u64 = 10;
}

/// Prompt sizing
pub mod prompts {
    /// Samples kept per stream in the single-activity prompt
    pub const SINGLE_STREAM_CAP: usize = 600;
    /// Samples kept per stream in the weekly prompt
    pub const WEEKLY_STREAM_CAP: usize = 300;
}

/// Weekly rollup window
pub mod weekly {
    /// Activities requested per page
    pub const PER_PAGE: u32 = 50;
    /// Highest page fetched
    pub const MAX_PAGES: u32 = 4;
    /// Stop paging once this many summaries were collected
    pub const MAX_SUMMARIES: usize = 200;
    /// Runs included in the rollup
    pub const RUN_COUNT: usize = 7;
    /// Output slug
    pub const SLUG: &str = "last7_runs";
}

/// File names inside the data directory
pub mod files {
    /// Token record file
    pub const TOKENS: &str = "strava_tokens.json";
    /// Process state file
    pub const STATE: &str = "state.json";
}

/// Chat completion defaults
pub mod llm {
    /// Default chat endpoint base URL
    pub const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
    /// Default model
    pub const DEFAULT_MODEL: &str = "gpt-5";
    /// Fixed sampling temperature
    pub const DEFAULT_TEMPERATURE: f32 = 1.0;
}

/// Environment variable names
pub mod env_vars {
    /// Strava OAuth client id
    pub const STRAVA_CLIENT_ID: &str = "STRAVA_CLIENT_ID";
    /// Strava OAuth client secret
    pub const STRAVA_CLIENT_SECRET: &str = "STRAVA_CLIENT_SECRET";
    /// Fallback refresh token used when no token file exists
    pub const STRAVA_REFRESH_TOKEN: &str = "STRAVA_REFRESH_TOKEN";
    /// Data API base URL override
    pub const STRAVA_API_BASE: &str = "STRAVA_API_BASE";
    /// Token endpoint override
    pub const STRAVA_TOKEN_URL: &str = "STRAVA_TOKEN_URL";
    /// Chat endpoint credential
    pub const OPENAI_API_KEY: &str = "OPENAI_API_KEY";
    /// Chat model name
    pub const OPENAI_MODEL: &str = "OPENAI_MODEL";
    /// Chat endpoint base URL override
    pub const OPENAI_BASE_URL: &str = "OPENAI_BASE_URL";
    /// Sampling temperature override
    pub const OPENAI_TEMPERATURE: &str = "OPENAI_TEMPERATURE";
    /// Directory for token and state files
    pub const COACH_DATA_DIR: &str = "COACH_DATA_DIR";
    /// Root directory for analysis artifacts
    pub const COACH_OUTPUT_DIR: &str = "COACH_OUTPUT_DIR";
    /// Prompt template for daily mode
    pub const DAILY_PROMPT_FILE: &str = "DAILY_PROMPT_FILE";
    /// Prompt template for weekly mode
    pub const WEEKLY_PROMPT_FILE: &str = "WEEKLY_PROMPT_FILE";
}
