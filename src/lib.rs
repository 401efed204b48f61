// ABOUTME: Main library entry point for the Strava coaching tool
// ABOUTME: Daily and weekly LLM analysis of Strava activities with file-based state and output
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Strava Coach
//!
//! Fetches recent activities from Strava, asks an OpenAI-compatible chat
//! model for a coaching analysis, and writes the result to disk.
//!
//! ## Modes
//!
//! - **Daily**: analyze the newest activity once. A state file remembers the
//!   last analyzed id so the same activity is never analyzed twice.
//! - **Weekly**: analyze the seven most recent runs together. No state is
//!   kept.
//!
//! ## Architecture
//!
//! - `coach_core`: error types, constants, normalized activity models
//! - `coach_providers`: Strava token lifecycle, authenticated GET, activity repository
//! - **Config**: environment-only configuration
//! - **LLM**: prompt builder and chat-completions client
//! - **Coach**: the daily and weekly drivers
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use strava_coach::coach::Coach;
//! use strava_coach::config::CoachConfig;
//! use coach_core::errors::AppResult;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> AppResult<()> {
//!     let config = CoachConfig::from_env()?;
//!     let coach = Coach::from_config(&config)?;
//!     println!("{}", coach.daily_check().await?);
//!     Ok(())
//! }
//! ```

/// Daily and weekly coaching drivers
pub mod coach;

/// Environment-based configuration
pub mod config;

/// Chat-completions client and prompt construction
pub mod llm;

/// Structured logging setup
pub mod logging;

/// Analysis artifact writer
pub mod output;

/// Last-seen activity state for daily mode
pub mod state;
