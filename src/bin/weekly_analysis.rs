// ABOUTME: Weekly analysis binary rolling up the most recent runs
// ABOUTME: Loads configuration from the environment, runs the weekly driver, and reports the outcome
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Weekly Analysis
//!
//! Analyzes the seven most recent runs together. Keeps no state, so
//! every invocation produces a fresh report.

use anyhow::Result;
use clap::Parser;
use coach_core::errors::AppResult;
use std::process::ExitCode;
use strava_coach::{coach::Coach, config::CoachConfig, logging};
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "weekly-analysis")]
#[command(about = "Analyze the last seven Strava runs with an LLM coach")]
struct Args {}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode> {
    Args::parse();
    dotenvy::dotenv().ok();
    logging::init_from_env()?;

    match run().await {
        Ok(message) => {
            println!("{message}");
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            error!(code = ?e.code, "Weekly analysis failed: {e}");
            eprintln!("Error: {e}");
            Ok(ExitCode::FAILURE)
        }
    }
}

async fn run() -> AppResult<String> {
    let config = CoachConfig::from_env()?;
    info!("{}", config.summary());

    let coach = Coach::from_config(&config)?;
    let outcome = coach.weekly_analysis().await?;
    Ok(outcome.to_string())
}
