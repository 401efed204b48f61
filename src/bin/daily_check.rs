// ABOUTME: Daily check binary analyzing the newest Strava activity once
// ABOUTME: Loads configuration from the environment, runs the daily driver, and reports the outcome
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Daily Check
//!
//! Analyzes the newest activity unless it was already analyzed on a
//! previous run. Intended for a daily cron job.

use anyhow::Result;
use clap::Parser;
use coach_core::errors::AppResult;
use std::process::ExitCode;
use strava_coach::{coach::Coach, config::CoachConfig, logging};
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "daily-check")]
#[command(about = "Analyze the newest Strava activity with an LLM coach")]
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
            error!(code = ?e.code, "Daily check failed: {e}");
            eprintln!("Error: {e}");
            Ok(ExitCode::FAILURE)
        }
    }
}

async fn run() -> AppResult<String> {
    let config = CoachConfig::from_env()?;
    info!("{}", config.summary());

    let coach = Coach::from_config(&config)?;
    let outcome = coach.daily_check().await?;
    Ok(outcome.to_string())
}
