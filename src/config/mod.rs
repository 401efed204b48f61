// ABOUTME: Configuration management for the coaching binaries
// ABOUTME: Environment-sourced settings for Strava, the chat endpoint, file locations, and templates
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Environment configuration
pub mod environment;

pub use environment::{CoachConfig, OpenAiConfig, PromptTemplateConfig};
