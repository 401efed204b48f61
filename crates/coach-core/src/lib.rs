// ABOUTME: Core types and constants for the Strava coaching tool
// ABOUTME: Foundation crate with error handling, normalized models, constants, and file helpers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Coach Core
//!
//! Shared building blocks for the provider crate and the coaching binaries.
//!
//! ## Modules
//!
//! - **errors**: `AppError`, `ErrorCode`, and `AppResult`
//! - **constants**: endpoints, time bounds, prompt caps, environment variable names
//! - **models**: `ActivitySummary`, `LapSummary`, `StreamBundle`
//! - **storage**: JSON file reads and atomic writes

/// Unified error handling
pub mod errors;

/// Application constants organized by domain
pub mod constants;

/// Normalized fitness data models
pub mod models;

/// JSON file persistence helpers
pub mod storage;
