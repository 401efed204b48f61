// ABOUTME: Core data models for normalized fitness data
// ABOUTME: Re-exports activity summary, lap summary, and stream bundle types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Data Models
//!
//! Provider payloads are loosely shaped; these models pin them down to typed,
//! optional fields so that absence never turns into a failure downstream.

mod activity;
mod enriched;
mod lap;
mod stream;

pub use activity::{pace_min_per_km, ActivitySummary};
pub use enriched::EnrichedActivity;
pub use lap::LapSummary;
pub use stream::StreamBundle;
