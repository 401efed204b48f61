// ABOUTME: Fitness data provider crate for the coaching pipeline
// ABOUTME: HTTP client construction and the Strava OAuth and activity API integration
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Coach Providers
//!
//! Talks to the Strava API on behalf of the coaching drivers. The
//! [`strava::TokenManager`] keeps a persisted token pair fresh, the
//! [`strava::AuthenticatedClient`] issues bearer-authenticated GETs with a
//! single refresh-and-retry on 401, and the [`strava::ActivityRepository`]
//! turns responses into the normalized models from `coach_core`.

/// Shared HTTP client construction and transport error mapping
pub mod http_client;
/// Strava OAuth and activity API
pub mod strava;
/// Payload conversion helpers
pub mod utils;
