// ABOUTME: Strava provider: OAuth token lifecycle, authenticated client, and activity access
// ABOUTME: Re-exports the types drivers need to talk to the fitness data API
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Typed activity, lap, and stream retrieval
pub mod activities;
/// Authenticated GET with single retry on 401
pub mod client;
/// Provider credentials and endpoints
pub mod config;
/// Refresh decision and exchange
pub mod token_manager;
/// Token file persistence
pub mod token_store;

pub use activities::{ActivityRepository, Fetched};
pub use client::AuthenticatedClient;
pub use config::StravaConfig;
pub use token_manager::{StravaTokenExchange, TokenExchange, TokenManager};
pub use token_store::{TokenRecord, TokenStore};
