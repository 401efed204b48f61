// ABOUTME: Time-aligned numeric series keyed by stream type (time, heartrate, velocity, cadence)
// ABOUTME: Supports head truncation to bound prompt payload size
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Mapping from stream key to its ordered samples
///
/// Keys the provider had no data for are simply absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StreamBundle {
    series: BTreeMap<String, Vec<f64>>,
}

impl StreamBundle {
    /// Create an empty bundle
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a series
    pub fn insert(&mut self, key: impl Into<String>, samples: Vec<f64>) {
        self.series.insert(key.into(), samples);
    }

    /// Samples for a key
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&[f64]> {
        self.series.get(key).map(Vec::as_slice)
    }

    /// Whether the bundle has no series
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    /// Number of series
    #[must_use]
    pub fn len(&self) -> usize {
        self.series.len()
    }

    /// Stream keys in sorted order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.series.keys().map(String::as_str)
    }

    /// Copy keeping only the first `cap` samples of each series
    #[must_use]
    pub fn truncated(&self, cap: usize) -> Self {
        let series = self
            .series
            .iter()
            .map(|(key, samples)| (key.clone(), samples.iter().take(cap).copied().collect()))
            .collect();
        Self { series }
    }
}
