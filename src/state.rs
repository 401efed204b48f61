// ABOUTME: Process state persistence for daily new-activity detection
// ABOUTME: Tracks the last analyzed activity id so an activity is never analyzed twice
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use coach_core::errors::AppResult;
use coach_core::storage::{read_json, write_json_atomic};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Persisted daily-mode state
///
/// Keys other than `last_seen_activity_id` are carried through untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProcessState {
    /// Id of the most recently analyzed activity, `null` before the first run
    #[serde(default)]
    pub last_seen_activity_id: Option<Value>,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl ProcessState {
    /// Last seen id in its string form
    #[must_use]
    pub fn last_seen(&self) -> Option<String> {
        match self.last_seen_activity_id.as_ref()? {
            Value::Null => None,
            Value::String(id) => Some(id.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Whether `id` was the last analyzed activity
    ///
    /// Ids compare by string form so a state file holding `"123"` matches
    /// activity `123`.
    #[must_use]
    pub fn has_seen(&self, id: u64) -> bool {
        self.last_seen().is_some_and(|seen| seen == id.to_string())
    }

    /// Record `id` as the last analyzed activity
    pub fn mark_seen(&mut self, id: u64) {
        self.last_seen_activity_id = Some(Value::from(id));
    }
}

/// File-backed state store
#[derive(Debug, Clone)]
pub struct StateStore {
    path: PathBuf,
}

impl StateStore {
    /// Store backed by the given file
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the state file
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the state, empty when no file exists yet
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(&self) -> AppResult<ProcessState> {
        Ok(read_json(&self.path)?.unwrap_or_default())
    }

    /// Replace the stored state
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save(&self, state: &ProcessState) -> AppResult<()> {
        write_json_atomic(&self.path, state)?;
        debug!(path = %self.path.display(), last_seen = ?state.last_seen(), "State saved");
        Ok(())
    }
}
