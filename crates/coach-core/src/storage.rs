// ABOUTME: JSON file helpers for the on-disk token and state records
// ABOUTME: Reads optional JSON documents and writes them atomically via temp file and rename
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::Path;
use tempfile::NamedTempFile;

use crate::errors::{AppError, AppResult};

/// Read a JSON document, returning `None` when the file does not exist
///
/// # Errors
///
/// Returns `StorageError` if the file cannot be read and `SerializationError`
/// if its content is not the expected JSON shape.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> AppResult<Option<T>> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(error) if error.kind() == ErrorKind::NotFound => return Ok(None),
        Err(error) => {
            return Err(
                AppError::storage(format!("Failed to read {}", path.display())).with_source(error)
            )
        }
    };

    serde_json::from_slice(&bytes).map(Some).map_err(|error| {
        AppError::serialization(format!("Malformed JSON in {}", path.display()))
            .with_source(error)
    })
}

/// Write a JSON document atomically (temp file in the same directory, then rename)
///
/// A reader never observes a partially written file.
///
/// # Errors
///
/// Returns `StorageError` if the directory cannot be created or the file
/// cannot be written or renamed.
pub fn write_json_atomic<T: Serialize>(path: &Path, value: &T) -> AppResult<()> {
    let data = serde_json::to_vec_pretty(value)?;
    let parent = path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(parent)?;

    let mut tmp = NamedTempFile::new_in(parent)?;
    tmp.write_all(&data)?;
    tmp.flush()?;
    tmp.persist(path).map_err(|error| {
        AppError::storage(format!("Failed to replace {}", path.display())).with_source(error.error)
    })?;
    Ok(())
}
