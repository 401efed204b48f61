// ABOUTME: Output writer persisting each run's analysis text and raw JSON bundle
// ABOUTME: Timestamped, kind-qualified file pairs staged as temp files and persisted without clobbering
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Local};
use coach_core::errors::{AppError, AppResult};
use serde_json::Value;
use std::fmt;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::{NamedTempFile, PersistError};
use tracing::{info, warn};

/// Filename timestamp format, second resolution
const TIMESTAMP_FORMAT: &str = "%Y%m%d-%H%M%S";

/// Which driver produced an artifact
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputKind {
    /// Single newest activity
    Daily,
    /// Rollup of recent runs
    Weekly,
}

impl OutputKind {
    /// Directory name for this kind
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
        }
    }
}

impl fmt::Display for OutputKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Paths of a written artifact pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputArtifact {
    /// Analysis text
    pub markdown_path: PathBuf,
    /// Raw JSON bundle
    pub json_path: PathBuf,
}

/// Writes artifact pairs under `<root>/<kind>/`
#[derive(Debug, Clone)]
pub struct OutputWriter {
    root: PathBuf,
}

impl OutputWriter {
    /// Writer rooted at the given directory
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Write an artifact pair stamped with the current local time
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if a file cannot be created, including when an
    /// artifact with the same timestamp and slug already exists.
    pub fn write(&self, kind: OutputKind, slug: &str, text: &str, raw: &Value) -> AppResult<OutputArtifact> {
        self.write_at(kind, slug, text, raw, Local::now())
    }

    /// Write an artifact pair stamped with `at`
    ///
    /// Both files are staged in the kind directory before either becomes
    /// visible. The JSON bundle is persisted first; if the analysis text then
    /// cannot be persisted the bundle is removed again, so a failed call
    /// leaves no partial pair behind.
    ///
    /// # Errors
    ///
    /// Same as [`Self::write`].
    pub fn write_at(
        &self,
        kind: OutputKind,
        slug: &str,
        text: &str,
        raw: &Value,
        at: DateTime<Local>,
    ) -> AppResult<OutputArtifact> {
        let dir = self.root.join(kind.as_str());
        fs::create_dir_all(&dir).map_err(|e| {
            AppError::storage(format!("Failed to create {}", dir.display())).with_source(e)
        })?;

        let stem = format!("{}_{slug}", at.format(TIMESTAMP_FORMAT));
        let artifact = OutputArtifact {
            markdown_path: dir.join(format!("{stem}.md")),
            json_path: dir.join(format!("{stem}.json")),
        };

        let json_tmp = stage(&dir, &serde_json::to_vec_pretty(raw)?)?;
        let markdown_tmp = stage(&dir, text.as_bytes())?;

        json_tmp
            .persist_noclobber(&artifact.json_path)
            .map_err(|e| persist_error(&artifact.json_path, e))?;
        if let Err(e) = markdown_tmp.persist_noclobber(&artifact.markdown_path) {
            if let Err(cleanup) = fs::remove_file(&artifact.json_path) {
                warn!(
                    json = %artifact.json_path.display(),
                    error = %cleanup,
                    "Failed to remove bundle after analysis text was not written"
                );
            }
            return Err(persist_error(&artifact.markdown_path, e));
        }

        info!(
            kind = %kind,
            markdown = %artifact.markdown_path.display(),
            json = %artifact.json_path.display(),
            "Analysis artifacts written"
        );
        Ok(artifact)
    }
}

/// Write `contents` to an anonymous temp file inside `dir`
fn stage(dir: &Path, contents: &[u8]) -> AppResult<NamedTempFile> {
    let mut file = NamedTempFile::new_in(dir).map_err(|e| {
        AppError::storage(format!("Failed to stage artifact in {}", dir.display())).with_source(e)
    })?;
    file.write_all(contents)
        .and_then(|()| file.flush())
        .map_err(|e| {
            AppError::storage(format!("Failed to stage artifact in {}", dir.display())).with_source(e)
        })?;
    Ok(file)
}

fn persist_error(path: &Path, e: PersistError) -> AppError {
    let message = if e.error.kind() == ErrorKind::AlreadyExists {
        format!("Refusing to overwrite existing artifact {}", path.display())
    } else {
        format!("Failed to create {}", path.display())
    };
    AppError::storage(message).with_source(e.error)
}
