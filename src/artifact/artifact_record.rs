//! Artifact Record - one file written by a report run

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Artifact Record describes a chart or table written during a run.
///
/// The inventory of records is what the CLI prints at the end of a run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ArtifactRecord {
    name: String,
    path: PathBuf,
    size_bytes: u64,
    written_at: DateTime<Utc>,
}

impl ArtifactRecord {
    /// Create a new artifact record stamped with the current time.
    ///
    /// # Arguments
    ///
    /// * `name` - File name inside the output directory (e.g., "`build_time.svg`")
    /// * `path` - Full path the artifact was written to
    /// * `size_bytes` - Size of the artifact in bytes
    #[must_use]
    pub fn new(name: impl Into<String>, path: impl AsRef<Path>, size_bytes: u64) -> Self {
        Self {
            name: name.into(),
            path: path.as_ref().to_path_buf(),
            size_bytes,
            written_at: Utc::now(),
        }
    }

    /// Get the artifact file name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the full path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the artifact size in bytes.
    #[must_use]
    pub const fn size_bytes(&self) -> u64 {
        self.size_bytes
    }

    /// Get the write timestamp.
    #[must_use]
    pub const fn written_at(&self) -> DateTime<Utc> {
        self.written_at
    }
}
