//! Error types shared by every part of the core.

use std::path::PathBuf;
use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, NeuroError>;

#[derive(Debug, Error)]
pub enum NeuroError {
    /// A file exists but could not be read.
    #[error("cannot read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A required dataset split is absent.
    #[error("required {split} split not found at {}", .path.display())]
    MissingSplit { split: &'static str, path: PathBuf },

    /// Container header, tag or length is inconsistent.
    #[error("malformed container {file}: {reason}")]
    Malformed { file: String, reason: String },

    /// No training example carries this digit.
    #[error("no training example for label {0}")]
    MissingLabel(u8),

    /// Label outside the output class range.
    #[error("label {0} is outside the class range")]
    InvalidLabel(usize),

    /// Vector handed to the network has the wrong length.
    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("configuration json: {0}")]
    Json(#[from] serde_json::Error),
}

impl NeuroError {
    pub fn malformed(file: impl Into<String>, reason: impl Into<String>) -> Self {
        NeuroError::Malformed {
            file: file.into(),
            reason: reason.into(),
        }
    }

    /// True for conditions that must stop the UI from becoming usable.
    pub fn is_fatal_load(&self) -> bool {
        matches!(
            self,
            NeuroError::Io { .. }
                | NeuroError::MissingSplit { .. }
                | NeuroError::Malformed { .. }
                | NeuroError::MissingLabel(_)
        )
    }
}
