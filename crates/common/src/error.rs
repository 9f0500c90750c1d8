//! Error types shared across Mondrian crates.

use std::path::PathBuf;

/// Top-level error type for Mondrian operations.
#[derive(Debug, thiserror::Error)]
pub enum MondrianError {
    /// A floor plan or video could not be resolved into a usable source.
    #[error("Load failure: {message}")]
    LoadFailure { message: String },

    #[error("Export error: {message}")]
    Export { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias using MondrianError.
pub type MondrianResult<T> = Result<T, MondrianError>;

impl MondrianError {
    pub fn load_failure(msg: impl Into<String>) -> Self {
        Self::LoadFailure {
            message: msg.into(),
        }
    }

    pub fn export(msg: impl Into<String>) -> Self {
        Self::Export {
            message: msg.into(),
        }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Whether this error came from resolving a floor plan or video.
    pub fn is_load_failure(&self) -> bool {
        matches!(self, Self::LoadFailure { .. } | Self::FileNotFound { .. })
    }
}
