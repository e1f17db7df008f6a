//! Error types for store operations

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur while reading or writing the ccs files
#[derive(Debug, Error)]
pub enum StoreError {
    /// Directory or file could not be read or written
    #[error("I/O error for {path}: {message}")]
    FileAccess { path: PathBuf, message: String },

    /// File contains invalid JSON or a document of the wrong shape
    #[error("JSON parse error in {path}: {message}")]
    Parse { path: PathBuf, message: String },

    /// A project with this name is already registered
    #[error("Project name '{name}' already exists")]
    DuplicateName { name: String },

    /// A project with this path is already registered
    #[error("Project path '{path}' already exists")]
    DuplicatePath { path: String },

    /// Profile key not present in the catalog
    #[error("Profile '{key}' not found")]
    ProfileNotFound { key: String },

    /// Project name not present in the catalog
    #[error("Project '{name}' not found")]
    ProjectNotFound { name: String },

    /// No home directory to anchor `.claude` under
    #[error("Home directory not found (set HOME or CCS_CLAUDE_DIR)")]
    HomeNotFound,
}

impl StoreError {
    /// Get the error code for CLI/API responses
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::FileAccess { .. } => "IO_ERROR",
            Self::Parse { .. } => "PARSE_ERROR",
            Self::DuplicateName { .. } => "DUPLICATE_NAME",
            Self::DuplicatePath { .. } => "DUPLICATE_PATH",
            Self::ProfileNotFound { .. } | Self::ProjectNotFound { .. } => "NOT_FOUND",
            Self::HomeNotFound => "CONFIG_ERROR",
        }
    }

    /// Whether the error means the requested entry does not exist
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::ProfileNotFound { .. } | Self::ProjectNotFound { .. }
        )
    }

    pub(crate) fn file_access(path: &Path, err: &std::io::Error) -> Self {
        Self::FileAccess {
            path: path.to_path_buf(),
            message: err.to_string(),
        }
    }

    pub(crate) fn parse(path: &Path, message: impl Into<String>) -> Self {
        Self::Parse {
            path: path.to_path_buf(),
            message: message.into(),
        }
    }
}
