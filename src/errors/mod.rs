//! Shared error types for the application
//!
//! Fatal failures (unreadable input, unusable parser, bad configuration,
//! unwritable output) are [`CfMetaError`]s. Problems with individual
//! declarations are data, collected in [`collection::ExtractionReport`].

pub mod collection;

use std::path::{Path, PathBuf};
use thiserror::Error;

pub use collection::{DeclarationOutcome, ExtractionReport};

/// Main error type for cfmeta operations
#[derive(Debug, Error)]
pub enum CfMetaError {
    /// File system related errors
    #[error("File system error: {message}: {}", .path.display())]
    FileSystem {
        message: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Parsing errors
    #[error("Parse error in {}: {message}", .path.display())]
    Parse { path: PathBuf, message: String },

    /// Configuration errors
    #[error("Configuration error in {}: {message}", .path.display())]
    Configuration { path: PathBuf, message: String },

    /// JSON errors
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// IO errors without a file path (console output)
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CfMetaError {
    /// Create a file system error with path context
    pub fn file_system(
        message: impl Into<String>,
        path: impl AsRef<Path>,
        source: std::io::Error,
    ) -> Self {
        Self::FileSystem {
            message: message.into(),
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Create a parse error
    pub fn parse(path: impl AsRef<Path>, message: impl Into<String>) -> Self {
        Self::Parse {
            path: path.as_ref().to_path_buf(),
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn configuration(path: impl AsRef<Path>, message: impl Into<String>) -> Self {
        Self::Configuration {
            path: path.as_ref().to_path_buf(),
            message: message.into(),
        }
    }
}

/// Result type alias using our error type
pub type Result<T> = std::result::Result<T, CfMetaError>;
