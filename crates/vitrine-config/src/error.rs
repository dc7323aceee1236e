//! Error types for configuration storage operations.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Primary error type for configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// File system operation failed.
    #[error("filesystem operation failed")]
    Io {
        /// Operation identifier.
        operation: &'static str,
        /// Path the operation targeted.
        path: PathBuf,
        /// Source IO error.
        source: io::Error,
    },
    /// A stored document was not valid JSON.
    #[error("failed to parse configuration document")]
    Parse {
        /// Document that failed to parse.
        path: PathBuf,
        /// Source serde error.
        source: serde_json::Error,
    },
    /// A document could not be serialized.
    #[error("failed to serialize configuration document")]
    Serialize {
        /// Operation identifier.
        operation: &'static str,
        /// Source serde error.
        source: serde_json::Error,
    },
    /// A section did not have the expected shape.
    #[error("invalid configuration section")]
    InvalidSection {
        /// Section or path that failed validation.
        section: String,
        /// Machine-readable reason for the failure.
        reason: &'static str,
    },
    /// The system section named a scope kind that does not exist.
    #[error("unknown configuration scope")]
    InvalidScope {
        /// Scope key found in the document.
        scope: String,
    },
}

impl ConfigError {
    pub(crate) fn io(operation: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            operation,
            path: path.into(),
            source,
        }
    }
}

/// Convenience alias for configuration results.
pub type ConfigResult<T> = Result<T, ConfigError>;
