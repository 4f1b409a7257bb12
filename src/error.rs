// Error taxonomy for the catalog core.
// Every failure surfaces synchronously to the immediate caller; the core
// performs no retries and no recovery.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    /// Bad record fields at construction (empty title/author, zero year).
    #[error("invalid book: {0}")]
    Validation(String),

    /// Unknown identity on remove or status update.
    #[error("book with id {0} not found")]
    NotFound(String),

    /// Unsupported or mistyped search criteria.
    #[error("invalid search query: {0}")]
    InvalidQuery(String),

    /// Unrecognized status label.
    #[error("invalid status {0:?} (allowed: available, checked-out)")]
    InvalidStatus(String),

    /// Persistence file content is not a well-formed sequence of records.
    #[error("malformed catalog file {path:?}: {message}")]
    Format { path: PathBuf, message: String },

    /// I/O failure during export/import, or a misconfigured backing file.
    #[error("{message}")]
    Persistence {
        message: String,
        #[source]
        source: Option<io::Error>,
    },
}

impl CatalogError {
    /// Wrap an I/O error with the failing operation and path.
    pub(crate) fn io(action: &str, path: &Path, source: io::Error) -> Self {
        CatalogError::Persistence {
            message: format!("failed to {} {}: {}", action, path.display(), source),
            source: Some(source),
        }
    }

    pub(crate) fn format(path: &Path, message: impl Into<String>) -> Self {
        CatalogError::Format {
            path: path.to_path_buf(),
            message: message.into(),
        }
    }
}
