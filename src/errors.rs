/*!
 * Error types for the folio indexer.
 *
 * Only failures that prevent producing a complete and correct index are
 * represented here. Problems with individual documents never surface as
 * errors: such files are skipped by the classifier.
 */

use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort an indexing run
#[derive(Error, Debug)]
pub enum IndexError {
    /// A directory under the root could not be enumerated
    #[error("Failed to walk directory {path:?}: {message}")]
    Walk {
        /// Path that could not be read (the root when unknown)
        path: PathBuf,
        /// Underlying reason
        message: String,
    },

    /// The index file could not be published
    #[error("Failed to write index to {path:?}: {source}")]
    Write {
        /// Destination of the index
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The index document could not be serialized
    #[error("Failed to serialize index: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The configuration is unusable
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// The existing index does not match the tree (check mode)
    #[error("Index at {path:?} is out of date")]
    Stale {
        /// Index file that was compared
        path: PathBuf,
    },

    /// Any other I/O failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<walkdir::Error> for IndexError {
    fn from(error: walkdir::Error) -> Self {
        let path = error.path().map(|p| p.to_path_buf()).unwrap_or_default();
        Self::Walk {
            path,
            message: error.to_string(),
        }
    }
}

/// Result alias for indexer operations
pub type IndexResult<T> = std::result::Result<T, IndexError>;
