//! Error types for mathcontent library.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for mathcontent operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while loading or rendering content blocks.
#[derive(Error, Debug)]
pub enum Error {
    /// A required construction option is missing.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A block carries none (or more than one) of the recognized content kinds.
    #[error("Malformed block at index {index}: {reason}")]
    MalformedBlock {
        /// Position of the offending block in the document
        index: usize,
        /// What is wrong with it
        reason: String,
    },

    /// A remote rendering service failed or answered with a non-success status.
    #[error("{service} service error: {reason}")]
    Collaborator {
        /// Which collaborator failed ("markup" or "image")
        service: &'static str,
        /// Failure description
        reason: String,
    },

    /// Copying or writing an image file failed.
    #[error("Storage error at {}: {source}", .path.display())]
    Storage {
        /// File that could not be read or written
        path: PathBuf,
        /// Underlying I/O failure
        #[source]
        source: io::Error,
    },

    /// The input is not a JSON array of block objects.
    #[error("Invalid document: {0}")]
    InvalidDocument(String),

    /// I/O error when reading an input document.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl Error {
    pub(crate) fn storage(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Error::Storage {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn collaborator(service: &'static str, reason: impl ToString) -> Self {
        Error::Collaborator {
            service,
            reason: reason.to_string(),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::InvalidDocument(err.to_string())
    }
}
