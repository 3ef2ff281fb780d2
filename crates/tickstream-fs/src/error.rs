//! Error types.

use std::path::PathBuf;

use thiserror::Error;
use tickstream_core::SourceError;

/// Error type.
#[derive(Error, Debug)]
pub enum Error {
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Asset not found under the root directory.
    #[error("Asset not found: {}", .0.display())]
    NotFound(PathBuf),

    /// Identifier escapes the root directory.
    #[error("Invalid asset identifier: {0}")]
    InvalidIdentifier(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<Error> for SourceError {
    fn from(err: Error) -> Self {
        match err {
            Error::Io(err) => SourceError::Read(err.to_string()),
            err @ (Error::NotFound(_) | Error::InvalidIdentifier(_)) => {
                SourceError::Unavailable(err.to_string())
            }
        }
    }
}
