//! Centralized error type for the tickstream umbrella crate.
//!
//! Wraps all subsystem errors so `?` propagates naturally across crate boundaries.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Core(#[from] tickstream_core::Error),

    #[cfg(feature = "std")]
    #[error("Filesystem: {0}")]
    Fs(#[from] tickstream_fs::Error),

    #[cfg(feature = "std")]
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<tickstream_core::SourceError> for Error {
    fn from(err: tickstream_core::SourceError) -> Self {
        Self::Core(err.into())
    }
}

pub type Result<T> = ::core::result::Result<T, Error>;
