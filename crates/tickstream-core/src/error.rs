//! Error types for tickstream-core.
//!
//! Only configuration problems reach the caller as [`Error`]. Source failures
//! during streaming are absorbed by the prefetcher and reported through
//! [`EndReason`](crate::EndReason) instead.

use crate::compat::String;
use thiserror::Error;

/// Failure reported by a [`BlockSource`](crate::BlockSource) or [`OpenSource`](crate::OpenSource).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SourceError {
    #[error("Source unavailable: {0}")]
    Unavailable(String),

    #[error("Seek to {offset} past end of source ({size} bytes)")]
    SeekOutOfRange { offset: u64, size: u64 },

    #[error("Read failed: {0}")]
    Read(String),

    #[error("Source closed")]
    Closed,
}

/// Error type for tickstream-core operations.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Source(#[from] SourceError),
}

pub type Result<T> = core::result::Result<T, Error>;
