//! # tickstream - tick-synchronized asset streaming
//!
//! Streams large binary assets (waveform peaks, animation frames) from slow
//! block storage through a small double buffer, so a consumer running at a
//! fixed tick rate always finds its next region loaded.
//!
//! ## Architecture
//!
//! tickstream is an umbrella crate over:
//! - **tickstream-core** - `no_std` engine (BlockSource, ChunkBuffer, StreamingPrefetcher, TickDriver)
//! - **tickstream-fs** - file-backed sources (FileSource, AssetDir)
//!
//! ## Quick Start
//!
//! ```no_run
//! use tickstream::prelude::*;
//!
//! let mut peaks = tickstream::stream("/mnt/sd/LYRA2/peaks.bin")
//!     .chunks(2, 512)
//!     .threshold(128)
//!     .name("peaks")
//!     .build()?;
//!
//! let mut driver = TickDriver::new();
//! driver.attach(&mut peaks);
//! driver.run(1024);
//! # Ok::<(), tickstream::Error>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `default` - `std`
//! - `std` - file sources and the [`StreamBuilder`]

#![cfg_attr(not(feature = "std"), no_std)]

/// Re-export of tickstream-core for direct access
pub use tickstream_core as core;

/// Re-export of tickstream-fs
#[cfg(feature = "std")]
pub use tickstream_fs as fs;

pub use tickstream_core::{
    // Sources
    BlockSource,
    // Buffer
    ChunkBuffer,
    EndReason,
    MemorySource,
    NoSource,
    OpenSource,
    // Config
    RefillPolicy,
    RenderStage,
    SourceError,
    StreamConfig,
    StreamCursor,
    StreamState,
    StreamStats,
    // Prefetch
    StreamingPrefetcher,
    // Tick
    TickDriver,
    TickHandler,
    MAX_CHUNKS,
};

#[cfg(feature = "std")]
pub use tickstream_fs::{AssetDir, FileSource};

mod error;
pub use error::{Error, Result};

#[cfg(feature = "std")]
mod builder;

#[cfg(feature = "std")]
pub use builder::{stream, StreamBuilder};

/// A prefetcher streaming from a file.
#[cfg(feature = "std")]
pub type FileStream = StreamingPrefetcher<FileSource>;

/// Convenience prelude for common imports
pub mod prelude {
    pub use crate::{
        BlockSource, RefillPolicy, RenderStage, StreamConfig, StreamState, StreamingPrefetcher,
        TickDriver, TickHandler,
    };

    #[cfg(feature = "std")]
    pub use crate::{AssetDir, FileSource, FileStream, StreamBuilder};
}
