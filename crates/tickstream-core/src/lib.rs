//! Tick-synchronized double-buffered asset streaming.
//!
//! Streams large binary assets from slow block storage through a small,
//! fixed-size chunk buffer so that a fixed-rate consumer (a display refresh or
//! playback tick) always finds its next region already loaded.
//!
//! # Primary API
//!
//! - [`StreamingPrefetcher`]: per-tick refill policy over one [`BlockSource`]
//! - [`StreamConfig`] / [`RefillPolicy`]: chunk layout and refill strategy
//! - [`ChunkBuffer`]: the fixed N-chunk double buffer with per-chunk ready state
//! - [`TickDriver`] / [`RenderStage`]: explicit tick fan-out to streams and consumers
//!
//! # Example
//!
//! ```
//! use tickstream_core::{MemorySource, StreamConfig, StreamingPrefetcher};
//!
//! let asset: Vec<u8> = (0..=255).cycle().take(4096).collect();
//! let mut peaks =
//!     StreamingPrefetcher::new("peaks", MemorySource::new(asset), StreamConfig::peaks())?;
//!
//! let mut first = Vec::new();
//! while let Some(sample) = peaks.current_unit() {
//!     first.push(sample[0]);
//!     peaks.on_tick();
//! }
//! assert_eq!(first.len(), 4096);
//! # Ok::<(), tickstream_core::Error>(())
//! ```

#![no_std]

#[cfg(feature = "std")]
extern crate std;

extern crate alloc;

pub mod error;
pub use error::{Error, Result, SourceError};

mod buffer;
pub use buffer::{ChunkBuffer, MAX_CHUNKS};

mod config;
pub use config::{RefillPolicy, StreamConfig};

mod cursor;
pub use cursor::StreamCursor;

mod metrics;
pub use metrics::StreamStats;

pub mod prefetch;
pub use prefetch::{EndReason, StreamState, StreamingPrefetcher};

pub mod source;
pub use source::{BlockSource, MemorySource, NoSource, OpenSource};

mod tick;
pub use tick::{RenderStage, TickDriver, TickHandler};

/// Compatibility layer for no_std + alloc.
pub mod compat;
