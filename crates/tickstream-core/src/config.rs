//! Stream layout and refill configuration.

use crate::buffer::MAX_CHUNKS;
use crate::compat::format;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// How a stream replenishes its buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RefillPolicy {
    /// Consume one unit per tick and refill the next chunk in the ring once
    /// fewer than `refill_threshold` units remain in the active chunk.
    PingPong,
    /// Treat all chunks as one frame, shown for `frame_ticks` ticks and then
    /// replaced in a single batch read.
    Superframe { frame_ticks: u32 },
}

/// Configuration for one streaming prefetcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamConfig {
    /// Number of chunks in the buffer (default: 2)
    pub chunk_count: usize,
    /// Bytes per chunk, also the size of one block read (default: 512)
    pub chunk_size: usize,
    /// Bytes consumed per tick (default: 1)
    pub unit_size: usize,
    /// Refill once fewer than this many units remain in the active chunk (default: a quarter chunk)
    pub refill_threshold: usize,
    /// Refill strategy (default: ping-pong)
    pub policy: RefillPolicy,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self::peaks()
    }
}

impl StreamConfig {
    /// Ping-pong stream with a quarter-chunk refill threshold and one byte per tick.
    pub fn ping_pong(chunk_count: usize, chunk_size: usize) -> Self {
        Self {
            chunk_count,
            chunk_size,
            unit_size: 1,
            refill_threshold: quarter(chunk_size),
            policy: RefillPolicy::PingPong,
        }
    }

    /// Superframe stream: `chunk_count` sub-chunks read together every `frame_ticks` ticks.
    pub fn superframe(chunk_count: usize, chunk_size: usize, frame_ticks: u32) -> Self {
        Self {
            chunk_count,
            chunk_size,
            unit_size: chunk_count.saturating_mul(chunk_size),
            refill_threshold: 0,
            policy: RefillPolicy::Superframe { frame_ticks },
        }
    }

    /// Waveform peaks: two 512-byte halves, one sample per tick.
    pub fn peaks() -> Self {
        Self::ping_pong(2, 512)
    }

    /// Dance bitmap: a 120x160 1-bit frame in six 400-byte reads, replaced every third tick.
    pub fn dance() -> Self {
        Self::superframe(6, 400, 3)
    }

    /// Change the bytes consumed per tick; the threshold is reset to a quarter chunk.
    pub fn with_unit_size(mut self, unit_size: usize) -> Self {
        self.unit_size = unit_size;
        if self.policy == RefillPolicy::PingPong && unit_size > 0 {
            self.refill_threshold = quarter(self.chunk_size / unit_size);
        }
        self
    }

    pub fn with_refill_threshold(mut self, units: usize) -> Self {
        self.refill_threshold = units;
        self
    }

    pub fn capacity(&self) -> usize {
        self.chunk_count * self.chunk_size
    }

    pub fn units_per_chunk(&self) -> usize {
        self.chunk_size / self.unit_size.max(1)
    }

    /// Units in one full pass through the buffer.
    pub fn logical_len(&self) -> usize {
        self.chunk_count * self.units_per_chunk()
    }

    pub fn validate(&self) -> Result<()> {
        if !(2..=MAX_CHUNKS).contains(&self.chunk_count) {
            return Err(Error::InvalidConfig(format!(
                "chunk_count must be between 2 and {MAX_CHUNKS}, got {}",
                self.chunk_count
            )));
        }
        if self.chunk_size == 0 {
            return Err(Error::InvalidConfig("chunk_size must be non-zero".into()));
        }
        if self.chunk_count.checked_mul(self.chunk_size).is_none() {
            return Err(Error::InvalidConfig("buffer capacity overflows usize".into()));
        }

        match self.policy {
            RefillPolicy::PingPong => {
                if self.unit_size == 0 || self.chunk_size % self.unit_size != 0 {
                    return Err(Error::InvalidConfig(format!(
                        "unit_size {} must evenly divide chunk_size {}",
                        self.unit_size, self.chunk_size
                    )));
                }
                let units = self.units_per_chunk();
                // At least one unit remains when the check runs, so 2 is the
                // smallest threshold that ever fires.
                if self.refill_threshold < 2 || self.refill_threshold > units / 2 {
                    return Err(Error::InvalidConfig(format!(
                        "refill_threshold must be between 2 and {} units, got {}",
                        units / 2,
                        self.refill_threshold
                    )));
                }
            }
            RefillPolicy::Superframe { frame_ticks } => {
                if frame_ticks == 0 {
                    return Err(Error::InvalidConfig(
                        "frame_ticks must be at least 1".into(),
                    ));
                }
            }
        }
        Ok(())
    }
}

fn quarter(units: usize) -> usize {
    (units / 4).max(2)
}
