//! Fluent builder for file-backed streams.

use std::path::PathBuf;

use tickstream_core::{RefillPolicy, StreamConfig, StreamingPrefetcher};
use tickstream_fs::FileSource;

use crate::Result;

/// Start building a stream over the file at `path`.
///
/// Shorthand for [`StreamBuilder::new`].
pub fn stream(path: impl Into<PathBuf>) -> StreamBuilder {
    StreamBuilder::new(path)
}

/// Builder for streaming one file through a prefetcher.
///
/// Starts from [`StreamConfig::peaks`]: two 512-byte chunks, one byte per
/// tick, ping-pong refill.
///
/// # Example
/// ```no_run
/// let mut dance = tickstream::stream("/mnt/sd/LYRA2/dance.bin")
///     .chunks(6, 400)
///     .superframe(3)
///     .name("dance")
///     .build()?;
/// # Ok::<(), tickstream::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct StreamBuilder {
    path: PathBuf,
    name: Option<String>,
    config: StreamConfig,
    threshold: Option<usize>,
    deferred: bool,
}

impl StreamBuilder {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            name: None,
            config: StreamConfig::peaks(),
            threshold: None,
            deferred: false,
        }
    }

    /// Set chunk count and chunk size in bytes (default: 2 x 512).
    pub fn chunks(mut self, count: usize, size: usize) -> Self {
        self.config = match self.config.policy {
            RefillPolicy::PingPong => {
                StreamConfig::ping_pong(count, size).with_unit_size(self.config.unit_size)
            }
            RefillPolicy::Superframe { frame_ticks } => {
                StreamConfig::superframe(count, size, frame_ticks)
            }
        };
        self
    }

    /// Set bytes consumed per tick (default: 1). Ping-pong only.
    pub fn unit_size(mut self, bytes: usize) -> Self {
        self.config = self.config.with_unit_size(bytes);
        self
    }

    /// Set the refill look-ahead in units (default: a quarter chunk).
    pub fn threshold(mut self, units: usize) -> Self {
        self.threshold = Some(units);
        self
    }

    /// Switch to superframe refill: all chunks replaced every `frame_ticks` ticks.
    pub fn superframe(mut self, frame_ticks: u32) -> Self {
        self.config = StreamConfig::superframe(
            self.config.chunk_count,
            self.config.chunk_size,
            frame_ticks,
        );
        self
    }

    /// Replace the whole configuration.
    pub fn config(mut self, config: StreamConfig) -> Self {
        self.config = config;
        self.threshold = None;
        self
    }

    /// Name used in logs (default: the file path).
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Prime on the first tick instead of in `build`.
    pub fn deferred(mut self) -> Self {
        self.deferred = true;
        self
    }

    /// The configuration `build` will use.
    pub fn stream_config(&self) -> StreamConfig {
        match self.threshold {
            Some(units) => self.config.with_refill_threshold(units),
            None => self.config,
        }
    }

    /// Open the file and build the stream.
    ///
    /// A file that cannot be opened yields an
    /// [`Unavailable`](tickstream_core::StreamState::Unavailable) stream; only
    /// an invalid configuration is an error.
    pub fn build(self) -> Result<StreamingPrefetcher<FileSource>> {
        let config = self.stream_config();
        let name = self.display_name();
        let opened = FileSource::open(&self.path);

        let stream = match opened {
            Ok(source) if self.deferred => StreamingPrefetcher::deferred(name, source, config)?,
            opened => StreamingPrefetcher::from_open(name, opened, config)?,
        };
        Ok(stream)
    }

    /// Like [`build`](Self::build), but a file that cannot be opened is an error.
    pub fn try_build(self) -> Result<StreamingPrefetcher<FileSource>> {
        let config = self.stream_config();
        config.validate()?;
        let name = self.display_name();
        let source = FileSource::open(&self.path)?;

        let stream = if self.deferred {
            StreamingPrefetcher::deferred(name, source, config)?
        } else {
            StreamingPrefetcher::new(name, source, config)?
        };
        Ok(stream)
    }

    fn display_name(&self) -> String {
        self.name
            .clone()
            .unwrap_or_else(|| self.path.display().to_string())
    }
}
