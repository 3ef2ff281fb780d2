//! The streaming prefetcher: one source, one cursor, one chunk buffer.

use core::fmt;

use tracing::{debug, warn};

use super::state::{EndReason, StreamState};
use crate::buffer::ChunkBuffer;
use crate::compat::String;
use crate::config::{RefillPolicy, StreamConfig};
use crate::cursor::StreamCursor;
use crate::error::Result;
use crate::metrics::StreamStats;
use crate::source::{BlockSource, OpenSource};

/// Streams one asset through a fixed [`ChunkBuffer`], refilling just in time.
///
/// Call [`on_tick`](Self::on_tick) exactly once per tick and read the data for
/// the tick with [`current_unit`](Self::current_unit) or
/// [`current_chunk`](Self::current_chunk). All reads happen synchronously
/// inside `on_tick` (or the constructor, for priming), so a refill always
/// completes before the consumer can observe the refilled chunk.
///
/// Source failures never surface as errors: an unopenable source yields an
/// [`Unavailable`](StreamState::Unavailable) stream, and short or failed reads
/// end the stream once the data already buffered has drained.
///
/// The source is closed when the stream runs out of data, on
/// [`close`](Self::close), or on drop.
pub struct StreamingPrefetcher<S: BlockSource> {
    pub(super) name: String,
    pub(super) source: Option<S>,
    pub(super) config: StreamConfig,
    pub(super) buffer: ChunkBuffer,
    pub(super) cursor: StreamCursor,
    pub(super) state: StreamState,
    /// Ping-pong: unit index within one pass of the buffer.
    /// Superframe: ticks the current frame has been shown.
    pub(super) consume_index: usize,
    pub(super) end_reason: Option<EndReason>,
    pub(super) stats: StreamStats,
}

impl<S: BlockSource> StreamingPrefetcher<S> {
    /// Create a stream over an open source and prime it synchronously.
    pub fn new(name: impl Into<String>, source: S, config: StreamConfig) -> Result<Self> {
        let mut stream = Self::deferred(name, source, config)?;
        stream.prime();
        Ok(stream)
    }

    /// Create a stream that primes on its first tick instead of in the constructor.
    pub fn deferred(name: impl Into<String>, source: S, config: StreamConfig) -> Result<Self> {
        config.validate()?;
        let buffer = ChunkBuffer::new(config.chunk_count, config.chunk_size)?;
        let cursor = StreamCursor::new(source.size());

        Ok(Self {
            name: name.into(),
            source: Some(source),
            config,
            buffer,
            cursor,
            state: StreamState::Priming,
            consume_index: 0,
            end_reason: None,
            stats: StreamStats::default(),
        })
    }

    /// Create a stream whose source could not be opened. It never produces data.
    pub fn unavailable(name: impl Into<String>, config: StreamConfig) -> Result<Self> {
        config.validate()?;
        let buffer = ChunkBuffer::new(config.chunk_count, config.chunk_size)?;

        Ok(Self {
            name: name.into(),
            source: None,
            config,
            buffer,
            cursor: StreamCursor::new(0),
            state: StreamState::Unavailable,
            consume_index: 0,
            end_reason: None,
            stats: StreamStats::default(),
        })
    }

    /// Create a stream from the outcome of opening its source.
    ///
    /// A failed open is logged and produces an unavailable stream; only an
    /// invalid `config` is an error.
    pub fn from_open<E: fmt::Display>(
        name: impl Into<String>,
        opened: core::result::Result<S, E>,
        config: StreamConfig,
    ) -> Result<Self> {
        let name = name.into();
        match opened {
            Ok(source) => Self::new(name, source, config),
            Err(err) => {
                warn!(stream = %name, error = %err, "stream source unavailable");
                Self::unavailable(name, config)
            }
        }
    }

    /// Open `identifier` through `opener` and stream it.
    pub fn open_with<O>(opener: &mut O, identifier: &str, config: StreamConfig) -> Result<Self>
    where
        O: OpenSource<Source = S>,
    {
        Self::from_open(identifier, opener.open(identifier), config)
    }

    /// Advance one tick: consume one unit (or one frame tick) and refill
    /// ahead of the consumer when needed. No-op once terminal.
    pub fn on_tick(&mut self) {
        match self.state {
            StreamState::Unavailable | StreamState::Exhausted => {}
            StreamState::Priming => self.prime(),
            StreamState::Streaming => {
                self.stats.ticks += 1;
                match self.config.policy {
                    RefillPolicy::PingPong => self.tick_ping_pong(),
                    RefillPolicy::Superframe { frame_ticks } => self.tick_superframe(frame_ticks),
                }
            }
        }
    }

    /// The active ready region: the current chunk for ping-pong streams, the
    /// whole frame for superframe streams. `None` means "no output this tick".
    pub fn current_chunk(&self) -> Option<&[u8]> {
        if self.state != StreamState::Streaming {
            return None;
        }
        match self.config.policy {
            RefillPolicy::PingPong => {
                let active = self.active_chunk();
                self.buffer
                    .is_ready(active)
                    .then(|| self.buffer.chunk(active))
            }
            RefillPolicy::Superframe { .. } => {
                self.buffer.all_ready().then(|| self.buffer.frame())
            }
        }
    }

    /// The bytes for this tick: one unit at `consume_index` for ping-pong
    /// streams, the whole frame for superframe streams.
    pub fn current_unit(&self) -> Option<&[u8]> {
        if self.state != StreamState::Streaming {
            return None;
        }
        match self.config.policy {
            RefillPolicy::PingPong => {
                if !self.unit_ready(self.consume_index) {
                    return None;
                }
                let (chunk, offset) = self.locate(self.consume_index);
                Some(&self.buffer.chunk(chunk)[offset..offset + self.config.unit_size])
            }
            RefillPolicy::Superframe { .. } => self.current_chunk(),
        }
    }

    /// Tear the stream down now. Closes the source even mid-stream.
    pub fn close(&mut self) {
        if self.state.is_terminal() {
            return;
        }
        self.release_source(EndReason::Closed);
        self.buffer.reset();
        self.state = StreamState::Exhausted;
        debug!(stream = %self.name, "stream closed by owner");
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn state(&self) -> StreamState {
        self.state
    }

    pub fn is_available(&self) -> bool {
        self.state != StreamState::Unavailable
    }

    pub fn is_exhausted(&self) -> bool {
        self.state == StreamState::Exhausted
    }

    /// Why the stream stopped reading, once it has.
    pub fn end_reason(&self) -> Option<EndReason> {
        self.end_reason
    }

    pub fn consume_index(&self) -> usize {
        self.consume_index
    }

    /// Index of the chunk the consumer is reading. Always 0 for superframe streams.
    pub fn active_chunk(&self) -> usize {
        match self.config.policy {
            RefillPolicy::PingPong => self.consume_index / self.config.units_per_chunk(),
            RefillPolicy::Superframe { .. } => 0,
        }
    }

    pub fn cursor(&self) -> &StreamCursor {
        &self.cursor
    }

    pub fn buffer(&self) -> &ChunkBuffer {
        &self.buffer
    }

    pub fn config(&self) -> &StreamConfig {
        &self.config
    }

    pub fn stats(&self) -> StreamStats {
        self.stats
    }

    /// True while the source handle is still held open.
    pub fn is_source_open(&self) -> bool {
        self.source.is_some()
    }
}

impl<S: BlockSource> Drop for StreamingPrefetcher<S> {
    fn drop(&mut self) {
        if let Some(mut source) = self.source.take() {
            source.close();
        }
    }
}

impl<S: BlockSource> fmt::Debug for StreamingPrefetcher<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StreamingPrefetcher")
            .field("name", &self.name)
            .field("state", &self.state)
            .field("consume_index", &self.consume_index)
            .field("cursor", &self.cursor)
            .field("end_reason", &self.end_reason)
            .field("source_open", &self.source.is_some())
            .finish()
    }
}
