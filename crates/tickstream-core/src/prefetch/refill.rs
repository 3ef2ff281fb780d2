//! Refill policy: priming, ping-pong look-ahead and superframe batches.

use tracing::{debug, trace, warn};

use super::prefetcher::StreamingPrefetcher;
use super::state::{EndReason, StreamState};
use crate::config::RefillPolicy;
use crate::source::BlockSource;

impl<S: BlockSource> StreamingPrefetcher<S> {
    /// Fill the first chunk (or the first superframe) from offset 0.
    pub(super) fn prime(&mut self) {
        self.consume_index = 0;
        self.buffer.reset();

        let primed = match self.config.policy {
            RefillPolicy::PingPong => self.refill_chunk(0) && self.unit_ready(0),
            RefillPolicy::Superframe { .. } => self.refill_superframe(),
        };

        if primed {
            self.state = StreamState::Streaming;
            debug!(
                stream = %self.name,
                size = self.cursor.total_size(),
                capacity = self.buffer.capacity(),
                "stream primed"
            );
        } else {
            self.finish();
        }
    }

    pub(super) fn tick_ping_pong(&mut self) {
        let units = self.config.units_per_chunk();
        let leaving = self.active_chunk();

        self.consume_index += 1;
        if self.consume_index >= self.config.logical_len() {
            self.consume_index = 0;
        }

        let active = self.active_chunk();
        if active != leaving {
            self.buffer.clear_ready(leaving);
        }

        if !self.unit_ready(self.consume_index) {
            if self.cursor.is_exhausted() {
                self.finish();
            } else {
                self.stats.underruns += 1;
                warn!(stream = %self.name, chunk = active, "consumer reached a chunk that is not ready");
            }
            return;
        }

        let distance = (active + 1) * units - self.consume_index;
        if distance >= self.config.refill_threshold {
            return;
        }

        let next = (active + 1) % self.buffer.chunk_count();
        if !self.buffer.is_ready(next) && self.refill_chunk(next) {
            self.stats.refills += 1;
        }
    }

    pub(super) fn tick_superframe(&mut self, frame_ticks: u32) {
        self.consume_index += 1;
        if self.consume_index < frame_ticks as usize {
            return;
        }
        self.consume_index = 0;

        if self.refill_superframe() {
            self.stats.refills += 1;
        } else {
            self.finish();
        }
    }

    /// Read every chunk as one frame. A frame that comes up short is dropped.
    fn refill_superframe(&mut self) -> bool {
        if self.cursor.is_exhausted() {
            return false;
        }
        self.buffer.reset();

        let chunk_size = self.buffer.chunk_size();
        for index in 0..self.buffer.chunk_count() {
            if !self.refill_chunk(index) || self.buffer.filled(index) < chunk_size {
                debug!(stream = %self.name, chunk = index, "incomplete superframe dropped");
                self.buffer.reset();
                return false;
            }
        }
        true
    }

    /// Read the next block into chunk `index` and mark it ready.
    ///
    /// Returns `false` when nothing was read; the cursor is then exhausted.
    fn refill_chunk(&mut self, index: usize) -> bool {
        if self.cursor.is_exhausted() {
            return false;
        }
        let Some(source) = self.source.as_mut() else {
            return false;
        };

        let offset = self.cursor.seek_offset();
        let requested = self.cursor.remaining().min(self.buffer.chunk_size() as u64) as usize;
        self.buffer.clear_ready(index);

        if let Err(err) = source.seek(offset) {
            warn!(stream = %self.name, offset, error = %err, "seek failed");
            self.release_source(EndReason::ReadFailed);
            return false;
        }

        let read = match source.read(&mut self.buffer.chunk_mut(index)[..requested]) {
            Ok(n) => n.min(requested),
            Err(err) => {
                warn!(stream = %self.name, offset, error = %err, "read failed");
                self.release_source(EndReason::ReadFailed);
                return false;
            }
        };
        self.stats.record_read(read, requested);
        trace!(stream = %self.name, chunk = index, offset, bytes = read, "refill");

        if read == 0 {
            self.release_source(EndReason::ShortRead);
            return false;
        }

        self.buffer.set_filled(index, read);
        self.buffer.mark_ready(index);

        if self.cursor.advance(read) {
            self.release_source(EndReason::EndOfData);
        } else if read < requested {
            self.release_source(EndReason::ShortRead);
        }
        true
    }

    /// Stop reading and close the source. The first reason recorded wins.
    pub(super) fn release_source(&mut self, reason: EndReason) {
        self.cursor.mark_exhausted();
        if self.end_reason.is_none() {
            self.end_reason = Some(reason);
        }
        if let Some(mut source) = self.source.take() {
            source.close();
            debug!(
                stream = %self.name,
                ?reason,
                offset = self.cursor.read_offset(),
                "source closed"
            );
        }
    }

    /// Everything delivered has been consumed.
    pub(super) fn finish(&mut self) {
        self.release_source(EndReason::EndOfData);
        self.buffer.reset();
        self.state = StreamState::Exhausted;
        debug!(
            stream = %self.name,
            ticks = self.stats.ticks,
            bytes = self.stats.bytes_read,
            "stream exhausted"
        );
    }

    pub(super) fn unit_ready(&self, index: usize) -> bool {
        let (chunk, offset) = self.locate(index);
        self.buffer.is_ready(chunk) && offset + self.config.unit_size <= self.buffer.filled(chunk)
    }

    /// Chunk index and byte offset of unit `index`.
    pub(super) fn locate(&self, index: usize) -> (usize, usize) {
        let units = self.config.units_per_chunk();
        (index / units, (index % units) * self.config.unit_size)
    }
}
