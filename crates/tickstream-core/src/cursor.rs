//! Read offset bookkeeping for one stream.

/// Tracks where the next read starts and whether the source has run dry.
///
/// `read_offset` only moves forward, by the size of each completed read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamCursor {
    read_offset: u64,
    total_size: u64,
    exhausted: bool,
}

impl StreamCursor {
    pub fn new(total_size: u64) -> Self {
        Self {
            read_offset: 0,
            total_size,
            exhausted: total_size == 0,
        }
    }

    pub fn read_offset(&self) -> u64 {
        self.read_offset
    }

    pub fn total_size(&self) -> u64 {
        self.total_size
    }

    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    pub fn remaining(&self) -> u64 {
        self.total_size.saturating_sub(self.read_offset)
    }

    /// Offset for the next seek, clamped to the source size.
    pub fn seek_offset(&self) -> u64 {
        self.read_offset.min(self.total_size)
    }

    /// Record a completed read. Returns `true` once the cursor is exhausted.
    pub fn advance(&mut self, bytes: usize) -> bool {
        self.read_offset = self.read_offset.saturating_add(bytes as u64);
        if self.read_offset >= self.total_size {
            self.exhausted = true;
        }
        self.exhausted
    }

    /// Stop issuing reads, e.g. after a short or failed read.
    pub fn mark_exhausted(&mut self) {
        self.exhausted = true;
    }
}
