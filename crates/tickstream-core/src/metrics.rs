//! Per-stream I/O and tick statistics.
//!
//! Streams run on the tick thread only, so these are plain counters.

/// Snapshot of one stream's activity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StreamStats {
    /// Ticks processed while streaming
    pub ticks: u64,
    /// Block read calls issued (priming included)
    pub reads: u64,
    /// Bytes delivered by those reads
    pub bytes_read: u64,
    /// Refills after priming (one per chunk, or one per superframe)
    pub refills: u64,
    /// Reads that came back shorter than requested
    pub short_reads: u64,
    /// Ticks that landed on a chunk that was not ready while data remained
    pub underruns: u64,
}

impl StreamStats {
    #[inline]
    pub(crate) fn record_read(&mut self, bytes: usize, requested: usize) {
        self.reads += 1;
        self.bytes_read += bytes as u64;
        if bytes < requested {
            self.short_reads += 1;
        }
    }

    /// Average bytes per read call.
    pub fn avg_read_size(&self) -> u64 {
        if self.reads == 0 {
            0
        } else {
            self.bytes_read / self.reads
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_read() {
        let mut stats = StreamStats::default();
        stats.record_read(512, 512);
        stats.record_read(100, 512);

        assert_eq!(stats.reads, 2);
        assert_eq!(stats.bytes_read, 612);
        assert_eq!(stats.short_reads, 1);
        assert_eq!(stats.avg_read_size(), 306);
    }

    #[test]
    fn test_avg_read_size_empty() {
        assert_eq!(StreamStats::default().avg_read_size(), 0);
    }
}
