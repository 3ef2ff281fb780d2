//! Property tests for the streaming prefetcher over in-memory sources.

use proptest::prelude::*;
use tickstream_core::{
    BlockSource, ChunkBuffer, MemorySource, SourceError, StreamConfig, StreamState,
    StreamingPrefetcher,
};

/// Counts reads and remembers the offset each one started at.
struct CountingSource {
    inner: MemorySource<Vec<u8>>,
    offsets: Vec<u64>,
}

impl CountingSource {
    fn new(asset: Vec<u8>) -> Self {
        Self {
            inner: MemorySource::new(asset),
            offsets: Vec::new(),
        }
    }
}

impl BlockSource for CountingSource {
    fn size(&self) -> u64 {
        self.inner.size()
    }

    fn seek(&mut self, offset: u64) -> Result<(), SourceError> {
        self.inner.seek(offset)
    }

    fn read(&mut self, buf: &mut [u8]) -> Result<usize, SourceError> {
        self.offsets.push(self.inner.position());
        self.inner.read(buf)
    }
}

fn asset(len: usize, seed: u8) -> Vec<u8> {
    (0..len)
        .map(|i| (i as u8).wrapping_mul(31).wrapping_add(seed))
        .collect()
}

/// A valid ping-pong layout: 2..=8 chunks, unit 1..=4 bytes, 4..=64 units per
/// chunk, and a threshold picked from the valid range by `pick`.
fn ping_pong_config() -> impl Strategy<Value = StreamConfig> {
    (2usize..=8, 1usize..=4, 4usize..=64, any::<usize>()).prop_map(
        |(chunks, unit, units, pick)| {
            let threshold = 2 + pick % (units / 2 - 1);
            StreamConfig::ping_pong(chunks, unit * units)
                .with_unit_size(unit)
                .with_refill_threshold(threshold)
        },
    )
}

proptest! {
    /// Property: buffer capacity is always the sum of its chunks.
    #[test]
    fn prop_capacity_is_sum_of_chunks(chunks in 2usize..=64, size in 1usize..4096) {
        let buffer = ChunkBuffer::new(chunks, size).unwrap();
        prop_assert_eq!(buffer.capacity(), chunks * size);
    }

    /// Property: the consumer sees the asset in order, one unit per tick,
    /// without underruns, and every byte is read exactly once.
    #[test]
    fn prop_delivers_asset_in_order(
        config in ping_pong_config(),
        len in 0usize..3000,
        seed in any::<u8>(),
    ) {
        let data = asset(len, seed);
        let mut source = CountingSource::new(data.clone());
        let (delivered, stats) = {
            let mut stream = StreamingPrefetcher::new("prop", &mut source, config).unwrap();
            let mut delivered = Vec::new();
            let mut guard = 0;
            while let Some(unit) = stream.current_unit() {
                prop_assert_eq!(unit.len(), config.unit_size);
                delivered.extend_from_slice(unit);
                stream.on_tick();
                guard += 1;
                prop_assert!(guard <= len + 1);
            }
            prop_assert!(stream.is_exhausted());
            (delivered, stream.stats())
        };

        let chunk = config.chunk_size;
        let tail = (len % chunk) / config.unit_size * config.unit_size;
        let expected = len / chunk * chunk + tail;
        prop_assert_eq!(&delivered[..], &data[..expected]);

        prop_assert_eq!(stats.underruns, 0);
        prop_assert_eq!(stats.bytes_read, len as u64);
        prop_assert_eq!(stats.reads as usize, len.div_ceil(chunk));
        let offsets: Vec<u64> = (0..len.div_ceil(chunk)).map(|i| (i * chunk) as u64).collect();
        prop_assert_eq!(source.offsets, offsets);
    }

    /// Property: each chunk is refilled at most once per pass over the buffer.
    #[test]
    fn prop_one_refill_per_chunk_per_pass(config in ping_pong_config(), passes in 1usize..5) {
        let pass = config.logical_len();
        let len = config.capacity() * (passes + 2);
        let mut stream =
            StreamingPrefetcher::new("prop", MemorySource::new(asset(len, 7)), config).unwrap();

        for tick in 1..=pass * passes {
            stream.on_tick();
            prop_assert!(stream.stats().refills as usize <= tick / config.units_per_chunk() + 1);
        }
        prop_assert_eq!(stream.stats().refills as usize, passes * config.chunk_count);
        prop_assert_eq!(stream.state(), StreamState::Streaming);
    }

    /// Property: once exhausted, ticks change nothing and produce nothing.
    #[test]
    fn prop_exhausted_is_idempotent(config in ping_pong_config(), len in 0usize..600, extra in 1usize..200) {
        let mut stream =
            StreamingPrefetcher::new("prop", MemorySource::new(asset(len, 1)), config).unwrap();
        while stream.current_unit().is_some() {
            stream.on_tick();
        }
        let stats = stream.stats();
        let cursor = *stream.cursor();

        for _ in 0..extra {
            stream.on_tick();
            prop_assert!(stream.current_chunk().is_none());
        }
        prop_assert_eq!(stream.state(), StreamState::Exhausted);
        prop_assert_eq!(stream.stats(), stats);
        prop_assert_eq!(*stream.cursor(), cursor);
        prop_assert!(!stream.is_source_open());
    }

    /// Property: superframes are replaced in whole batches every `frame_ticks`
    /// ticks; a trailing partial frame is never shown.
    #[test]
    fn prop_superframe_batches(
        chunks in 2usize..=8,
        chunk_size in 1usize..=64,
        frame_ticks in 1u32..=5,
        frames in 0usize..5,
        extra_pick in any::<usize>(),
    ) {
        let config = StreamConfig::superframe(chunks, chunk_size, frame_ticks);
        let capacity = config.capacity();
        let extra = extra_pick % capacity;
        let data = asset(frames * capacity + extra, 3);
        let mut source = CountingSource::new(data.clone());

        let mut shown = Vec::new();
        {
            let mut stream = StreamingPrefetcher::new("prop", &mut source, config).unwrap();
            while let Some(frame) = stream.current_chunk() {
                prop_assert_eq!(frame.len(), capacity);
                shown.push(frame.to_vec());
                stream.on_tick();
            }
            prop_assert!(stream.is_exhausted());
        }

        prop_assert_eq!(shown.len(), frames * frame_ticks as usize);
        for (i, frame) in shown.iter().enumerate() {
            let start = i / frame_ticks as usize * capacity;
            prop_assert_eq!(&frame[..], &data[start..start + capacity]);
        }
        prop_assert_eq!(source.offsets.len(), frames * chunks + extra.div_ceil(chunk_size));
    }
}

#[test]
fn peaks_refill_offsets() {
    let mut source = CountingSource::new(asset(4096, 0));
    let mut read_at = Vec::new();
    {
        let mut stream =
            StreamingPrefetcher::new("peaks", &mut source, StreamConfig::peaks()).unwrap();
        let mut reads = stream.stats().reads;
        for tick in 1..=4096u64 {
            stream.on_tick();
            if stream.stats().reads != reads {
                reads = stream.stats().reads;
                read_at.push(tick);
            }
        }
        assert!(stream.is_exhausted());
    }

    assert_eq!(read_at, [385, 897, 1409, 1921, 2433, 2945, 3457]);
    assert_eq!(source.offsets.len(), 8);
}

#[test]
fn single_region_asset() {
    let mut source = CountingSource::new(asset(512, 9));
    let mut units = 0;
    {
        let mut stream =
            StreamingPrefetcher::new("peaks", &mut source, StreamConfig::peaks()).unwrap();
        while stream.current_unit().is_some() {
            units += 1;
            stream.on_tick();
        }
        assert_eq!(stream.stats().ticks, 512);
    }
    assert_eq!(units, 512);
    assert_eq!(source.offsets, [0]);
}
