//! Fixed-capacity chunk buffer with per-chunk ready state.

use crate::compat::{format, vec, Box};
use crate::error::{Error, Result};

/// Upper bound on chunks per buffer; the ready set is a 64-bit mask.
pub const MAX_CHUNKS: usize = 64;

/// A byte buffer split into `chunk_count` equal chunks.
///
/// Storage is allocated once in [`ChunkBuffer::new`] and never reallocated.
/// A chunk is ready only after a refill wrote it; the single-writer
/// single-reader discipline comes from tick ordering, not from this type.
#[derive(Debug)]
pub struct ChunkBuffer {
    storage: Box<[u8]>,
    chunk_size: usize,
    chunk_count: usize,
    ready: u64,
    /// Valid bytes per chunk. Equal to `chunk_size` except after a short read.
    filled: Box<[usize]>,
}

impl ChunkBuffer {
    pub fn new(chunk_count: usize, chunk_size: usize) -> Result<Self> {
        if !(2..=MAX_CHUNKS).contains(&chunk_count) {
            return Err(Error::InvalidConfig(format!(
                "chunk_count must be between 2 and {MAX_CHUNKS}, got {chunk_count}"
            )));
        }
        if chunk_size == 0 {
            return Err(Error::InvalidConfig("chunk_size must be non-zero".into()));
        }
        let capacity = chunk_count.checked_mul(chunk_size).ok_or_else(|| {
            Error::InvalidConfig(format!(
                "{chunk_count} chunks of {chunk_size} bytes overflow usize"
            ))
        })?;

        Ok(Self {
            storage: vec![0u8; capacity].into_boxed_slice(),
            chunk_size,
            chunk_count,
            ready: 0,
            filled: vec![0usize; chunk_count].into_boxed_slice(),
        })
    }

    pub fn capacity(&self) -> usize {
        self.storage.len()
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    pub fn chunk_count(&self) -> usize {
        self.chunk_count
    }

    /// Mark chunk `index` as holding fresh data.
    ///
    /// # Panics
    ///
    /// Panics if `index >= chunk_count`.
    pub fn mark_ready(&mut self, index: usize) {
        assert!(index < self.chunk_count, "chunk index {index} out of range");
        self.ready |= 1 << index;
    }

    /// # Panics
    ///
    /// Panics if `index >= chunk_count`.
    pub fn clear_ready(&mut self, index: usize) {
        assert!(index < self.chunk_count, "chunk index {index} out of range");
        self.ready &= !(1 << index);
    }

    pub fn is_ready(&self, index: usize) -> bool {
        index < self.chunk_count && self.ready & (1 << index) != 0
    }

    /// True when every chunk is ready.
    pub fn all_ready(&self) -> bool {
        self.ready.count_ones() as usize == self.chunk_count
    }

    /// Number of valid bytes in chunk `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= chunk_count`.
    pub fn filled(&self, index: usize) -> usize {
        self.filled[index]
    }

    pub(crate) fn set_filled(&mut self, index: usize, len: usize) {
        self.filled[index] = len.min(self.chunk_size);
    }

    /// View of the valid bytes of chunk `index`.
    ///
    /// Do not hold on to the view past the next refill of that chunk.
    ///
    /// # Panics
    ///
    /// Panics if `index >= chunk_count`.
    pub fn chunk(&self, index: usize) -> &[u8] {
        let start = index * self.chunk_size;
        &self.storage[start..start + self.filled[index]]
    }

    /// The whole writable chunk `index`, regardless of fill state.
    ///
    /// # Panics
    ///
    /// Panics if `index >= chunk_count`.
    pub fn chunk_mut(&mut self, index: usize) -> &mut [u8] {
        assert!(index < self.chunk_count, "chunk index {index} out of range");
        let start = index * self.chunk_size;
        &mut self.storage[start..start + self.chunk_size]
    }

    /// The entire storage as one contiguous frame.
    pub fn frame(&self) -> &[u8] {
        &self.storage
    }

    /// Drop all ready state. Contents are left in place.
    pub fn reset(&mut self) {
        self.ready = 0;
        self.filled.iter_mut().for_each(|len| *len = 0);
    }
}
