//! Block storage abstraction consumed by the prefetcher.
//!
//! A [`BlockSource`] is a seekable, sized, readable byte store: a file on an
//! SD card, a flash partition, or an in-memory asset. The prefetcher issues
//! every seek itself and clamps offsets to [`BlockSource::size`], so
//! implementations may reject out-of-range seeks.

use crate::compat::String;
use crate::error::SourceError;

/// A seekable, sized, readable byte store.
pub trait BlockSource {
    /// Total length in bytes. Fixed for the lifetime of the source.
    fn size(&self) -> u64;

    /// Reposition the read head. `offset` must not exceed [`size`](Self::size).
    fn seek(&mut self, offset: u64) -> Result<(), SourceError>;

    /// Read up to `buf.len()` bytes at the current position.
    ///
    /// Returning fewer bytes than requested signals end of data; it is not an
    /// error. `Ok(0)` means nothing is left.
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, SourceError>;

    /// Release the underlying handle. Must be idempotent.
    fn close(&mut self) {}
}

impl<T: BlockSource + ?Sized> BlockSource for &mut T {
    fn size(&self) -> u64 {
        (**self).size()
    }

    fn seek(&mut self, offset: u64) -> Result<(), SourceError> {
        (**self).seek(offset)
    }

    fn read(&mut self, buf: &mut [u8]) -> Result<usize, SourceError> {
        (**self).read(buf)
    }

    fn close(&mut self) {
        (**self).close();
    }
}

impl<T: BlockSource + ?Sized> BlockSource for crate::compat::Box<T> {
    fn size(&self) -> u64 {
        (**self).size()
    }

    fn seek(&mut self, offset: u64) -> Result<(), SourceError> {
        (**self).seek(offset)
    }

    fn read(&mut self, buf: &mut [u8]) -> Result<usize, SourceError> {
        (**self).read(buf)
    }

    fn close(&mut self) {
        (**self).close();
    }
}

/// Opens named block sources, e.g. files relative to a mounted volume.
pub trait OpenSource {
    type Source: BlockSource;

    /// Open `identifier`. Fails if the store is absent or unreadable.
    fn open(&mut self, identifier: &str) -> Result<Self::Source, SourceError>;
}

/// A [`BlockSource`] over bytes already in memory.
#[derive(Debug, Clone)]
pub struct MemorySource<B> {
    data: B,
    position: u64,
    closed: bool,
}

impl<B: AsRef<[u8]>> MemorySource<B> {
    pub fn new(data: B) -> Self {
        Self {
            data,
            position: 0,
            closed: false,
        }
    }

    pub fn position(&self) -> u64 {
        self.position
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn into_inner(self) -> B {
        self.data
    }
}

impl<B: AsRef<[u8]>> BlockSource for MemorySource<B> {
    fn size(&self) -> u64 {
        self.data.as_ref().len() as u64
    }

    fn seek(&mut self, offset: u64) -> Result<(), SourceError> {
        if self.closed {
            return Err(SourceError::Closed);
        }
        let size = self.size();
        if offset > size {
            return Err(SourceError::SeekOutOfRange { offset, size });
        }
        self.position = offset;
        Ok(())
    }

    fn read(&mut self, buf: &mut [u8]) -> Result<usize, SourceError> {
        if self.closed {
            return Err(SourceError::Closed);
        }
        let data = self.data.as_ref();
        let start = self.position as usize;
        let n = buf.len().min(data.len() - start);
        buf[..n].copy_from_slice(&data[start..start + n]);
        self.position += n as u64;
        Ok(n)
    }

    fn close(&mut self) {
        self.closed = true;
    }
}

/// An [`OpenSource`] that never finds anything. Streams opened through it are
/// unavailable from the start.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSource;

impl OpenSource for NoSource {
    type Source = MemorySource<&'static [u8]>;

    fn open(&mut self, identifier: &str) -> Result<Self::Source, SourceError> {
        Err(SourceError::Unavailable(String::from(identifier)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_source_reads_sequentially() {
        let mut source = MemorySource::new([1u8, 2, 3, 4, 5]);
        let mut buf = [0u8; 2];

        assert_eq!(source.read(&mut buf), Ok(2));
        assert_eq!(buf, [1, 2]);
        assert_eq!(source.read(&mut buf), Ok(2));
        assert_eq!(buf, [3, 4]);
        assert_eq!(source.position(), 4);
    }

    #[test]
    fn test_short_read_at_end() {
        let mut source = MemorySource::new([1u8, 2, 3]);
        let mut buf = [0u8; 8];

        source.seek(1).unwrap();
        assert_eq!(source.read(&mut buf), Ok(2));
        assert_eq!(&buf[..2], &[2, 3]);
        assert_eq!(source.read(&mut buf), Ok(0));
    }

    #[test]
    fn test_seek_to_end_is_allowed() {
        let mut source = MemorySource::new([0u8; 4]);
        assert!(source.seek(4).is_ok());
        assert_eq!(
            source.seek(5),
            Err(SourceError::SeekOutOfRange { offset: 5, size: 4 })
        );
    }

    #[test]
    fn test_closed_source_rejects_io() {
        let mut source = MemorySource::new([0u8; 4]);
        source.close();
        source.close();

        assert!(source.is_closed());
        assert_eq!(source.seek(0), Err(SourceError::Closed));
        assert_eq!(source.read(&mut [0u8; 1]), Err(SourceError::Closed));
    }

    fn read_one<S: BlockSource>(mut source: S) -> u8 {
        let mut buf = [0u8; 1];
        source.read(&mut buf).unwrap();
        source.close();
        buf[0]
    }

    #[test]
    fn test_borrowed_source_forwards() {
        let mut owned = MemorySource::new([9u8, 8, 7]);

        assert_eq!(read_one(&mut owned), 9);
        assert!(owned.is_closed());
        assert_eq!(owned.position(), 1);
    }

    #[test]
    fn test_no_source_is_unavailable() {
        let err = NoSource.open("LYRA2/peaks.bin").unwrap_err();
        assert_eq!(err, SourceError::Unavailable("LYRA2/peaks.bin".into()));
    }
}
