//! A block source over one open file.

use std::fs::File;
use std::io::{ErrorKind, Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};

use tickstream_core::{BlockSource, SourceError};
use tracing::debug;

use crate::error::Result;

/// A [`BlockSource`] reading from a file.
///
/// The size is taken from the file's metadata when it is opened and does not
/// follow later writes. Each `read` fills the request unless the file ends
/// first, so a short read always means end of data.
#[derive(Debug)]
pub struct FileSource {
    file: Option<File>,
    path: PathBuf,
    size: u64,
}

impl FileSource {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        Self::from_file(file, path)
    }

    /// Wrap an already open file. `path` is kept for diagnostics only.
    pub fn from_file(file: File, path: impl Into<PathBuf>) -> Result<Self> {
        let size = file.metadata()?.len();
        let path = path.into();
        debug!(path = %path.display(), size, "opened file source");

        Ok(Self {
            file: Some(file),
            path,
            size,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_open(&self) -> bool {
        self.file.is_some()
    }

    fn file_mut(&mut self) -> std::result::Result<&mut File, SourceError> {
        self.file.as_mut().ok_or(SourceError::Closed)
    }
}

impl BlockSource for FileSource {
    fn size(&self) -> u64 {
        self.size
    }

    fn seek(&mut self, offset: u64) -> std::result::Result<(), SourceError> {
        let size = self.size;
        if offset > size {
            return Err(SourceError::SeekOutOfRange { offset, size });
        }
        self.file_mut()?
            .seek(SeekFrom::Start(offset))
            .map_err(|err| SourceError::Read(err.to_string()))?;
        Ok(())
    }

    fn read(&mut self, buf: &mut [u8]) -> std::result::Result<usize, SourceError> {
        let file = self.file_mut()?;
        let mut total = 0;
        while total < buf.len() {
            match file.read(&mut buf[total..]) {
                Ok(0) => break,
                Ok(n) => total += n,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => return Err(SourceError::Read(err.to_string())),
            }
        }
        Ok(total)
    }

    fn close(&mut self) {
        if self.file.take().is_some() {
            debug!(path = %self.path.display(), "closed file source");
        }
    }
}
