//! Opening assets by identifier under a root directory.

use std::path::{Component, Path, PathBuf};

use tickstream_core::{OpenSource, SourceError};

use crate::error::{Error, Result};
use crate::file::FileSource;

/// Opens [`FileSource`]s by relative identifier, e.g. `"LYRA2/peaks.bin"`.
///
/// Identifiers are `/`-separated paths relative to the root. Absolute paths
/// and `..` components are rejected.
#[derive(Debug, Clone)]
pub struct AssetDir {
    root: PathBuf,
}

impl AssetDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Map an identifier to a path under the root, without touching the disk.
    pub fn resolve(&self, identifier: &str) -> Result<PathBuf> {
        let relative = Path::new(identifier);
        let contained = relative
            .components()
            .all(|component| matches!(component, Component::Normal(_) | Component::CurDir));
        if identifier.is_empty() || !contained {
            return Err(Error::InvalidIdentifier(identifier.to_owned()));
        }
        Ok(self.root.join(relative))
    }

    /// Open `identifier` as a [`FileSource`].
    pub fn open_file(&self, identifier: &str) -> Result<FileSource> {
        let path = self.resolve(identifier)?;
        if !path.is_file() {
            return Err(Error::NotFound(path));
        }
        FileSource::open(&path)
    }
}

impl OpenSource for AssetDir {
    type Source = FileSource;

    fn open(&mut self, identifier: &str) -> std::result::Result<FileSource, SourceError> {
        self.open_file(identifier).map_err(SourceError::from)
    }
}
