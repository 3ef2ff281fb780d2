//! File-backed [`BlockSource`](tickstream_core::BlockSource)s.
//!
//! - [`FileSource`]: one open file, read in whole-block requests
//! - [`AssetDir`]: opens files relative to a root directory (a mounted card,
//!   an asset folder) by identifier

mod dir;
mod error;
mod file;

pub use dir::AssetDir;
pub use error::{Error, Result};
pub use file::FileSource;
