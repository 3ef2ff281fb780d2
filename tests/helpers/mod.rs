//! Test helpers and fixtures for tickstream integration tests
//!
//! Assets are written into a fresh temporary directory laid out like a mounted
//! card (`<root>/LYRA2/peaks.bin`, `<root>/LYRA2/dance.bin`).

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use tickstream::prelude::*;

/// Directory holding the assets on the card.
pub const ASSET_DIR: &str = "LYRA2";

/// Waveform peaks asset identifier.
pub const PEAKS: &str = "LYRA2/peaks.bin";

/// Dance bitmap asset identifier.
pub const DANCE: &str = "LYRA2/dance.bin";

/// Bytes in one dance frame (120x160 at 1 bit per pixel).
pub const DANCE_FRAME: usize = 2400;

/// Deterministic, non-periodic-per-chunk test bytes.
pub fn generate_asset(len: usize, seed: u64) -> Vec<u8> {
    // Simple LCG for reproducible "random" bytes
    let mut rng = seed;
    (0..len)
        .map(|_| {
            rng = rng.wrapping_mul(6364136223846793005).wrapping_add(1);
            (rng >> 56) as u8
        })
        .collect()
}

/// A card root with a `LYRA2` directory and nothing in it.
pub fn card() -> tempfile::TempDir {
    let root = tempfile::tempdir().expect("Failed to create temp dir");
    std::fs::create_dir(root.path().join(ASSET_DIR)).expect("Failed to create asset dir");
    root
}

/// Write `bytes` as `identifier` under `root` and return its path.
pub fn write_asset(root: &Path, identifier: &str, bytes: &[u8]) -> PathBuf {
    let path = root.join(identifier);
    std::fs::write(&path, bytes).expect("Failed to write asset");
    path
}

/// Tick `stream` until it stops producing units and collect everything it delivered.
pub fn drain<S: BlockSource>(stream: &mut StreamingPrefetcher<S>) -> Vec<u8> {
    let mut out = Vec::new();
    while let Some(unit) = stream.current_unit() {
        out.extend_from_slice(unit);
        stream.on_tick();
    }
    out
}

/// Install a test subscriber so stream logs show up with `--nocapture`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing_subscriber::filter::LevelFilter::DEBUG)
        .with_test_writer()
        .try_init();
}
