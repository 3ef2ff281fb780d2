//! Tick-driven prefetch over a chunk buffer.

mod prefetcher;
mod refill;
mod state;

pub use prefetcher::StreamingPrefetcher;
pub use state::{EndReason, StreamState};
