//! Stream lifecycle states.

/// Where a [`StreamingPrefetcher`](super::StreamingPrefetcher) is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamState {
    /// Opened; the first chunk or superframe has not been read yet.
    Priming,
    /// Data is flowing. The source may already be closed while ready chunks drain.
    Streaming,
    /// All delivered data has been consumed. Terminal.
    Exhausted,
    /// The source could not be opened. Terminal.
    Unavailable,
}

impl StreamState {
    /// True for states in which `on_tick` does nothing.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Exhausted | Self::Unavailable)
    }
}

/// Why a stream stopped reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndReason {
    /// The cursor reached the end of the source.
    EndOfData,
    /// A read returned fewer bytes than requested before the declared end.
    ShortRead,
    /// A seek or read failed.
    ReadFailed,
    /// The owner tore the stream down.
    Closed,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_states() {
        assert!(!StreamState::Priming.is_terminal());
        assert!(!StreamState::Streaming.is_terminal());
        assert!(StreamState::Exhausted.is_terminal());
        assert!(StreamState::Unavailable.is_terminal());
    }
}
