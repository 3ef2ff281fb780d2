//! Explicit tick fan-out.
//!
//! There is no global tick source: the owner of the timer (a display refresh
//! interrupt, a playback clock, a test loop) holds a [`TickDriver`] and calls
//! [`TickDriver::fire`] once per tick. Handlers run in attach order.

use crate::compat::Vec;
use crate::prefetch::StreamingPrefetcher;
use crate::source::BlockSource;

/// Something that advances once per tick.
pub trait TickHandler {
    fn on_tick(&mut self);
}

impl<S: BlockSource> TickHandler for StreamingPrefetcher<S> {
    fn on_tick(&mut self) {
        StreamingPrefetcher::on_tick(self);
    }
}

/// A consumer bound to its stream: renders the current unit, then advances.
///
/// `render` receives `None` on ticks with no output (stream unavailable,
/// exhausted, or not yet primed).
pub struct RenderStage<S: BlockSource, F> {
    stream: StreamingPrefetcher<S>,
    render: F,
}

impl<S, F> RenderStage<S, F>
where
    S: BlockSource,
    F: FnMut(Option<&[u8]>),
{
    pub fn new(stream: StreamingPrefetcher<S>, render: F) -> Self {
        Self { stream, render }
    }

    pub fn prefetcher(&self) -> &StreamingPrefetcher<S> {
        &self.stream
    }

    pub fn prefetcher_mut(&mut self) -> &mut StreamingPrefetcher<S> {
        &mut self.stream
    }

    pub fn into_inner(self) -> StreamingPrefetcher<S> {
        self.stream
    }
}

impl<S, F> TickHandler for RenderStage<S, F>
where
    S: BlockSource,
    F: FnMut(Option<&[u8]>),
{
    fn on_tick(&mut self) {
        (self.render)(self.stream.current_unit());
        self.stream.on_tick();
    }
}

/// Delivers each tick to every attached handler, in attach order.
#[derive(Default)]
pub struct TickDriver<'a> {
    handlers: Vec<&'a mut dyn TickHandler>,
    ticks: u64,
}

impl<'a> TickDriver<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attach(&mut self, handler: &'a mut dyn TickHandler) -> &mut Self {
        self.handlers.push(handler);
        self
    }

    /// Fire one tick.
    pub fn fire(&mut self) {
        self.ticks += 1;
        for handler in self.handlers.iter_mut() {
            handler.on_tick();
        }
    }

    /// Fire `count` ticks back to back.
    pub fn run(&mut self, count: u64) {
        for _ in 0..count {
            self.fire();
        }
    }

    /// Ticks fired so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl core::fmt::Debug for TickDriver<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("TickDriver")
            .field("handlers", &self.handlers.len())
            .field("ticks", &self.ticks)
            .finish()
    }
}
