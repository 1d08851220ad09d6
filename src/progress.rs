// src/progress.rs
/// Lightweight progress reporting for the page walk.
/// Frontends implement this to surface status to users.
pub trait Progress {
    /// Called once the number of pages is known.
    fn begin(&mut self, _pages: usize) {}

    /// Called after every row of the page at `offset` was handed over.
    fn page_done(&mut self, _offset: usize, _rows: usize) {}

    /// Called at the end of a complete walk.
    fn finish(&mut self) {}
}

/// A no-op progress sink.
pub struct NullProgress;
impl Progress for NullProgress {}
