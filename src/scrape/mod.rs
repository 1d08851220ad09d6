// src/scrape/mod.rs
pub mod wait;
pub mod walker;

pub use wait::WaitPolicy;
pub use walker::{page_offsets, PageCursor, PageWalker, RowRef, WalkStats};
