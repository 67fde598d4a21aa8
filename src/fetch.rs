//! Keyed fetch cache with debounced dispatch

mod cache;
mod debounce;
mod entry;

pub use cache::DebouncedFetchCache;
pub use entry::{FetchEntry, FetchState};
