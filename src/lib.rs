//! Debounced site-vertical suggestion search
//!
//! [`SearchInputController`] turns each change of a search box into a
//! [`Suggestion`] and decides when to look the text up remotely.
//! [`DebouncedFetchCache`] collapses bursts of lookups into one call per quiet
//! window and keeps the latest result per request identifier.

pub mod config;
pub mod error;
pub mod fetch;
pub mod provider;
pub mod search;
pub mod suggestion;

#[cfg(test)]
mod test_utils;

pub use error::SearchError;
pub use fetch::{DebouncedFetchCache, FetchEntry, FetchState};
pub use provider::{FetchError, Fetcher, VerticalsClient};
pub use search::{SITE_VERTICALS_REQUEST_ID, SearchInputController, SearchSession};
pub use suggestion::{Suggestion, VerticalRecord, validate_site_vertical};
