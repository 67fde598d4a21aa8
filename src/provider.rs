//! Remote lookup abstraction
//!
//! Defines the `Fetcher` seam the fetch cache dispatches through, the
//! `FetchError` type, and the HTTP client for the verticals endpoint.

use std::future::Future;

use thiserror::Error;

mod verticals;

pub use verticals::VerticalsClient;

/// Errors that can occur while fetching remote data
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The client could not be built from configuration
    #[error("Not configured: {0}")]
    NotConfigured(String),

    /// Network error during the request
    #[error("Network error: {0}")]
    Network(String),

    /// The API returned an error response
    #[error("API error ({code}): {message}")]
    Api { code: u16, message: String },

    /// Failed to decode the response body
    #[error("Parse error: {0}")]
    Parse(String),
}

/// A remote lookup keyed by a query term
///
/// The fetch cache is generic over this trait so the debounce and settlement
/// logic can be exercised without a network.
pub trait Fetcher: Send + Sync + 'static {
    /// Data stored in the cache entry on success
    type Output: Clone + Send + 'static;

    /// Perform one lookup for `query`
    fn fetch(&self, query: &str) -> impl Future<Output = Result<Self::Output, FetchError>> + Send;
}

#[cfg(test)]
#[path = "provider_tests.rs"]
mod provider_tests;
