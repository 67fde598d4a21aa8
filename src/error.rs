use thiserror::Error;

/// Custom error types for vertical-search
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("Invalid site vertical: {0}")]
    InvalidVertical(String),

    #[error("No async runtime available: {0}")]
    Runtime(String),
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod error_tests;
