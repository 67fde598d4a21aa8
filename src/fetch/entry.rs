//! Fetch entry state
//!
//! One `FetchEntry` exists per request identifier and is overwritten in place by
//! every call that fires under that identifier.

use crate::provider::FetchError;

/// Lifecycle of the most recent call for an identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FetchState {
    /// No call has fired yet
    #[default]
    Unstarted,
    /// A call has been sent and has not settled
    Pending,
    /// The latest call returned data
    Success,
    /// The latest call failed; `data` still holds the last good value
    Error,
}

impl FetchState {
    pub fn as_str(&self) -> &'static str {
        match self {
            FetchState::Unstarted => "unstarted",
            FetchState::Pending => "pending",
            FetchState::Success => "success",
            FetchState::Error => "error",
        }
    }
}

/// Latest fetch result for one request identifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchEntry<T> {
    pub state: FetchState,
    pub data: Option<T>,
    /// Query term of the most recent call that fired
    pub last_query_term: Option<String>,
    /// Error from the latest call, if it failed
    pub error: Option<FetchError>,
}

impl<T> Default for FetchEntry<T> {
    fn default() -> Self {
        Self {
            state: FetchState::Unstarted,
            data: None,
            last_query_term: None,
            error: None,
        }
    }
}

impl<T> FetchEntry<T> {
    /// Mark a call as sent for `term`
    ///
    /// Data from earlier calls is kept so readers can keep showing it.
    pub fn start_request(&mut self, term: &str) {
        self.state = FetchState::Pending;
        self.last_query_term = Some(term.to_string());
        self.error = None;
    }

    /// Store the data from a successful call
    pub fn complete_request(&mut self, data: T) {
        self.state = FetchState::Success;
        self.data = Some(data);
        self.error = None;
    }

    /// Record a failure without touching `data`
    pub fn set_error(&mut self, error: FetchError) {
        self.state = FetchState::Error;
        self.error = Some(error);
    }

    pub fn is_pending(&self) -> bool {
        self.state == FetchState::Pending
    }
}
