//! Site vertical search input
//!
//! Turns every keystroke into a selection value and decides whether the
//! keystroke warrants a remote lookup. The selection is always computed
//! synchronously from whatever suggestions are cached at that moment; the list
//! catches up once the debounced lookup settles.

use std::fmt;
use std::sync::Arc;

use crate::config::SearchConfig;
use crate::config::types::DEFAULT_MIN_CHARS_TO_SEARCH;
use crate::fetch::DebouncedFetchCache;
use crate::provider::Fetcher;
use crate::suggestion::Suggestion;

/// Request identifier shared by every site vertical search box
pub const SITE_VERTICALS_REQUEST_ID: &str = "site-verticals-search-results";

/// Callback receiving the selection computed for each keystroke
pub type OnChange = Box<dyn FnMut(&Suggestion) + Send>;

/// Per-control input state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchSession {
    /// Raw text as typed, for display
    pub current_text: String,
    pub min_chars_to_search: usize,
}

impl SearchSession {
    pub fn new(min_chars_to_search: usize) -> Self {
        Self {
            current_text: String::new(),
            min_chars_to_search,
        }
    }

    /// Whether trimmed text is long enough to search for
    ///
    /// Length is counted in characters. Empty text never qualifies.
    pub fn qualifies(&self, trimmed: &str) -> bool {
        !trimmed.is_empty() && trimmed.chars().count() >= self.min_chars_to_search
    }
}

impl Default for SearchSession {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_CHARS_TO_SEARCH)
    }
}

/// Controller behind one site vertical search box
pub struct SearchInputController<F>
where
    F: Fetcher<Output = Vec<Suggestion>>,
{
    cache: Arc<DebouncedFetchCache<F>>,
    request_id: String,
    session: SearchSession,
    on_change: OnChange,
}

impl<F> SearchInputController<F>
where
    F: Fetcher<Output = Vec<Suggestion>>,
{
    pub fn new(cache: Arc<DebouncedFetchCache<F>>, min_chars_to_search: usize) -> Self {
        Self {
            cache,
            request_id: SITE_VERTICALS_REQUEST_ID.to_string(),
            session: SearchSession::new(min_chars_to_search),
            on_change: Box::new(|_| {}),
        }
    }

    pub fn from_config(cache: Arc<DebouncedFetchCache<F>>, config: &SearchConfig) -> Self {
        Self::new(cache, config.min_chars_to_search)
    }

    /// Text shown in the box before the first keystroke
    pub fn with_initial_value(mut self, value: &str) -> Self {
        self.session.current_text = value.to_string();
        self
    }

    pub fn with_on_change(mut self, on_change: impl FnMut(&Suggestion) + Send + 'static) -> Self {
        self.on_change = Box::new(on_change);
        self
    }

    /// Use a different cache identifier than the shared site verticals one
    pub fn with_request_id(mut self, request_id: &str) -> Self {
        self.request_id = request_id.to_string();
        self
    }

    /// Handle a change of the box's text
    ///
    /// Cancels a waiting lookup when the text becomes too short, dispatches a
    /// lookup unless the text already names a canonical suggestion, then emits
    /// and returns the selection: the first known suggestion named exactly like
    /// the trimmed text, or a synthesized user-input suggestion.
    pub fn on_text_changed(&mut self, raw_text: &str) -> Suggestion {
        let value = raw_text.trim();
        let known = self.known_suggestions();

        if !self.session.qualifies(value) {
            self.cache.cancel_pending(&self.request_id);
        }

        if self.session.qualifies(value)
            && !known.iter().any(|s| s.name == value && s.is_canonical())
        {
            self.cache.dispatch(&self.request_id, value);
        }

        self.session.current_text = raw_text.to_string();

        let selection = known
            .into_iter()
            .find(|s| s.name == value)
            .unwrap_or_else(|| Suggestion::user_input(value));

        (self.on_change)(&selection);
        selection
    }

    /// Suggestions from the latest successful lookup, in server order
    pub fn known_suggestions(&self) -> Vec<Suggestion> {
        self.cache.read(&self.request_id).data.unwrap_or_default()
    }

    /// Names to list under the box
    pub fn suggestion_names(&self) -> Vec<String> {
        self.known_suggestions().into_iter().map(|s| s.name).collect()
    }

    pub fn is_search_pending(&self) -> bool {
        self.cache.read(&self.request_id).is_pending()
    }

    pub fn current_text(&self) -> &str {
        &self.session.current_text
    }

    pub fn session(&self) -> &SearchSession {
        &self.session
    }

    pub fn request_id(&self) -> &str {
        &self.request_id
    }

    pub fn cache(&self) -> &Arc<DebouncedFetchCache<F>> {
        &self.cache
    }
}

impl<F> fmt::Debug for SearchInputController<F>
where
    F: Fetcher<Output = Vec<Suggestion>>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SearchInputController")
            .field("request_id", &self.request_id)
            .field("session", &self.session)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "controller_tests.rs"]
mod controller_tests;
