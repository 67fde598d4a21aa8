//! Debounced fetch cache
//!
//! Maps a request identifier to the latest result of a remote lookup. Lookups
//! go through a per-identifier trailing-edge debounce: a call fires only after
//! the quiet window passes with no newer dispatch for the same identifier.
//!
//! Nothing is ever served from cache instead of fetching. Every dispatch that
//! survives its quiet window reaches the fetcher, and the entry only remembers
//! the latest settlement so readers have something to show in the meantime.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

use super::debounce::{DebounceSlot, quiet_window_elapsed};
use super::entry::FetchEntry;
use crate::error::SearchError;
use crate::provider::Fetcher;

/// Per-identifier bookkeeping
struct Slot<T> {
    entry: FetchEntry<T>,
    debounce: DebounceSlot,
    /// Id of the most recently fired call, used to drop stale settlements
    request_id: u64,
    /// Calls that fired and have not settled yet
    in_flight: usize,
}

impl<T> Default for Slot<T> {
    fn default() -> Self {
        Self {
            entry: FetchEntry::default(),
            debounce: DebounceSlot::default(),
            request_id: 0,
            in_flight: 0,
        }
    }
}

struct Shared<F: Fetcher> {
    fetcher: F,
    quiet_window: Duration,
    slots: Mutex<HashMap<String, Slot<F::Output>>>,
    revision: watch::Sender<u64>,
}

impl<F: Fetcher> Shared<F> {
    fn lock_slots(&self) -> MutexGuard<'_, HashMap<String, Slot<F::Output>>> {
        self.slots.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn notify(&self) {
        self.revision.send_modify(|rev| *rev = rev.wrapping_add(1));
    }

    /// Wait out the quiet window, then fire and settle the call
    async fn run_scheduled(
        self: Arc<Self>,
        id: String,
        term: String,
        ticket: u64,
        token: CancellationToken,
    ) {
        if !quiet_window_elapsed(&token, self.quiet_window).await {
            log::debug!("Debounced lookup {:?} for {} dropped before firing", term, id);
            return;
        }

        let request_id = {
            let mut slots = self.lock_slots();
            let Some(slot) = slots.get_mut(&id) else {
                return;
            };
            if !slot.debounce.take_if_current(ticket) {
                return;
            }
            slot.request_id = slot.request_id.wrapping_add(1);
            slot.in_flight += 1;
            slot.entry.start_request(&term);
            slot.request_id
        };
        self.notify();
        log::debug!("Firing lookup {} for {}: {:?}", request_id, id, term);

        let result = self.fetcher.fetch(&term).await;

        {
            let mut slots = self.lock_slots();
            let Some(slot) = slots.get_mut(&id) else {
                return;
            };
            slot.in_flight = slot.in_flight.saturating_sub(1);

            if slot.request_id != request_id {
                log::debug!(
                    "Ignoring stale settlement {} for {} (current: {})",
                    request_id,
                    id,
                    slot.request_id
                );
            } else {
                match result {
                    Ok(data) => slot.entry.complete_request(data),
                    Err(e) => {
                        log::warn!("Lookup {:?} for {} failed: {}", term, id, e);
                        slot.entry.set_error(e);
                    }
                }
            }
        }
        self.notify();
    }
}

/// Keyed store of the latest fetch result per request identifier
///
/// Construct one per process and share it by reference (`Arc`) with every
/// controller that needs it. `dispatch` must be able to spawn onto a tokio
/// runtime; the handle is captured at construction.
pub struct DebouncedFetchCache<F: Fetcher> {
    shared: Arc<Shared<F>>,
    runtime: Handle,
}

impl<F: Fetcher> DebouncedFetchCache<F> {
    /// Create a cache that spawns onto the current tokio runtime
    pub fn new(fetcher: F, quiet_window: Duration) -> Result<Self, SearchError> {
        let runtime = Handle::try_current().map_err(|e| SearchError::Runtime(e.to_string()))?;
        Ok(Self::with_handle(fetcher, quiet_window, runtime))
    }

    pub fn with_handle(fetcher: F, quiet_window: Duration, runtime: Handle) -> Self {
        let (revision, _) = watch::channel(0);
        Self {
            shared: Arc::new(Shared {
                fetcher,
                quiet_window,
                slots: Mutex::new(HashMap::new()),
                revision,
            }),
            runtime,
        }
    }

    pub fn quiet_window(&self) -> Duration {
        self.shared.quiet_window
    }

    /// Schedule a lookup for `term` under `id`
    ///
    /// Returns immediately. A call still waiting for the same identifier is
    /// replaced; the lookup fires once the quiet window passes without another
    /// dispatch or a `cancel_pending`.
    pub fn dispatch(&self, id: &str, term: &str) {
        let (ticket, token) = {
            let mut slots = self.shared.lock_slots();
            slots.entry(id.to_string()).or_default().debounce.schedule()
        };
        self.shared.notify();
        log::debug!("Scheduled lookup {:?} for {} (ticket {})", term, id, ticket);

        let shared = Arc::clone(&self.shared);
        let id = id.to_string();
        let term = term.to_string();
        self.runtime.spawn(shared.run_scheduled(id, term, ticket, token));
    }

    /// Cancel the call waiting out its quiet window for `id`
    ///
    /// Calls already sent are not affected.
    pub fn cancel_pending(&self, id: &str) {
        let cancelled = {
            let mut slots = self.shared.lock_slots();
            slots
                .get_mut(id)
                .map(|slot| slot.debounce.cancel())
                .unwrap_or(false)
        };
        if cancelled {
            log::debug!("Cancelled pending lookup for {}", id);
            self.shared.notify();
        }
    }

    /// Snapshot of the entry for `id`
    ///
    /// Unknown identifiers read as an unstarted, empty entry.
    pub fn read(&self, id: &str) -> FetchEntry<F::Output> {
        self.shared
            .lock_slots()
            .get(id)
            .map(|slot| slot.entry.clone())
            .unwrap_or_default()
    }

    /// Whether a call for `id` is waiting to fire or has not settled
    pub fn is_busy(&self, id: &str) -> bool {
        self.shared
            .lock_slots()
            .get(id)
            .is_some_and(|slot| slot.debounce.is_scheduled() || slot.in_flight > 0)
    }

    /// Revision counter, bumped whenever an entry or its waiting call changes
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.shared.revision.subscribe()
    }

    /// Wait until nothing is scheduled or in flight for `id`
    pub async fn settled(&self, id: &str) {
        let mut revisions = self.subscribe();
        while self.is_busy(id) {
            if revisions.changed().await.is_err() {
                return;
            }
        }
    }
}

impl<F: Fetcher> Drop for DebouncedFetchCache<F> {
    fn drop(&mut self) {
        let mut slots = self.shared.lock_slots();
        for slot in slots.values_mut() {
            slot.debounce.cancel();
        }
    }
}

impl<F: Fetcher> std::fmt::Debug for DebouncedFetchCache<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DebouncedFetchCache")
            .field("quiet_window", &self.shared.quiet_window)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "cache_tests.rs"]
mod cache_tests;
