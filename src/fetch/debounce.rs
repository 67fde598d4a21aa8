//! Trailing-edge debounce
//!
//! A `DebounceSlot` tracks the one call per key that is waiting out its quiet
//! window. Scheduling again cancels the waiting call first, so only the last
//! call of a burst fires.

use std::time::Duration;

use tokio_util::sync::CancellationToken;

/// Handle to a call waiting out its quiet window
#[derive(Debug)]
struct ScheduledCall {
    ticket: u64,
    token: CancellationToken,
}

/// The waiting call for one key, if any
#[derive(Debug, Default)]
pub struct DebounceSlot {
    next_ticket: u64,
    scheduled: Option<ScheduledCall>,
}

impl DebounceSlot {
    /// Schedule a new call, cancelling the one still waiting
    ///
    /// Returns the ticket identifying the new call and the token its waiter
    /// must watch.
    pub fn schedule(&mut self) -> (u64, CancellationToken) {
        if let Some(previous) = self.scheduled.take() {
            previous.token.cancel();
            log::debug!("Superseded debounced call {}", previous.ticket);
        }

        self.next_ticket = self.next_ticket.wrapping_add(1);
        let token = CancellationToken::new();
        self.scheduled = Some(ScheduledCall {
            ticket: self.next_ticket,
            token: token.clone(),
        });
        (self.next_ticket, token)
    }

    /// Cancel the waiting call
    ///
    /// Returns true if a call was waiting.
    pub fn cancel(&mut self) -> bool {
        match self.scheduled.take() {
            Some(call) => {
                call.token.cancel();
                true
            }
            None => false,
        }
    }

    /// Claim the waiting call for firing
    ///
    /// Succeeds only if `ticket` is still the waiting call; the slot is empty
    /// afterwards.
    pub fn take_if_current(&mut self, ticket: u64) -> bool {
        match &self.scheduled {
            Some(call) if call.ticket == ticket && !call.token.is_cancelled() => {
                self.scheduled = None;
                true
            }
            _ => false,
        }
    }

    pub fn is_scheduled(&self) -> bool {
        self.scheduled.is_some()
    }
}

/// Wait out the quiet window
///
/// Returns false if the token was cancelled first.
pub async fn quiet_window_elapsed(token: &CancellationToken, window: Duration) -> bool {
    tokio::select! {
        biased;
        _ = token.cancelled() => false,
        _ = tokio::time::sleep(window) => true,
    }
}

#[cfg(test)]
#[path = "debounce_tests.rs"]
mod debounce_tests;
