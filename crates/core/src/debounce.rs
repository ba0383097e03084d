//! Debounce and focus gating for suggestion fetches.
//!
//! Every edit bumps a generation counter and hands back a [`Ticket`]. The caller
//! sleeps for [`DebounceGate::quiet`] and then calls [`DebounceGate::settle`];
//! only the newest ticket settles, and a settled query is released for fetching
//! only while the input has focus.

use std::time::Duration;

use tracing::debug;

use crate::env::DEFAULT_DEBOUNCE_MS;

/// Proof of one edit. Stale once a newer edit is made.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
    generation: u64,
    query: String,
}

impl Ticket {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn query(&self) -> &str {
        &self.query
    }
}

#[derive(Debug)]
pub struct DebounceGate {
    quiet: Duration,
    generation: u64,
    focused: bool,
    /// Latest query that survived the quiet interval.
    settled: Option<String>,
    /// Last query released for fetching.
    released: Option<String>,
}

impl Default for DebounceGate {
    fn default() -> Self {
        Self::new(Duration::from_millis(DEFAULT_DEBOUNCE_MS))
    }
}

impl DebounceGate {
    pub fn new(quiet: Duration) -> Self {
        Self { quiet, generation: 0, focused: false, settled: None, released: None }
    }

    pub fn quiet(&self) -> Duration {
        self.quiet
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// Query most recently settled, if any.
    pub fn settled(&self) -> Option<&str> {
        self.settled.as_deref()
    }

    /// Record an edit. Any earlier ticket is superseded.
    pub fn edit(&mut self, query: &str) -> Ticket {
        self.generation += 1;
        Ticket { generation: self.generation, query: query.to_string() }
    }

    pub fn is_current(&self, ticket: &Ticket) -> bool {
        ticket.generation == self.generation
    }

    /// Called once the quiet interval has elapsed for `ticket`. Returns the
    /// query to fetch, or `None` if the ticket was superseded, the input is not
    /// focused, or the query is blank.
    pub fn settle(&mut self, ticket: &Ticket) -> Option<String> {
        if !self.is_current(ticket) {
            debug!(
                generation = ticket.generation,
                current = self.generation,
                "Debounce superseded"
            );
            return None;
        }
        self.settled = Some(ticket.query.clone());
        if !self.focused {
            debug!(query = ticket.query.as_str(), "Settled while unfocused, holding");
            return None;
        }
        self.release()
    }

    /// Input gained focus. Releases the settled query if it has not been
    /// fetched yet.
    pub fn focus(&mut self) -> Option<String> {
        let was_focused = std::mem::replace(&mut self.focused, true);
        if was_focused {
            return None;
        }
        self.release()
    }

    /// Input lost focus. In-flight requests are left alone.
    pub fn blur(&mut self) {
        self.focused = false;
    }

    /// Forget pending and settled input, e.g. after the query is cleared.
    pub fn reset(&mut self) {
        self.generation += 1;
        self.settled = None;
        self.released = None;
    }

    fn release(&mut self) -> Option<String> {
        let query = self.settled.as_deref()?.trim();
        if query.is_empty() {
            self.released = None;
            return None;
        }
        if self.released.as_deref() == Some(query) {
            return None;
        }
        let query = query.to_string();
        self.released = Some(query.clone());
        Some(query)
    }
}
