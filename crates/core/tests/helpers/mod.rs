//! Test doubles for autocomplete integration tests.
//!
//! `ScriptedSource` records every query it is asked for and answers after a
//! per-query delay on the tokio clock, so tests can run with paused time.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use subfind_core::{FetchError, Suggestion, SuggestionKind, SuggestionSource};

pub const QUIET: Duration = Duration::from_millis(300);
const DEFAULT_LATENCY: Duration = Duration::from_millis(20);

pub fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

#[derive(Clone, Default)]
pub struct ScriptedSource {
    calls: Arc<Mutex<Vec<String>>>,
    latency: Arc<Mutex<HashMap<String, Duration>>>,
    failing: Arc<Mutex<HashSet<String>>>,
}

impl ScriptedSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `query` only after `delay`.
    pub fn delay(&self, query: &str, delay: Duration) -> &Self {
        self.latency.lock().unwrap().insert(query.to_string(), delay);
        self
    }

    /// Answer `query` with an HTTP 503.
    pub fn fail(&self, query: &str) -> &Self {
        self.failing.lock().unwrap().insert(query.to_string());
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl SuggestionSource for ScriptedSource {
    async fn fetch(&self, query: &str) -> Result<Vec<Suggestion>, FetchError> {
        self.calls.lock().unwrap().push(query.to_string());
        let delay = self.latency.lock().unwrap().get(query).copied().unwrap_or(DEFAULT_LATENCY);
        tokio::time::sleep(delay).await;

        if self.failing.lock().unwrap().contains(query) {
            return Err(FetchError::Status(503));
        }
        let community = query.replace(' ', "");
        Ok(vec![
            Suggestion::new(
                format!("t5_{community}"),
                community.clone(),
                SuggestionKind::Community,
                format!("/r/{community}"),
            ),
            Suggestion::new(
                format!("q_{query}"),
                format!("{query} tutorial"),
                SuggestionKind::Query,
                "",
            ),
        ])
    }
}
