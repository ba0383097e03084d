//! Headless autocomplete controller.
//!
//! [`Autocomplete`] wires the selection state, the debounce gate, the
//! latest-wins cell, and a [`SuggestionSource`] together on the tokio runtime.
//! Each edit spawns a debounce task; a settled, focused edit spawns one fetch;
//! only the newest fetch may write results back.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::debounce::DebounceGate;
use crate::fetch::{fetch_suggestions, SuggestionSource};
use crate::latest::LatestWins;
use crate::route::Route;
use crate::selection::{Key, KeyOutcome, SearchState};
use crate::types::{SearchView, Suggestion};

struct Inner {
    state: SearchState,
    gate: DebounceGate,
    latest: LatestWins,
    suggestions: Vec<Suggestion>,
    suggestions_for: String,
    route: Route,
}

impl Inner {
    fn drop_results(&mut self) {
        self.gate.reset();
        self.latest.invalidate();
        self.suggestions.clear();
        self.suggestions_for.clear();
        self.state.set_rendered(0);
    }
}

/// Search bar controller. Cheap to clone; clones share one session.
/// Methods that spawn work must be called from within a tokio runtime.
pub struct Autocomplete<S: SuggestionSource> {
    source: Arc<S>,
    inner: Arc<Mutex<Inner>>,
}

impl<S: SuggestionSource> Clone for Autocomplete<S> {
    fn clone(&self) -> Self {
        Self { source: Arc::clone(&self.source), inner: Arc::clone(&self.inner) }
    }
}

impl<S: SuggestionSource> Autocomplete<S> {
    pub fn new(source: S, quiet: Duration) -> Self {
        Self::at_route(source, quiet, Route::Home)
    }

    /// Session opened on `route`; a community route starts scoped.
    pub fn at_route(source: S, quiet: Duration, route: Route) -> Self {
        let inner = Inner {
            state: SearchState::from_route(&route),
            gate: DebounceGate::new(quiet),
            latest: LatestWins::new(),
            suggestions: Vec::new(),
            suggestions_for: String::new(),
            route,
        };
        Self { source: Arc::new(source), inner: Arc::new(Mutex::new(inner)) }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// The query text changed. Returns the debounce task, if one was started.
    pub fn input(&self, text: &str) -> Option<JoinHandle<()>> {
        let mut inner = self.lock();
        if !inner.state.input(text) {
            return None;
        }
        if text.trim().is_empty() {
            inner.drop_results();
            return None;
        }

        let ticket = inner.gate.edit(text);
        let quiet = inner.gate.quiet();
        drop(inner);

        let this = self.clone();
        Some(tokio::spawn(async move {
            tokio::time::sleep(quiet).await;
            let mut inner = this.lock();
            if let Some(query) = inner.gate.settle(&ticket) {
                this.dispatch(&mut inner, query);
            }
        }))
    }

    /// Input gained focus; a settled query that was held back is fetched now.
    pub fn focus(&self) {
        let mut inner = self.lock();
        inner.state.focus();
        if let Some(query) = inner.gate.focus() {
            self.dispatch(&mut inner, query);
        }
    }

    /// Keyboard focus left the input. In-flight requests still complete.
    pub fn blur(&self) {
        let mut inner = self.lock();
        inner.state.blur();
        inner.gate.blur();
    }

    pub fn click_outside(&self) {
        let mut inner = self.lock();
        inner.state.click_outside();
        inner.gate.blur();
    }

    pub fn key(&self, key: Key) -> KeyOutcome {
        let mut inner = self.lock();
        let suggestions = inner.suggestions.clone();
        let outcome = inner.state.key(key, &suggestions);
        match &outcome {
            KeyOutcome::Navigate(route) => Self::navigated(&mut inner, route.clone()),
            KeyOutcome::ScopeCleared if inner.route.scope().is_some() => {
                inner.route = Route::Home;
            }
            _ => {}
        }
        outcome
    }

    /// Choose the suggestion at `index` in the current list.
    pub fn select(&self, index: usize) -> Option<Route> {
        let item = self.lock().suggestions.get(index).cloned()?;
        self.select_item(&item)
    }

    pub fn select_item(&self, item: &Suggestion) -> Option<Route> {
        let mut inner = self.lock();
        let route = inner.state.select(item)?;
        Self::navigated(&mut inner, route.clone());
        Some(route)
    }

    /// Clear button.
    pub fn clear(&self) {
        let mut inner = self.lock();
        inner.state.clear();
        inner.drop_results();
        if inner.route.scope().is_some() {
            inner.route = Route::Home;
        }
    }

    /// External navigation (back button, deep link).
    pub fn navigate(&self, route: Route) {
        let mut inner = self.lock();
        inner.state.apply_route(&route);
        Self::navigated(&mut inner, route);
    }

    pub fn route(&self) -> Route {
        self.lock().route.clone()
    }

    pub fn snapshot(&self) -> SearchView {
        let inner = self.lock();
        SearchView {
            query: inner.state.query().to_string(),
            scope: inner.state.scope().map(str::to_string),
            highlighted: inner.state.highlighted(),
            focused: inner.state.is_focused(),
            open: inner.state.is_open(),
            suggestions: inner.suggestions.clone(),
            suggestions_for: inner.suggestions_for.clone(),
            pending: inner.latest.is_pending(),
        }
    }

    fn navigated(inner: &mut Inner, route: Route) {
        debug!(route = %route, "Navigating");
        inner.drop_results();
        inner.route = route;
    }

    /// Issue a fetch for `query`. The lock is held while the task is spawned
    /// and tracked, so the task cannot report back before it is registered.
    fn dispatch(&self, inner: &mut Inner, query: String) {
        let id = inner.latest.issue();
        // The list is hidden until this fetch lands; keys must not act on old rows.
        inner.state.set_rendered(0);
        debug!(id = id.get(), query = query.as_str(), "Dispatching suggestion fetch");

        let source = Arc::clone(&self.source);
        let shared = Arc::clone(&self.inner);
        let task = tokio::spawn(async move {
            let result = fetch_suggestions(&*source, &query).await;
            let mut inner = shared.lock().unwrap_or_else(PoisonError::into_inner);
            if !inner.latest.accept(id) {
                return;
            }
            let suggestions = result.unwrap_or_else(|e| {
                warn!(error = %e, query = query.as_str(), "Suggestion fetch failed");
                Vec::new()
            });
            inner.state.set_rendered(suggestions.len());
            inner.suggestions = suggestions;
            inner.suggestions_for = query;
        });
        inner.latest.track(id, task.abort_handle());
    }
}
