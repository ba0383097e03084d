//! Global application state using Dioxus signals.

use std::sync::OnceLock;

use dioxus::core::Task;
use dioxus::prelude::*;
use subfind_core::latest::Cancel;
use subfind_core::{HttpSuggestionSource, Route, SearchState, Suggestion};

/// Suggestions client — built from the environment before Dioxus launches.
pub static SOURCE: OnceLock<HttpSuggestionSource> = OnceLock::new();

/// Route the app was opened on (deep link), consumed on first render.
pub static INITIAL_ROUTE: OnceLock<Route> = OnceLock::new();

// ---------------------------------------------------------------------------
// Global signals
// ---------------------------------------------------------------------------

/// Current route
pub static ROUTE: GlobalSignal<Route> = Signal::global(|| Route::Home);

/// Search bar query, scope chip, highlight, and open/focus flags
pub static SEARCH: GlobalSignal<SearchState> = Signal::global(SearchState::new);

/// Suggestions from the latest accepted fetch
pub static SUGGESTIONS: GlobalSignal<Vec<Suggestion>> = Signal::global(Vec::new);

/// Query the current suggestions were fetched for
pub static SUGGESTIONS_FOR: GlobalSignal<String> = Signal::global(String::new);

/// A suggestion fetch is outstanding
pub static PENDING: GlobalSignal<bool> = Signal::global(|| false);

/// Set by the landing page's error-boundary demo button
pub static SHOULD_THROW: GlobalSignal<bool> = Signal::global(|| false);

/// Navigate to `route`; the search bar's scope chip follows it.
pub fn navigate(route: Route) {
    tracing::debug!(route = %route, "Navigating");
    SEARCH.write().apply_route(&route);
    *ROUTE.write() = route;
}

/// Drop the current suggestions and any loading indicator.
pub fn clear_suggestions() {
    SUGGESTIONS.write().clear();
    SUGGESTIONS_FOR.write().clear();
    SEARCH.write().set_rendered(0);
    *PENDING.write() = false;
}

/// Dioxus task serving a suggestion fetch.
pub struct TaskHandle(pub Task);

impl Cancel for TaskHandle {
    fn cancel(self) {
        self.0.cancel();
    }
}
