//! Search bar selection state machine.
//!
//! ```text
//!   Idle ──type──▶ Typing ──select community──▶ Scoped
//!    ▲               │                            │
//!    └──clear/home───┴──────backspace on empty────┘
//! ```
//!
//! The highlighted row is `None` or an index into the rendered suggestions,
//! and any change to the query text resets it.

use serde::Serialize;
use tracing::debug;

use crate::route::{community_name, Route};
use crate::types::{Suggestion, SuggestionKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Mode {
    /// No scope, empty query.
    Idle,
    /// Free text, no scope.
    Typing,
    /// A community chip is active; the query is the text searched within it.
    Scoped,
}

/// Keys the search bar reacts to beyond plain text entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Backspace,
    ArrowUp,
    ArrowDown,
    Enter,
    Escape,
}

/// Result of a key press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyOutcome {
    Ignored,
    Highlighted(usize),
    Closed,
    /// The scope chip was dismissed.
    ScopeCleared,
    Navigate(Route),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchState {
    query: String,
    scope: Option<String>,
    highlighted: Option<usize>,
    focused: bool,
    open: bool,
    rendered: usize,
}

impl SearchState {
    pub fn new() -> Self {
        Self::default()
    }

    /// State matching a route the app was opened on.
    pub fn from_route(route: &Route) -> Self {
        let mut state = Self::new();
        state.apply_route(route);
        state
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn scope(&self) -> Option<&str> {
        self.scope.as_deref()
    }

    pub fn highlighted(&self) -> Option<usize> {
        self.highlighted
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn mode(&self) -> Mode {
        match (&self.scope, self.query.is_empty()) {
            (Some(_), _) => Mode::Scoped,
            (None, true) => Mode::Idle,
            (None, false) => Mode::Typing,
        }
    }

    /// Replace the query text. Returns `true` if it changed.
    pub fn input(&mut self, text: &str) -> bool {
        self.highlighted = None;
        self.open = true;
        if self.query == text {
            return false;
        }
        self.query = text.to_string();
        true
    }

    /// Number of suggestions now on screen. Drops a highlight that no longer fits.
    pub fn set_rendered(&mut self, count: usize) {
        self.rendered = count;
        if self.highlighted.is_some_and(|i| i >= count) {
            self.highlighted = None;
        }
    }

    pub fn focus(&mut self) {
        self.focused = true;
        self.open = true;
    }

    /// Focus moved elsewhere without a pointer press; the list stays as it is.
    pub fn blur(&mut self) {
        self.focused = false;
    }

    /// A press landed outside the search bar: close the list, keep the text.
    pub fn click_outside(&mut self) {
        self.focused = false;
        self.open = false;
        self.highlighted = None;
    }

    /// Clear button: back to `Idle`.
    pub fn clear(&mut self) {
        self.query.clear();
        self.scope = None;
        self.highlighted = None;
    }

    pub fn key(&mut self, key: Key, suggestions: &[Suggestion]) -> KeyOutcome {
        match key {
            Key::Backspace => {
                if self.query.is_empty() && self.scope.is_some() {
                    debug!(scope = self.scope.as_deref(), "Dismissing scope chip");
                    self.scope = None;
                    self.highlighted = None;
                    KeyOutcome::ScopeCleared
                } else {
                    KeyOutcome::Ignored
                }
            }
            Key::ArrowDown | Key::ArrowUp => {
                let count = self.rendered.min(suggestions.len());
                if !self.open || count == 0 {
                    return KeyOutcome::Ignored;
                }
                let next = match (key, self.highlighted) {
                    (Key::ArrowDown, None) => 0,
                    (Key::ArrowDown, Some(i)) => (i + 1) % count,
                    (_, None) | (_, Some(0)) => count - 1,
                    (_, Some(i)) => i - 1,
                };
                self.highlighted = Some(next);
                KeyOutcome::Highlighted(next)
            }
            Key::Enter => {
                let chosen = self.highlighted.and_then(|i| suggestions.get(i)).cloned();
                let route = match chosen {
                    Some(item) if self.open => self.select(&item),
                    _ => self.submit(),
                };
                route.map_or(KeyOutcome::Ignored, KeyOutcome::Navigate)
            }
            Key::Escape => {
                if !self.open {
                    return KeyOutcome::Ignored;
                }
                self.open = false;
                self.highlighted = None;
                KeyOutcome::Closed
            }
        }
    }

    /// Apply a chosen suggestion and close the list.
    pub fn select(&mut self, item: &Suggestion) -> Option<Route> {
        let route = match item.kind {
            SuggestionKind::Community => {
                let name = community_name(&item.text).or_else(|| community_name(&item.url))?;
                self.scope = Some(name.clone());
                self.query.clear();
                Route::Community { name }
            }
            SuggestionKind::Post | SuggestionKind::Query => {
                self.query = item.text.clone();
                Route::search(self.scope.as_deref(), &item.text)
            }
        };
        debug!(id = item.id.as_str(), kind = %item.kind, route = %route, "Suggestion selected");
        self.close_after_navigation();
        Some(route)
    }

    /// Submit the typed text as a free-text search.
    pub fn submit(&mut self) -> Option<Route> {
        if self.query.trim().is_empty() {
            return None;
        }
        let route = Route::search(self.scope.as_deref(), &self.query);
        self.close_after_navigation();
        Some(route)
    }

    /// Sync with the current route: the scope chip follows the route.
    pub fn apply_route(&mut self, route: &Route) {
        match route {
            Route::Home => {
                self.query.clear();
                self.scope = None;
            }
            Route::Community { name } => {
                self.scope = Some(name.clone());
                self.query.clear();
            }
            Route::Search { scope, query } => {
                self.scope = scope.clone();
                self.query = query.clone();
            }
        }
        self.highlighted = None;
        self.open = false;
    }

    /// Focus is left alone: the input keeps it across navigation.
    fn close_after_navigation(&mut self) {
        self.highlighted = None;
        self.open = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn community(text: &str) -> Suggestion {
        Suggestion::new(format!("t5_{text}"), text, SuggestionKind::Community, format!("/r/{text}"))
    }

    fn query(text: &str) -> Suggestion {
        Suggestion::new(format!("q_{text}"), text, SuggestionKind::Query, "")
    }

    fn typed(text: &str, list: &[Suggestion]) -> SearchState {
        let mut s = SearchState::new();
        s.focus();
        s.input(text);
        s.set_rendered(list.len());
        s
    }

    #[test]
    fn modes_follow_query_and_scope() {
        let mut s = SearchState::new();
        assert_eq!(s.mode(), Mode::Idle);
        s.input("go");
        assert_eq!(s.mode(), Mode::Typing);
        s.select(&community("golang"));
        assert_eq!(s.mode(), Mode::Scoped);
        s.clear();
        assert_eq!(s.mode(), Mode::Idle);
    }

    #[test]
    fn typing_clears_highlight() {
        let list = vec![query("a"), query("b")];
        let mut s = typed("x", &list);
        assert_eq!(s.key(Key::ArrowDown, &list), KeyOutcome::Highlighted(0));
        s.input("xy");
        assert_eq!(s.highlighted(), None);
    }

    #[test]
    fn arrows_wrap_within_rendered_list() {
        let list = vec![query("a"), query("b"), query("c")];
        let mut s = typed("x", &list);
        assert_eq!(s.key(Key::ArrowUp, &list), KeyOutcome::Highlighted(2));
        assert_eq!(s.key(Key::ArrowDown, &list), KeyOutcome::Highlighted(0));
        assert_eq!(s.key(Key::ArrowDown, &list), KeyOutcome::Highlighted(1));
        assert_eq!(s.key(Key::ArrowUp, &list), KeyOutcome::Highlighted(0));
    }

    #[test]
    fn arrows_do_nothing_without_results() {
        let mut s = typed("x", &[]);
        assert_eq!(s.key(Key::ArrowDown, &[]), KeyOutcome::Ignored);
        assert_eq!(s.highlighted(), None);
    }

    #[test]
    fn shrinking_list_drops_out_of_range_highlight() {
        let list = vec![query("a"), query("b"), query("c")];
        let mut s = typed("x", &list);
        s.key(Key::ArrowUp, &list);
        s.set_rendered(1);
        assert_eq!(s.highlighted(), None);
    }

    #[test]
    fn selecting_community_scopes_and_navigates() {
        let mut s = typed("gol", &[]);
        let route = s.select(&community("golang")).unwrap();
        assert_eq!(route.path(), "/r/golang");
        assert_eq!(s.query(), "");
        assert_eq!(s.scope(), Some("golang"));
        assert!(!s.is_open());
    }

    #[test]
    fn selecting_community_falls_back_to_url() {
        let mut s = SearchState::new();
        let item = Suggestion::new(
            "1",
            "The Go Programming Language",
            SuggestionKind::Community,
            "/r/golang",
        );
        assert_eq!(s.select(&item), Some(Route::Community { name: "golang".into() }));
    }

    #[test]
    fn selecting_free_text_builds_search_route() {
        let mut s = typed("hel", &[]);
        let route = s.select(&query("hello world")).unwrap();
        assert_eq!(route.path(), "/search?q=hello%20world");
        assert_eq!(s.query(), "hello world");
        assert!(!s.is_open());
    }

    #[test]
    fn post_selection_within_scope_keeps_scope() {
        let mut s = SearchState::from_route(&Route::Community { name: "rust".into() });
        s.input("pin");
        let post =
            Suggestion::new("t3_x", "Pin explained", SuggestionKind::Post, "/r/rust/comments/x");
        let route = s.select(&post).unwrap();
        assert_eq!(route.path(), "/r/rust/search?q=Pin%20explained");
        assert_eq!(s.mode(), Mode::Scoped);
    }

    #[test]
    fn backspace_on_empty_scoped_query_returns_to_idle() {
        let mut s = SearchState::new();
        s.select(&community("golang"));
        assert_eq!(s.key(Key::Backspace, &[]), KeyOutcome::ScopeCleared);
        assert_eq!(s.scope(), None);
        assert_eq!(s.mode(), Mode::Idle);
    }

    #[test]
    fn backspace_with_text_is_plain_editing() {
        let mut s = SearchState::from_route(&Route::Community { name: "golang".into() });
        s.input("x");
        assert_eq!(s.key(Key::Backspace, &[]), KeyOutcome::Ignored);
        assert_eq!(s.scope(), Some("golang"));
    }

    #[test]
    fn click_outside_closes_without_touching_text() {
        let mut s = typed("hello", &[query("hello")]);
        s.click_outside();
        assert!(!s.is_open());
        assert!(!s.is_focused());
        assert_eq!(s.query(), "hello");
    }

    #[test]
    fn enter_selects_highlight_or_submits_text() {
        let list = vec![community("golang"), query("go generics")];
        let mut s = typed("go", &list);
        s.key(Key::ArrowDown, &list);
        assert_eq!(
            s.key(Key::Enter, &list),
            KeyOutcome::Navigate(Route::Community { name: "golang".into() })
        );

        let mut s = typed("free text", &list);
        assert_eq!(
            s.key(Key::Enter, &list),
            KeyOutcome::Navigate(Route::search(None, "free text"))
        );

        let mut s = typed("  ", &list);
        assert_eq!(s.key(Key::Enter, &list), KeyOutcome::Ignored);
    }

    #[test]
    fn escape_closes_open_list() {
        let mut s = typed("x", &[query("x")]);
        assert_eq!(s.key(Key::Escape, &[]), KeyOutcome::Closed);
        assert_eq!(s.key(Key::Escape, &[]), KeyOutcome::Ignored);
        assert_eq!(s.query(), "x");
    }

    #[test]
    fn navigation_keeps_input_focus() {
        let list = vec![community("golang")];
        let mut s = typed("go", &list);
        s.key(Key::ArrowDown, &list);
        s.key(Key::Enter, &list);
        assert!(s.is_focused());
        s.apply_route(&Route::Home);
        assert!(s.is_focused());
        assert!(!s.is_open());
    }

    #[test]
    fn hidden_rows_cannot_be_chosen() {
        let list = vec![community("gol"), query("gol tutorial")];
        let mut s = typed("golang", &list);
        // A newer fetch is outstanding, so nothing is on screen
        s.set_rendered(0);
        assert_eq!(s.key(Key::ArrowDown, &list), KeyOutcome::Ignored);
        assert_eq!(
            s.key(Key::Enter, &list),
            KeyOutcome::Navigate(Route::search(None, "golang"))
        );
    }

    #[test]
    fn route_sync_sets_scope_chip() {
        let s = SearchState::from_route(&Route::parse("/r/rust/search?q=tokio").unwrap());
        assert_eq!(s.scope(), Some("rust"));
        assert_eq!(s.query(), "tokio");
        let s = SearchState::from_route(&Route::Home);
        assert_eq!(s.mode(), Mode::Idle);
    }
}
