//! Search bar container with debounced, focus-gated suggestion fetching.

use dioxus::prelude::*;
use tracing::warn;

use subfind_core::debounce::DebounceGate;
use subfind_core::latest::LatestWins;
use subfind_core::selection::KeyOutcome;
use subfind_core::{fetch_suggestions, Env, Route, Suggestion};

use super::suggestions::SearchSuggestions;
use crate::state::*;

type Latest = Signal<LatestWins<TaskHandle>>;

/// Keys the search bar handles itself; everything else is plain typing.
pub(crate) fn search_key(key: &Key) -> Option<subfind_core::Key> {
    match key {
        Key::ArrowDown => Some(subfind_core::Key::ArrowDown),
        Key::ArrowUp => Some(subfind_core::Key::ArrowUp),
        Key::Enter => Some(subfind_core::Key::Enter),
        Key::Escape => Some(subfind_core::Key::Escape),
        Key::Backspace => Some(subfind_core::Key::Backspace),
        _ => None,
    }
}

#[component]
pub fn SearchBar(#[props(default = "Find anything".to_string())] placeholder: String) -> Element {
    let mut gate = use_signal(|| DebounceGate::new(Env::global().debounce()));
    let mut latest: Latest = use_signal(LatestWins::new);

    let search = SEARCH.read();
    let query = search.query().to_string();
    let scope = search.scope().map(str::to_string);
    let highlighted = search.highlighted();
    let list_visible = search.is_focused()
        && search.is_open()
        && !*PENDING.read()
        && !SUGGESTIONS.read().is_empty();
    let open = search.is_open();
    drop(search);

    // Drop results and forget the old text after any navigation. Focus stays
    // with the input, so the gate keeps its focus flag.
    let mut finish = move |route: Option<Route>| {
        gate.write().reset();
        latest.write().invalidate();
        clear_suggestions();
        if let Some(route) = route {
            navigate(route);
        }
    };

    rsx! {
        div {
            class: "search-bar",

            // Backdrop catches presses outside the bar while the list is open
            if open {
                div {
                    class: "search-backdrop",
                    onmousedown: move |_| {
                        SEARCH.write().click_outside();
                        gate.write().blur();
                    },
                }
            }

            div {
                class: if scope.is_some() { "search-field scoped" } else { "search-field" },

                svg {
                    class: "search-icon",
                    width: "16",
                    height: "16",
                    view_box: "0 0 24 24",
                    fill: "none",
                    stroke: "currentColor",
                    stroke_width: "2",
                    circle { cx: "11", cy: "11", r: "8" }
                    line { x1: "21", y1: "21", x2: "16.65", y2: "16.65" }
                }

                // Scope chip, tied to the current route
                if let Some(name) = scope.clone() {
                    span {
                        class: "scope-chip",
                        "r/{name}"
                        button {
                            class: "scope-chip-dismiss",
                            title: "Search everywhere",
                            onclick: move |_| finish(Some(Route::Home)),
                            "\u{00D7}"
                        }
                    }
                }

                input {
                    class: "search-input",
                    r#type: "text",
                    placeholder: "{placeholder}",
                    value: "{query}",
                    autofocus: true,
                    onfocus: move |_| {
                        SEARCH.write().focus();
                        let release = gate.write().focus();
                        if let Some(q) = release {
                            start_fetch(q, latest);
                        }
                    },
                    // Stop releasing fetches once focus leaves; the list itself
                    // only closes on a press outside the bar.
                    onblur: move |_| gate.write().blur(),
                    onkeydown: move |e: Event<KeyboardData>| {
                        let Some(key) = search_key(&e.key()) else { return };
                        use subfind_core::Key as SearchKey;
                        if matches!(key, SearchKey::ArrowDown | SearchKey::ArrowUp) {
                            e.prevent_default();
                        }
                        let suggestions = SUGGESTIONS.read().clone();
                        let outcome = SEARCH.write().key(key, &suggestions);
                        match outcome {
                            KeyOutcome::Navigate(route) => finish(Some(route)),
                            KeyOutcome::ScopeCleared => {
                                if ROUTE.read().scope().is_some() {
                                    finish(Some(Route::Home));
                                }
                            }
                            KeyOutcome::Highlighted(_)
                            | KeyOutcome::Closed
                            | KeyOutcome::Ignored => {}
                        }
                    },
                    oninput: move |e: Event<FormData>| {
                        let value = e.value();
                        if !SEARCH.write().input(&value) {
                            return;
                        }

                        if value.trim().is_empty() {
                            gate.write().reset();
                            latest.write().invalidate();
                            clear_suggestions();
                            return;
                        }

                        // Debounce: new generation, spawn delayed settle
                        let ticket = gate.write().edit(&value);
                        let quiet = gate.read().quiet();
                        spawn(async move {
                            tokio::time::sleep(quiet).await;
                            let release = gate.write().settle(&ticket);
                            if let Some(q) = release {
                                start_fetch(q, latest);
                            }
                        });
                    },
                }

                if !query.is_empty() || scope.is_some() {
                    button {
                        class: "search-clear",
                        onclick: move |_| {
                            SEARCH.write().clear();
                            let scoped = ROUTE.read().scope().is_some();
                            finish(scoped.then_some(Route::Home));
                        },
                        "\u{00D7}"
                    }
                }
            }

            if list_visible {
                SearchSuggestions {
                    search_query: SUGGESTIONS_FOR.read().clone(),
                    suggestions: SUGGESTIONS.read().clone(),
                    selected_index: highlighted,
                    on_select: move |item: Suggestion| {
                        let route = SEARCH.write().select(&item);
                        if route.is_some() {
                            finish(route);
                        }
                    },
                    class: "search-dropdown",
                }
            }
        }
    }
}

/// Fetch suggestions for a settled query. Only the newest fetch may write
/// results; issuing a new one cancels the previous task.
fn start_fetch(query: String, mut latest: Latest) {
    let Some(source) = SOURCE.get() else {
        warn!("Suggestion client not initialized");
        return;
    };
    let id = latest.write().issue();
    // Old rows are hidden until this fetch lands
    SEARCH.write().set_rendered(0);
    *PENDING.write() = true;

    let task = spawn(async move {
        let result = fetch_suggestions(source, &query).await;
        if !latest.write().accept(id) {
            return;
        }
        let items = result.unwrap_or_else(|e| {
            warn!(error = %e, query = query.as_str(), "Suggestion fetch failed");
            Vec::new()
        });
        SEARCH.write().set_rendered(items.len());
        *SUGGESTIONS.write() = items;
        *SUGGESTIONS_FOR.write() = query;
        *PENDING.write() = false;
    });
    latest.write().track(id, TaskHandle(task));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_navigation_keys() {
        assert_eq!(search_key(&Key::ArrowDown), Some(subfind_core::Key::ArrowDown));
        assert_eq!(search_key(&Key::Backspace), Some(subfind_core::Key::Backspace));
        assert_eq!(search_key(&Key::Escape), Some(subfind_core::Key::Escape));
    }

    #[test]
    fn plain_characters_are_typing() {
        assert_eq!(search_key(&Key::Character("a".into())), None);
        assert_eq!(search_key(&Key::Tab), None);
    }
}
