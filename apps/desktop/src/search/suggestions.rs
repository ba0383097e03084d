//! Suggestion dropdown. Purely presentational: renders what it is given in
//! order and reports clicks back through `on_select`.

use dioxus::prelude::*;
use subfind_core::highlight::match_segments;
use subfind_core::{Suggestion, SuggestionKind};

fn kind_label(kind: SuggestionKind) -> &'static str {
    match kind {
        SuggestionKind::Community => "Community",
        SuggestionKind::Post => "Post",
        SuggestionKind::Query => "Search",
    }
}

#[component]
pub fn SearchSuggestions(
    search_query: String,
    suggestions: Vec<Suggestion>,
    selected_index: Option<usize>,
    on_select: EventHandler<Suggestion>,
    #[props(default)] class: String,
) -> Element {
    rsx! {
        ul {
            class: "suggestions {class}",
            role: "listbox",
            // Keep focus in the search input while a row is picked
            onmousedown: move |e: Event<MouseData>| e.prevent_default(),
            for (i, item) in suggestions.iter().enumerate() {
                li {
                    key: "{item.id}",
                    class: if selected_index == Some(i) {
                        "suggestion active"
                    } else {
                        "suggestion"
                    },
                    role: "option",
                    onclick: {
                        let item = item.clone();
                        move |_| on_select.call(item.clone())
                    },
                    span {
                        class: "suggestion-text",
                        if item.kind == SuggestionKind::Community {
                            span { class: "suggestion-prefix", "r/" }
                        }
                        for seg in match_segments(&item.text, &search_query) {
                            if seg.matched {
                                strong { "{seg.text}" }
                            } else {
                                span { "{seg.text}" }
                            }
                        }
                    }
                    span { class: "suggestion-kind", {kind_label(item.kind)} }
                }
            }
        }
    }
}
