//! Route pages.

mod home;

use dioxus::prelude::*;
use subfind_core::Route;

use crate::state::*;

pub use home::HomePage;

#[component]
pub fn CommunityPage(name: String) -> Element {
    rsx! {
        main {
            class: "page community",
            h1 { "r/{name}" }
            p { class: "page-hint", "Search within r/{name} using the bar above." }
            button {
                class: "link-button",
                onclick: move |_| navigate(Route::Home),
                "Back to home"
            }
        }
    }
}

#[component]
pub fn SearchResultsPage(scope: Option<String>, query: String) -> Element {
    let heading = match &scope {
        Some(name) => format!("Results for \u{201C}{query}\u{201D} in r/{name}"),
        None => format!("Results for \u{201C}{query}\u{201D}"),
    };
    let route = Route::Search { scope: scope.clone(), query: query.clone() };

    rsx! {
        main {
            class: "page search-results",
            h1 { "{heading}" }
            code { class: "route-path", "{route}" }
            if let Some(name) = scope.clone() {
                button {
                    class: "link-button",
                    onclick: {
                        let name = name.clone();
                        move |_| {
                            if let Some(route) = Route::community(&name) {
                                navigate(route);
                            }
                        }
                    },
                    "Back to r/{name}"
                }
            }
        }
    }
}
