//! Root application component — header with the search bar, routed page below.

use dioxus::prelude::*;
use subfind_core::{Env, Route};
use tracing::error;

use crate::pages::{CommunityPage, HomePage, SearchResultsPage};
use crate::search::SearchBar;
use crate::state::*;

static VARIABLES_CSS: Asset = asset!("/assets/styles/variables.css");
static APP_CSS: Asset = asset!("/assets/styles/app.css");

#[component]
pub fn App() -> Element {
    // Apply the deep-link route once, on first render
    use_hook(|| {
        if let Some(route) = INITIAL_ROUTE.get() {
            navigate(route.clone());
        }
    });

    rsx! {
        document::Stylesheet { href: VARIABLES_CSS }
        document::Stylesheet { href: APP_CSS }

        div {
            class: "app-shell",

            header {
                class: "topbar",
                button {
                    class: "brand",
                    onclick: move |_| navigate(Route::Home),
                    "subfind"
                }
                SearchBar {}
                EnvBadge {}
            }

            ErrorBoundary {
                handle_error: |errors: ErrorContext| {
                    let detail = format!("{errors:?}");
                    error!(detail = detail.as_str(), "Page failed to render");
                    rsx! {
                        div {
                            class: "error-fallback",
                            h2 { "Something went wrong" }
                            p {
                                "This page hit an error while rendering. "
                                "The rest of the app still works."
                            }
                            pre { class: "error-detail", "{detail}" }
                            button {
                                class: "error-reset",
                                onclick: move |_| {
                                    *SHOULD_THROW.write() = false;
                                    errors.clear_errors();
                                },
                                "Try again"
                            }
                        }
                    }
                },
                RoutedPage {}
            }
        }
    }
}

/// Page for the current route
#[component]
fn RoutedPage() -> Element {
    match ROUTE.read().clone() {
        Route::Home => rsx! { HomePage {} },
        Route::Community { name } => rsx! { CommunityPage { name } },
        Route::Search { scope, query } => rsx! { SearchResultsPage { scope, query } },
    }
}

/// Environment name, shown outside production
#[component]
fn EnvBadge() -> Element {
    let env = Env::global();
    if env.is_production() {
        return rsx! {};
    }
    rsx! {
        span { class: "env-badge", title: "{env.api_url}", "{env.app_env}" }
    }
}
