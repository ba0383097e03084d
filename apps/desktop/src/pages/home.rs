//! Landing page, including the error-boundary demonstration.

use dioxus::prelude::*;
use thiserror::Error;
use tracing::info;

use crate::state::*;

/// Raised on purpose by the "Throw test error" button.
#[derive(Error, Debug)]
#[error("Test error - error boundary triggered")]
pub struct BoundaryTestError;

#[component]
pub fn HomePage() -> Element {
    if *SHOULD_THROW.read() {
        return Err(BoundaryTestError.into());
    }

    rsx! {
        main {
            class: "home",

            div {
                class: "home-intro",
                h1 { "Find communities, posts, and conversations." }
                p {
                    "Start typing in the search bar. Pick a community to search inside it, "
                    "or press Enter to search everywhere."
                }
            }

            // Error testing section
            section {
                class: "boundary-test",
                div {
                    class: "boundary-test-header",
                    span { class: "boundary-test-icon", "!" }
                    h3 { "Error Boundary Test" }
                }
                p {
                    "Click the button below to test the error boundary. The page will fail "
                    "to render and the fallback view takes its place."
                }
                button {
                    class: "boundary-test-button",
                    onclick: move |_| {
                        info!("Error boundary test triggered");
                        *SHOULD_THROW.write() = true;
                    },
                    "Throw Test Error"
                }
            }
        }
    }
}
