//! subfind desktop — Dioxus-powered search with community suggestions.
//!
//! Usage: `subfind-desktop [ROUTE]`, e.g. `subfind-desktop /r/rust` to open
//! scoped to a community.

use dioxus::prelude::*;
use subfind_core::{Env, HttpSuggestionSource, Route};
use tracing::{error, info, warn};

mod app;
mod pages;
mod search;
mod state;

use app::App;
use state::{INITIAL_ROUTE, SOURCE};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("subfind=info".parse().unwrap()),
        )
        .with_target(false)
        .init();

    // Resolve config and build the client before Dioxus launches
    let env = Env::global();
    match HttpSuggestionSource::new(env) {
        Ok(source) => {
            info!(endpoint = %source.endpoint(), "Suggestion client ready");
            let _ = SOURCE.set(source);
        }
        Err(e) => {
            error!(error = %e, "Could not build suggestion client");
            std::process::exit(1);
        }
    }

    if let Some(path) = std::env::args().nth(1) {
        match Route::parse(&path) {
            Some(route) => {
                let _ = INITIAL_ROUTE.set(route);
            }
            None => warn!(path = path.as_str(), "Ignoring unrecognized start route"),
        }
    }

    #[cfg(feature = "desktop")]
    {
        use dioxus::desktop::{Config, LogicalSize, WindowBuilder};

        LaunchBuilder::new()
            .with_cfg(
                Config::default()
                    .with_menu(None)
                    .with_background_color((250, 250, 250, 255))
                    .with_window(
                        WindowBuilder::new()
                            .with_title("subfind")
                            .with_inner_size(LogicalSize::new(1100.0, 760.0))
                            .with_min_inner_size(LogicalSize::new(560.0, 420.0))
                            .with_resizable(true),
                    ),
            )
            .launch(App);
    }

    #[cfg(not(feature = "desktop"))]
    {
        dioxus::launch(App);
    }
}
