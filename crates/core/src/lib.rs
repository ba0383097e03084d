//! subfind — debounced community and post search suggestions.
//!
//! This crate provides the headless core shared by the CLI and the desktop app:
//! the suggestion model, environment configuration, the HTTP suggestion fetcher,
//! and the interaction logic behind the autocomplete search bar.
//!
//! # Modules
//!
//! - [`types`] — Suggestion model and search-state types
//! - [`env`] — Environment configuration (defaults, `subfind.toml`, env vars)
//! - [`error`] — Error types for fetching and configuration
//! - [`fetch`] — Suggestion sources and the HTTP suggestions client
//! - [`debounce`] — Quiet-interval and focus gating for fetches
//! - [`latest`] — Latest-wins request tracking (stale-response suppression)
//! - [`selection`] — Search bar selection state machine
//! - [`route`] — Navigation targets and their URL paths
//! - [`highlight`] — Query match segments for suggestion rendering
//! - [`session`] — Headless autocomplete controller composing the above

pub mod debounce;
pub mod env;
pub mod error;
pub mod fetch;
pub mod highlight;
pub mod latest;
pub mod route;
pub mod selection;
pub mod session;
pub mod types;

pub use env::{AppEnv, Env};
pub use error::{ConfigError, FetchError};
pub use fetch::{fetch_suggestions, HttpSuggestionSource, SuggestionSource};
pub use route::Route;
pub use selection::{Key, KeyOutcome, Mode, SearchState};
pub use session::Autocomplete;
pub use types::{SearchView, Suggestion, SuggestionKind};
