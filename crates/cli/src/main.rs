//! subfind CLI — suggestion lookups and search routing from the terminal.
//!
//! Talks to the suggestions API through `subfind-core`, the same client the
//! desktop app uses.

mod interactive;

use clap::{Parser, Subcommand};
use tracing::debug;

use subfind_core::env::normalize_api_url;
use subfind_core::{
    fetch_suggestions, Autocomplete, Env, HttpSuggestionSource, Route, SearchState, Suggestion,
    SuggestionKind,
};

/// subfind — community and post search suggestions from the terminal.
#[derive(Parser)]
#[command(name = "subfind", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output as JSON instead of human-readable text
    #[arg(long, global = true)]
    json: bool,

    /// API base URL (overrides subfind.toml and SUBFIND_API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch suggestions for a query
    Suggest {
        /// Search text
        query: String,
    },
    /// Show the resolved environment configuration
    Env,
    /// Print the route a selected suggestion navigates to
    Route {
        /// Suggestion kind: community, post, or query
        kind: String,

        /// Suggestion text
        text: String,

        /// Community the search bar is scoped to
        #[arg(long)]
        scope: Option<String>,
    },
    /// Drive the search bar from stdin, one line per edit or command
    Interactive {
        /// Start on this route (e.g. /r/rust)
        #[arg(long)]
        at: Option<String>,
    },
}

fn resolve_env(api_url: Option<&str>) -> Env {
    let cwd = std::env::current_dir().unwrap_or_else(|_| ".".into());
    let mut env = Env::load(&cwd).unwrap_or_else(|e| {
        eprintln!("Warning: {e}; using defaults");
        let mut env = Env::default();
        env.apply_vars(|k| std::env::var(k).ok());
        env
    });
    if let Some(url) = api_url {
        env.api_url = normalize_api_url(url).unwrap_or_else(|e| {
            eprintln!("Error: {e}");
            std::process::exit(2);
        });
    }
    env
}

fn client(env: &Env) -> HttpSuggestionSource {
    HttpSuggestionSource::new(env).unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        std::process::exit(2);
    })
}

fn to_json<T: serde::Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|e| format!("{{\"error\": \"{e}\"}}"))
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("subfind=warn".parse().expect("static directive")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let env = resolve_env(cli.api_url.as_deref());
    debug!(api_url = %env.api_url, app_env = %env.app_env, "Environment resolved");

    match cli.command {
        Commands::Suggest { query } => {
            let source = client(&env);
            let items = match fetch_suggestions(&source, &query).await {
                Ok(items) => items,
                Err(e) => {
                    eprintln!("Error: {e}");
                    std::process::exit(1);
                }
            };

            if cli.json {
                println!("{}", to_json(&items));
            } else {
                if items.is_empty() {
                    eprintln!("No suggestions for '{query}'");
                    std::process::exit(1);
                }
                for s in &items {
                    println!("{:<10} {:<50} {}", s.kind.as_str(), s.text, s.url);
                }
                eprintln!("\n{} suggestions", items.len());
            }
        }
        Commands::Env => {
            if cli.json {
                println!("{}", to_json(&env));
            } else {
                println!("API URL:      {}", env.api_url);
                println!("Environment:  {} ({:?})", env.app_env, env.app_env_kind());
                println!("Debounce:     {}ms", env.debounce_ms);
                println!("Timeout:      {}ms", env.request_timeout_ms);
            }
        }
        Commands::Route { kind, text, scope } => {
            let Some(kind) = SuggestionKind::parse(&kind) else {
                eprintln!("Unknown kind '{kind}' (expected community, post, or query)");
                std::process::exit(2);
            };
            let start = match scope.as_deref().map(Route::community) {
                Some(Some(route)) => route,
                Some(None) => {
                    eprintln!("Invalid community name");
                    std::process::exit(2);
                }
                None => Route::Home,
            };
            let mut state = SearchState::from_route(&start);
            let item = Suggestion::new("cli", text, kind, "");
            let Some(route) = state.select(&item) else {
                eprintln!("'{}' does not name a community", item.text);
                std::process::exit(1);
            };

            if cli.json {
                println!("{}", to_json(&route));
            } else {
                println!("{route}");
            }
        }
        Commands::Interactive { at } => {
            let route = match at.as_deref() {
                Some(path) => Route::parse(path).unwrap_or_else(|| {
                    eprintln!("Unrecognized route '{path}'");
                    std::process::exit(2);
                }),
                None => Route::Home,
            };
            let settle = env.debounce() + env.request_timeout();
            let ac = Autocomplete::at_route(client(&env), env.debounce(), route);
            if let Err(e) = interactive::run(ac, settle).await {
                eprintln!("Error: {e}");
                std::process::exit(1);
            }
        }
    }
}
