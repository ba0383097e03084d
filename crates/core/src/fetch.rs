//! Suggestion sources: the [`SuggestionSource`] seam and the HTTP client that
//! calls `GET {api_url}/search/suggestions?q=...`.

use std::future::Future;

use reqwest::Url;
use tracing::debug;

use crate::env::Env;
use crate::error::FetchError;
use crate::types::Suggestion;

/// Path of the suggestions endpoint, relative to the API base URL.
pub const SUGGESTIONS_PATH: &str = "/search/suggestions";

/// Anything that can turn a query into suggestions. One call, one request.
pub trait SuggestionSource: Send + Sync + 'static {
    fn fetch(
        &self,
        query: &str,
    ) -> impl Future<Output = Result<Vec<Suggestion>, FetchError>> + Send;
}

/// Fetch suggestions for `query`, skipping the network entirely for blank input.
pub async fn fetch_suggestions<S: SuggestionSource>(
    source: &S,
    query: &str,
) -> Result<Vec<Suggestion>, FetchError> {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        return Ok(Vec::new());
    }
    source.fetch(trimmed).await
}

// ---------------------------------------------------------------------------
// HTTP
// ---------------------------------------------------------------------------

/// Suggestions client for the subfind API.
#[derive(Debug, Clone)]
pub struct HttpSuggestionSource {
    client: reqwest::Client,
    endpoint: Url,
}

impl HttpSuggestionSource {
    /// Build a client for the configured API, honoring its request timeout.
    pub fn new(env: &Env) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(env.request_timeout())
            .user_agent(concat!("subfind/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(FetchError::Transport)?;
        Self::with_client(client, &env.api_url)
    }

    /// Use an existing client (shared connection pool) against `api_url`.
    pub fn with_client(client: reqwest::Client, api_url: &str) -> Result<Self, FetchError> {
        let base = api_url.trim_end_matches('/');
        let endpoint = Url::parse(&format!("{base}{SUGGESTIONS_PATH}"))
            .map_err(|_| FetchError::InvalidBaseUrl(api_url.to_string()))?;
        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

impl SuggestionSource for HttpSuggestionSource {
    async fn fetch(&self, query: &str) -> Result<Vec<Suggestion>, FetchError> {
        debug!(query, endpoint = %self.endpoint, "Fetching suggestions");
        let response = self.client.get(self.endpoint.clone()).query(&[("q", query)]).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = response.bytes().await?;
        let suggestions: Vec<Suggestion> =
            serde_json::from_slice(&body).map_err(|e| FetchError::Decode(e.to_string()))?;
        debug!(query, count = suggestions.len(), "Suggestions received");
        Ok(suggestions)
    }
}
