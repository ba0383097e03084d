//! Core types shared across subfind: the suggestion model returned by the
//! suggestions endpoint and the snapshot handed to renderers.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Suggestions
// ---------------------------------------------------------------------------

/// What a suggestion points at. Wire names follow the suggestions API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SuggestionKind {
    /// A community (subreddit). Selecting it scopes the search bar.
    #[serde(rename = "subreddit", alias = "community")]
    Community,
    /// A single post.
    #[serde(rename = "post")]
    Post,
    /// A free-text query.
    #[serde(rename = "query")]
    Query,
}

impl SuggestionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SuggestionKind::Community => "subreddit",
            SuggestionKind::Post => "post",
            SuggestionKind::Query => "query",
        }
    }

    /// Parse a kind name as typed on the command line.
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "subreddit" | "community" | "r" => Some(SuggestionKind::Community),
            "post" => Some(SuggestionKind::Post),
            "query" | "text" | "free-text" => Some(SuggestionKind::Query),
            _ => None,
        }
    }
}

impl std::fmt::Display for SuggestionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single autocomplete result. Immutable once received; replaced wholesale
/// by the next fetch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    pub id: String,
    pub text: String,
    #[serde(rename = "type")]
    pub kind: SuggestionKind,
    #[serde(default)]
    pub url: String,
}

impl Suggestion {
    pub fn new(
        id: impl Into<String>,
        text: impl Into<String>,
        kind: SuggestionKind,
        url: impl Into<String>,
    ) -> Self {
        Self { id: id.into(), text: text.into(), kind, url: url.into() }
    }

    pub fn is_community(&self) -> bool {
        self.kind == SuggestionKind::Community
    }
}

// ---------------------------------------------------------------------------
// Snapshot
// ---------------------------------------------------------------------------

/// Everything a renderer needs to draw the search bar at one instant.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SearchView {
    pub query: String,
    pub scope: Option<String>,
    pub highlighted: Option<usize>,
    pub focused: bool,
    pub open: bool,
    pub suggestions: Vec<Suggestion>,
    /// The query the current suggestions were fetched for.
    pub suggestions_for: String,
    pub pending: bool,
}

impl SearchView {
    /// The dropdown is drawn only while focused, open, and holding results.
    pub fn list_visible(&self) -> bool {
        self.focused && self.open && !self.pending && !self.suggestions.is_empty()
    }
}
