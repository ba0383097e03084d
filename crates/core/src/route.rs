//! Navigation targets produced by the search bar, and their URL paths.
//!
//! - `/` — home
//! - `/r/<name>` — a community
//! - `/search?q=<text>` — site-wide search
//! - `/r/<name>/search?q=<text>` — search within a community

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::Serialize;

/// Everything except RFC 3986 unreserved characters. Spaces become `%20`.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'_').remove(b'.').remove(b'~');

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "route", rename_all = "lowercase")]
pub enum Route {
    Home,
    Community { name: String },
    Search { scope: Option<String>, query: String },
}

impl Route {
    pub fn community(name: &str) -> Option<Route> {
        community_name(name).map(|name| Route::Community { name })
    }

    pub fn search(scope: Option<&str>, query: &str) -> Route {
        Route::Search {
            scope: scope.and_then(community_name),
            query: query.trim().to_string(),
        }
    }

    /// Community the route is scoped to, if any.
    pub fn scope(&self) -> Option<&str> {
        match self {
            Route::Home => None,
            Route::Community { name } => Some(name),
            Route::Search { scope, .. } => scope.as_deref(),
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::Community { name } => format!("/r/{}", encode(name)),
            Route::Search { scope: None, query } => format!("/search?q={}", encode(query)),
            Route::Search { scope: Some(name), query } => {
                format!("/r/{}/search?q={}", encode(name), encode(query))
            }
        }
    }

    /// Parse a path produced by [`Route::path`]. Unknown paths yield `None`.
    pub fn parse(path: &str) -> Option<Route> {
        let (path, query) = match path.split_once('?') {
            Some((p, q)) => (p, Some(q)),
            None => (path, None),
        };
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        let q = query.and_then(query_param).unwrap_or_default();

        match segments.as_slice() {
            [] => Some(Route::Home),
            ["search"] => Some(Route::Search { scope: None, query: q }),
            ["r", name] => Route::community(&decode(name)),
            ["r", name, "search"] => {
                let name = community_name(&decode(name))?;
                Some(Route::Search { scope: Some(name), query: q })
            }
            _ => None,
        }
    }
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.path())
    }
}

/// Normalize a community reference: `golang`, `r/golang`, and `/r/golang/`
/// all name `golang`. Blank names and names with inner slashes or whitespace
/// are rejected.
pub fn community_name(raw: &str) -> Option<String> {
    let trimmed = raw.trim().trim_start_matches('/');
    let name = trimmed.strip_prefix("r/").unwrap_or(trimmed).trim_end_matches('/');
    if name.is_empty() || name.contains('/') || name.chars().any(char::is_whitespace) {
        return None;
    }
    Some(name.to_string())
}

fn encode(s: &str) -> String {
    utf8_percent_encode(s, COMPONENT).to_string()
}

fn decode(s: &str) -> String {
    let plus_as_space = s.replace('+', " ");
    percent_decode_str(&plus_as_space).decode_utf8_lossy().into_owned()
}

fn query_param(query: &str) -> Option<String> {
    query.split('&').find_map(|pair| {
        let (k, v) = pair.split_once('=').unwrap_or((pair, ""));
        (k == "q").then(|| decode(v))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn community_path() {
        assert_eq!(Route::community("golang").unwrap().path(), "/r/golang");
        assert_eq!(Route::community("r/golang").unwrap().path(), "/r/golang");
        assert_eq!(Route::community("/r/golang/").unwrap().path(), "/r/golang");
    }

    #[test]
    fn search_path_uses_percent_twenty() {
        let route = Route::search(None, "hello world");
        assert_eq!(route.path(), "/search?q=hello%20world");
    }

    #[test]
    fn search_path_escapes_reserved_characters() {
        let route = Route::search(None, "a&b=c?");
        assert_eq!(route.path(), "/search?q=a%26b%3Dc%3F");
    }

    #[test]
    fn scoped_search_path() {
        let route = Route::search(Some("rust"), "async traits");
        assert_eq!(route.path(), "/r/rust/search?q=async%20traits");
        assert_eq!(route.scope(), Some("rust"));
    }

    #[test]
    fn parse_known_paths() {
        assert_eq!(Route::parse("/"), Some(Route::Home));
        assert_eq!(Route::parse(""), Some(Route::Home));
        assert_eq!(
            Route::parse("/r/golang"),
            Some(Route::Community { name: "golang".into() })
        );
        assert_eq!(
            Route::parse("/search?q=hello%20world"),
            Some(Route::Search { scope: None, query: "hello world".into() })
        );
        assert_eq!(
            Route::parse("/r/rust/search?sort=new&q=borrow+checker"),
            Some(Route::Search { scope: Some("rust".into()), query: "borrow checker".into() })
        );
    }

    #[test]
    fn parse_rejects_unknown_paths() {
        assert_eq!(Route::parse("/u/someone"), None);
        assert_eq!(Route::parse("/r/"), None);
        assert_eq!(Route::parse("/r/a/b/c"), None);
    }

    #[test]
    fn rejects_invalid_community_names() {
        assert_eq!(community_name(""), None);
        assert_eq!(community_name("r/"), None);
        assert_eq!(community_name("/r/"), None);
        assert_eq!(community_name("/r//"), None);
        assert_eq!(community_name("two words"), None);
        assert_eq!(community_name("a/b"), None);
    }

    #[test]
    fn path_parse_round_trip_for_unicode_query() {
        let route = Route::search(Some("japan"), "東京 ramen");
        assert_eq!(Route::parse(&route.path()), Some(route));
    }
}
