//! Environment configuration: API base URL, environment name, and timing knobs.
//!
//! Resolution order, lowest to highest precedence: built-in defaults, then
//! `subfind.toml` in the working directory, then `SUBFIND_*` environment
//! variables. [`Env::global`] resolves once per process.

use std::path::Path;
use std::sync::OnceLock;
use std::time::Duration;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::{ConfigError, ConfigResult};

pub const DEFAULT_API_URL: &str = "http://localhost:8000/api";
pub const DEFAULT_APP_ENV: &str = "development";
pub const DEFAULT_DEBOUNCE_MS: u64 = 300;
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 5_000;

/// Project-local config file name.
pub const CONFIG_FILE: &str = "subfind.toml";

pub const VAR_API_URL: &str = "SUBFIND_API_URL";
pub const VAR_APP_ENV: &str = "SUBFIND_APP_ENV";
pub const VAR_DEBOUNCE_MS: &str = "SUBFIND_DEBOUNCE_MS";

/// Known keys in `subfind.toml` for config validation.
const KNOWN_CONFIG_KEYS: &[&str] = &["api_url", "app_env", "debounce_ms", "request_timeout_ms"];

static GLOBAL: OnceLock<Env> = OnceLock::new();

/// Deployment environment, classified from the free-form `app_env` name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Staging,
    Production,
    Other,
}

impl AppEnv {
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" | "local" => AppEnv::Development,
            "staging" | "stage" | "preview" => AppEnv::Staging,
            "production" | "prod" => AppEnv::Production,
            _ => AppEnv::Other,
        }
    }
}

/// Resolved runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Env {
    /// Base URL of the API, without a trailing slash.
    pub api_url: String,
    pub app_env: String,
    /// Quiet interval before a typed query is fetched.
    pub debounce_ms: u64,
    pub request_timeout_ms: u64,
}

impl Default for Env {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            app_env: DEFAULT_APP_ENV.to_string(),
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            request_timeout_ms: DEFAULT_REQUEST_TIMEOUT_MS,
        }
    }
}

impl Env {
    /// Process-wide configuration, resolved on first access from the current
    /// directory and environment. A broken config file is reported and skipped.
    pub fn global() -> &'static Env {
        GLOBAL.get_or_init(|| {
            let cwd = std::env::current_dir().unwrap_or_else(|_| ".".into());
            let env = Env::load(&cwd).unwrap_or_else(|e| {
                warn!(error = %e, "Ignoring {CONFIG_FILE}, using defaults");
                let mut env = Env::default();
                env.apply_vars(|k| std::env::var(k).ok());
                env
            });
            info!(api_url = %env.api_url, app_env = %env.app_env, "Environment resolved");
            env
        })
    }

    /// Resolve defaults, then `dir/subfind.toml`, then process environment variables.
    pub fn load(dir: &Path) -> ConfigResult<Env> {
        let mut env = Env::default();
        let config_path = dir.join(CONFIG_FILE);
        if config_path.exists() {
            env.apply_file(&config_path)?;
        }
        env.apply_vars(|k| std::env::var(k).ok());
        Ok(env)
    }

    pub fn app_env_kind(&self) -> AppEnv {
        AppEnv::from_name(&self.app_env)
    }

    pub fn is_production(&self) -> bool {
        self.app_env_kind() == AppEnv::Production
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    /// Merge overrides from a `subfind.toml` file.
    pub fn apply_file(&mut self, path: &Path) -> ConfigResult<()> {
        debug!("Loading {}", path.display());
        let label = path.display().to_string();
        let content = std::fs::read_to_string(path)
            .map_err(|source| ConfigError::Read { path: label.clone(), source })?;
        let table = content
            .parse::<toml::Table>()
            .map_err(|source| ConfigError::Parse { path: label, source })?;
        self.apply_table(&table)
    }

    /// Merge overrides from an already-parsed TOML table.
    pub fn apply_table(&mut self, table: &toml::Table) -> ConfigResult<()> {
        // Validate keys — warn on unknown
        for key in table.keys() {
            if KNOWN_CONFIG_KEYS.contains(&key.as_str()) {
                continue;
            }
            let suggestion = KNOWN_CONFIG_KEYS
                .iter()
                .min_by_key(|k| edit_distance(key, k))
                .copied()
                .unwrap_or_default();
            if edit_distance(key, suggestion) <= 3 {
                warn!(
                    key = key.as_str(),
                    suggestion,
                    "Unknown key in {CONFIG_FILE} — did you mean '{suggestion}'?"
                );
            } else {
                warn!(
                    key = key.as_str(),
                    "Unknown key in {CONFIG_FILE} (known keys: {})",
                    KNOWN_CONFIG_KEYS.join(", ")
                );
            }
        }

        if let Some(v) = table.get("api_url") {
            let url = v.as_str().ok_or_else(|| invalid("api_url", "expected a string"))?;
            self.api_url = normalize_api_url(url)?;
        }
        if let Some(v) = table.get("app_env") {
            let name = v.as_str().ok_or_else(|| invalid("app_env", "expected a string"))?;
            if !name.trim().is_empty() {
                self.app_env = name.trim().to_string();
            }
        }
        if let Some(v) = table.get("debounce_ms") {
            self.debounce_ms = toml_millis("debounce_ms", v)?;
        }
        if let Some(v) = table.get("request_timeout_ms") {
            let ms = toml_millis("request_timeout_ms", v)?;
            if ms == 0 {
                return Err(invalid("request_timeout_ms", "must be greater than zero"));
            }
            self.request_timeout_ms = ms;
        }
        Ok(())
    }

    /// Merge `SUBFIND_*` variables through `lookup`. Blank or malformed values
    /// keep the current setting.
    pub fn apply_vars<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let present = |k: &str| lookup(k).filter(|v| !v.trim().is_empty());

        if let Some(url) = present(VAR_API_URL) {
            match normalize_api_url(&url) {
                Ok(url) => self.api_url = url,
                Err(e) => warn!(var = VAR_API_URL, error = %e, "Ignoring variable"),
            }
        }
        if let Some(name) = present(VAR_APP_ENV) {
            self.app_env = name.trim().to_string();
        }
        if let Some(ms) = present(VAR_DEBOUNCE_MS) {
            match ms.trim().parse::<u64>() {
                Ok(ms) => self.debounce_ms = ms,
                Err(_) => warn!(
                    var = VAR_DEBOUNCE_MS,
                    value = ms.as_str(),
                    "Ignoring non-numeric variable"
                ),
            }
        }
    }
}

fn invalid(key: &str, reason: &str) -> ConfigError {
    ConfigError::InvalidValue { key: key.to_string(), reason: reason.to_string() }
}

fn toml_millis(key: &str, v: &toml::Value) -> ConfigResult<u64> {
    let ms = v.as_integer().ok_or_else(|| invalid(key, "expected an integer"))?;
    u64::try_from(ms).map_err(|_| invalid(key, "must not be negative"))
}

/// Require an http(s) URL and strip any trailing slash.
pub fn normalize_api_url(url: &str) -> ConfigResult<String> {
    let url = url.trim();
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        return Err(invalid("api_url", "must start with http:// or https://"));
    }
    Ok(url.trim_end_matches('/').to_string())
}

/// Simple Levenshtein edit distance for typo suggestions.
fn edit_distance(a: &str, b: &str) -> usize {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];
    for (i, &ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &cb) in b.iter().enumerate() {
            let cost = usize::from(ca != cb);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[b.len()]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> =
            pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |k| map.get(k).cloned()
    }

    #[test]
    fn defaults_match_documented_values() {
        let env = Env::default();
        assert_eq!(env.api_url, "http://localhost:8000/api");
        assert_eq!(env.app_env, "development");
        assert_eq!(env.debounce(), Duration::from_millis(300));
        assert_eq!(env.app_env_kind(), AppEnv::Development);
    }

    #[test]
    fn variables_override_and_blank_falls_back() {
        let mut env = Env::default();
        env.apply_vars(vars(&[
            (VAR_API_URL, "https://api.example.com/v1/"),
            (VAR_APP_ENV, "   "),
            (VAR_DEBOUNCE_MS, "150"),
        ]));
        assert_eq!(env.api_url, "https://api.example.com/v1");
        assert_eq!(env.app_env, "development");
        assert_eq!(env.debounce_ms, 150);
    }

    #[test]
    fn malformed_variables_are_ignored() {
        let mut env = Env::default();
        env.apply_vars(vars(&[(VAR_API_URL, "ftp://nope"), (VAR_DEBOUNCE_MS, "soon")]));
        assert_eq!(env, Env::default());
    }

    #[test]
    fn table_overrides_known_keys() {
        let table: toml::Table = r#"
            api_url = "https://staging.example.com/api"
            app_env = "staging"
            debounce_ms = 120
            request_timeout_ms = 2500
            debounce = 5
        "#
        .parse()
        .unwrap();
        let mut env = Env::default();
        env.apply_table(&table).unwrap();
        assert_eq!(env.api_url, "https://staging.example.com/api");
        assert_eq!(env.app_env_kind(), AppEnv::Staging);
        assert_eq!(env.debounce_ms, 120);
        assert_eq!(env.request_timeout(), Duration::from_millis(2500));
    }

    #[test]
    fn table_rejects_bad_values() {
        let mut env = Env::default();
        let table: toml::Table = "debounce_ms = -1".parse().unwrap();
        assert!(env.apply_table(&table).is_err());
        let table: toml::Table = "request_timeout_ms = 0".parse().unwrap();
        assert!(env.apply_table(&table).is_err());
        let table: toml::Table = "api_url = 8000".parse().unwrap();
        assert!(env.apply_table(&table).is_err());
    }

    #[test]
    fn load_reads_config_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE), "app_env = \"production\"\n").unwrap();
        let mut env = Env::default();
        env.apply_file(&dir.path().join(CONFIG_FILE)).unwrap();
        assert!(env.is_production());
    }

    #[test]
    fn invalid_toml_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, "api_url = ").unwrap();
        let err = Env::default().apply_file(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn edit_distance_suggests_close_keys() {
        assert_eq!(edit_distance("api_ur", "api_url"), 1);
        assert_eq!(edit_distance("debounce", "debounce_ms"), 3);
        assert_eq!(edit_distance("", "abc"), 3);
    }

    #[test]
    fn app_env_classification() {
        assert_eq!(AppEnv::from_name("PROD"), AppEnv::Production);
        assert_eq!(AppEnv::from_name("preview"), AppEnv::Staging);
        assert_eq!(AppEnv::from_name("qa"), AppEnv::Other);
    }
}
