#![forbid(unsafe_code)]

//! Runtime configuration.
//!
//! Layering: built-in defaults, then `COURSETREE_*` environment variables,
//! then command-line flags. Environment values that fail to parse are
//! skipped and remembered so they can be logged once logging is up.
//!
//! | Variable | Field |
//! |----------|-------|
//! | `COURSETREE_ENDPOINT` | `endpoint` |
//! | `COURSETREE_ROOT_SENTINEL` | `root_sentinel` |
//! | `COURSETREE_TIMEOUT_MS` | `timeout` |
//! | `COURSETREE_VIEWPORT` | `viewport_height` |
//! | `COURSETREE_OVERSCAN` | `overscan` |
//! | `COURSETREE_DIVIDERS` | `dividers` |
//! | `COURSETREE_LOG_FORMAT` | `log_format` |

use std::str::FromStr;
use std::time::Duration;

use clap::ValueEnum;
use coursetree_core::{ParentId, ROOT_SENTINEL};
use coursetree_window::DEFAULT_OVERSCAN;

/// Catalog search service queried when no endpoint is configured.
pub const DEFAULT_ENDPOINT: &str = "https://coursetreesearch-service-sandbox.dev.tophat.com/";

pub const ENV_ENDPOINT: &str = "COURSETREE_ENDPOINT";
pub const ENV_ROOT_SENTINEL: &str = "COURSETREE_ROOT_SENTINEL";
pub const ENV_TIMEOUT_MS: &str = "COURSETREE_TIMEOUT_MS";
pub const ENV_VIEWPORT: &str = "COURSETREE_VIEWPORT";
pub const ENV_OVERSCAN: &str = "COURSETREE_OVERSCAN";
pub const ENV_DIVIDERS: &str = "COURSETREE_DIVIDERS";
pub const ENV_LOG_FORMAT: &str = "COURSETREE_LOG_FORMAT";

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// One JSON object per event.
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown log format {other:?}")),
        }
    }
}

/// Resolved settings for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Lookup service URL.
    pub endpoint: String,
    /// Parent id that marks top-level records.
    pub root_sentinel: ParentId,
    /// Per-request lookup timeout.
    pub timeout: Duration,
    /// Lines shown per window.
    pub viewport_height: u32,
    /// Extra rows rendered above and below the viewport.
    pub overscan: usize,
    /// Whether root-level rows get a divider line.
    pub dividers: bool,
    pub log_format: LogFormat,
    rejected_env: Vec<(String, String)>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            root_sentinel: ROOT_SENTINEL,
            timeout: Duration::from_secs(10),
            viewport_height: 20,
            overscan: DEFAULT_OVERSCAN,
            dividers: true,
            log_format: LogFormat::Text,
            rejected_env: Vec::new(),
        }
    }
}

impl Config {
    /// Defaults overridden by the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_env_with(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by a custom environment lookup (for tests).
    #[must_use]
    pub fn from_env_with<F>(get_env: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(endpoint) = get_env(ENV_ENDPOINT)
            && !endpoint.trim().is_empty()
        {
            config.endpoint = endpoint.trim().to_string();
        }
        if let Some(root) = config.parse_env(&get_env, ENV_ROOT_SENTINEL) {
            config.root_sentinel = root;
        }
        if let Some(ms) = config.parse_env::<u64, _>(&get_env, ENV_TIMEOUT_MS) {
            config.timeout = Duration::from_millis(ms);
        }
        if let Some(rows) = config.parse_env(&get_env, ENV_VIEWPORT) {
            config.viewport_height = rows;
        }
        if let Some(rows) = config.parse_env(&get_env, ENV_OVERSCAN) {
            config.overscan = rows;
        }
        if let Some(value) = get_env(ENV_DIVIDERS) {
            match parse_bool(&value) {
                Some(enabled) => config.dividers = enabled,
                None => config.rejected_env.push((ENV_DIVIDERS.to_string(), value)),
            }
        }
        if let Some(format) = config.parse_env(&get_env, ENV_LOG_FORMAT) {
            config.log_format = format;
        }

        config
    }

    /// Environment variables that were set but could not be parsed.
    #[must_use]
    pub fn rejected_env(&self) -> &[(String, String)] {
        &self.rejected_env
    }

    fn parse_env<T, F>(&mut self, get_env: &F, key: &str) -> Option<T>
    where
        T: FromStr,
        F: Fn(&str) -> Option<String>,
    {
        let value = get_env(key)?;
        match value.trim().parse() {
            Ok(parsed) => Some(parsed),
            Err(_) => {
                self.rejected_env.push((key.to_string(), value));
                None
            }
        }
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
