//! Backend base URLs and client-wide settings.
//!
//! # Design
//! `ClientConfig` is built once and handed to `HttpClient` by value. There is
//! no process-wide registry, so tests can run side by side with different
//! backends. A single-backend setup is just a config with no categories:
//! every lookup falls back to the default base URL.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ClientError;

const ENV_PREFIX: &str = "GRIDNET_API_";
const ENV_SUFFIX: &str = "_URL";
const DEFAULT_URL_VAR: &str = "GRIDNET_API_URL";
const PARSE_APP_ID_VAR: &str = "GRIDNET_PARSE_APPLICATION_ID";
const PARSE_REST_KEY_VAR: &str = "GRIDNET_PARSE_REST_API_KEY";
const TIMEOUT_VAR: &str = "GRIDNET_HTTP_TIMEOUT_MS";
const MAX_BODY_VAR: &str = "GRIDNET_HTTP_MAX_BODY_BYTES";

pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

/// Name of a logical backend with its own base URL.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ApiCategory(Cow<'static, str>);

impl ApiCategory {
    /// Authentication backend.
    pub const AUTH: ApiCategory = ApiCategory(Cow::Borrowed("auth"));
    /// Parse-style data backend; the default for most pages.
    pub const PARSE: ApiCategory = ApiCategory(Cow::Borrowed("parse"));
    /// Model registry backend.
    pub const MODEL: ApiCategory = ApiCategory(Cow::Borrowed("model"));

    pub fn new(name: impl Into<String>) -> Self {
        Self(Cow::Owned(name.into()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ApiCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ApiCategory {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// Immutable client configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    pub default_base_url: String,
    /// Base URL per category name.
    #[serde(default)]
    pub categories: BTreeMap<String, String>,
    /// Headers attached to every request before per-request overrides.
    #[serde(default)]
    pub default_headers: Vec<(String, String)>,
    /// `None` leaves timing to the transport's defaults.
    #[serde(default)]
    pub timeout_ms: Option<u64>,
    /// Largest response body accepted, in bytes. `None` means no cap.
    #[serde(default)]
    pub max_body_bytes: Option<u64>,
}

impl ClientConfig {
    pub fn new(default_base_url: impl Into<String>) -> Self {
        Self {
            default_base_url: default_base_url.into(),
            categories: BTreeMap::new(),
            default_headers: Vec::new(),
            timeout_ms: None,
            max_body_bytes: None,
        }
    }

    pub fn with_category(mut self, category: impl Into<ApiCategory>, base_url: impl Into<String>) -> Self {
        self.categories
            .insert(category.into().as_str().to_string(), base_url.into());
        self
    }

    pub fn with_default_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.default_headers.push((name.into(), value.into()));
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout_ms = Some(timeout.as_millis().try_into().unwrap_or(u64::MAX));
        self
    }

    pub fn with_max_body_bytes(mut self, limit: u64) -> Self {
        self.max_body_bytes = Some(limit);
        self
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }

    /// Base URL for `category`. Missing or unknown categories use the
    /// default base URL.
    pub fn base_url_for(&self, category: Option<&ApiCategory>) -> &str {
        category
            .and_then(|c| self.categories.get(c.as_str()))
            .map(String::as_str)
            .unwrap_or(&self.default_base_url)
    }

    /// Parse a JSON config document.
    pub fn from_json(raw: &str) -> Result<Self, ClientError> {
        let config: ClientConfig =
            serde_json::from_str(raw).map_err(|e| ClientError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load from the process environment. See [`ClientConfig::from_vars`].
    pub fn from_env() -> Result<Self, ClientError> {
        Self::from_vars(std::env::vars())
    }

    /// Build a config from `(name, value)` pairs.
    ///
    /// - `GRIDNET_API_URL`: default base URL, required.
    /// - `GRIDNET_API_<NAME>_URL`: base URL for category `<name>`, lower-cased.
    /// - `GRIDNET_PARSE_APPLICATION_ID` / `GRIDNET_PARSE_REST_API_KEY`: sent as
    ///   `X-Parse-Application-Id` / `X-Parse-REST-API-Key` on every request.
    /// - `GRIDNET_HTTP_TIMEOUT_MS`: request timeout, `0` disables. Defaults
    ///   to 30 seconds.
    /// - `GRIDNET_HTTP_MAX_BODY_BYTES`: response body cap, `0` or unset means
    ///   no cap.
    pub fn from_vars<I, K, V>(vars: I) -> Result<Self, ClientError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut default_base_url = None;
        let mut categories = BTreeMap::new();
        let mut app_id = None;
        let mut rest_key = None;
        let mut timeout_ms = Some(DEFAULT_TIMEOUT_MS);
        let mut max_body_bytes = None;

        for (key, value) in vars {
            let key = key.as_ref();
            let value: String = value.into();
            match key {
                DEFAULT_URL_VAR => default_base_url = Some(value),
                PARSE_APP_ID_VAR => app_id = Some(value),
                PARSE_REST_KEY_VAR => rest_key = Some(value),
                TIMEOUT_VAR => {
                    let ms = parse_u64(TIMEOUT_VAR, &value)?;
                    timeout_ms = (ms > 0).then_some(ms);
                }
                MAX_BODY_VAR => {
                    let bytes = parse_u64(MAX_BODY_VAR, &value)?;
                    max_body_bytes = (bytes > 0).then_some(bytes);
                }
                _ => {
                    if let Some(name) = key
                        .strip_prefix(ENV_PREFIX)
                        .and_then(|rest| rest.strip_suffix(ENV_SUFFIX))
                        .filter(|name| !name.is_empty())
                    {
                        categories.insert(name.to_ascii_lowercase(), value);
                    }
                }
            }
        }

        let default_base_url = default_base_url
            .ok_or_else(|| ClientError::Config(format!("{DEFAULT_URL_VAR} is not set")))?;

        let mut default_headers = Vec::new();
        if let Some(id) = app_id {
            default_headers.push(("X-Parse-Application-Id".to_string(), id));
        }
        if let Some(key) = rest_key {
            default_headers.push(("X-Parse-REST-API-Key".to_string(), key));
        }

        let config = Self {
            default_base_url,
            categories,
            default_headers,
            timeout_ms,
            max_body_bytes,
        };
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ClientError> {
        if self.default_base_url.trim().is_empty() {
            return Err(ClientError::Config("default base URL is empty".to_string()));
        }
        if let Some((name, _)) = self.categories.iter().find(|(_, url)| url.trim().is_empty()) {
            return Err(ClientError::Config(format!(
                "base URL for category {name:?} is empty"
            )));
        }
        Ok(())
    }
}

fn parse_u64(var: &str, value: &str) -> Result<u64, ClientError> {
    value
        .trim()
        .parse()
        .map_err(|_| ClientError::Config(format!("{var} is not a number: {value:?}")))
}
