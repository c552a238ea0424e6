use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::env;
use std::time::Duration;
use tracing::debug;

use super::common::build_user_agent;
use super::error::{DavError, DavResult};

/// Opaque options handed to the transport on every request.
///
/// The request layer never interprets these. [`super::transport::ReqwestTransport`]
/// understands `timeout_ms`; other transports may define their own keys.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransportOptions(Map<String, Value>);

impl TransportOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Per-request timeout from the `timeout_ms` key
    pub fn timeout(&self) -> Option<Duration> {
        self.get("timeout_ms")
            .and_then(Value::as_u64)
            .map(Duration::from_millis)
    }

    /// Key-wise merge, values from `overrides` win
    fn merged(&self, overrides: &TransportOptions) -> TransportOptions {
        let mut map = self.0.clone();
        for (key, value) in &overrides.0 {
            map.insert(key.clone(), value.clone());
        }
        TransportOptions(map)
    }
}

/// Connection settings for a WebDAV server.
///
/// A value is never mutated once handed to a client; callers wanting
/// runtime reconfiguration supply a [`ConfigProvider`] instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebDAVConfig {
    pub base_url: String,
    /// Sent on every request, in order, ahead of operation headers.
    pub headers: Vec<(String, String)>,
    #[serde(default)]
    pub transport_options: TransportOptions,
}

impl WebDAVConfig {
    /// Config for `base_url` carrying the default `User-Agent` header
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            headers: vec![("User-Agent".to_string(), build_user_agent())],
            transport_options: TransportOptions::default(),
        }
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn with_transport_option(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.transport_options = self.transport_options.with(key, value);
        self
    }

    /// Combines library or application defaults with caller overrides.
    ///
    /// A non-empty override base URL replaces the default one. Headers are
    /// concatenated defaults-first; a name present in both lists is sent
    /// twice rather than silently dropped. Transport options merge key-wise.
    pub fn merge(defaults: &WebDAVConfig, overrides: &WebDAVConfig) -> WebDAVConfig {
        let base_url = if overrides.base_url.trim().is_empty() {
            defaults.base_url.clone()
        } else {
            overrides.base_url.clone()
        };

        let mut headers = defaults.headers.clone();
        headers.extend(overrides.headers.iter().cloned());

        WebDAVConfig {
            base_url,
            headers,
            transport_options: defaults.transport_options.merged(&overrides.transport_options),
        }
    }

    /// Loads configuration from `DAVKIT_*` environment variables
    pub fn from_env() -> DavResult<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Reads `DAVKIT_*` variables as overrides for [`WebDAVConfig::merge`].
    ///
    /// Unlike [`WebDAVConfig::from_env`] a missing `DAVKIT_BASE_URL` is not
    /// an error: the base URL is left empty. Malformed headers or timeouts
    /// still fail.
    pub fn env_overrides() -> DavResult<Self> {
        Self::overrides_from_lookup(|key| env::var(key).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> DavResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let overrides = Self::overrides_from_lookup(&lookup)?;
        if overrides.base_url.is_empty() {
            return Err(DavError::InvalidConfig("DAVKIT_BASE_URL is not set".to_string()));
        }

        let config = WebDAVConfig::merge(&WebDAVConfig::new(""), &overrides);
        debug!("Loaded WebDAV config from environment: base_url={}", config.base_url);
        config.validate()?;
        Ok(config)
    }

    pub(crate) fn overrides_from_lookup<F>(lookup: F) -> DavResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = lookup("DAVKIT_BASE_URL")
            .map(|url| url.trim().to_string())
            .unwrap_or_default();

        let mut overrides = WebDAVConfig {
            base_url,
            headers: Vec::new(),
            transport_options: TransportOptions::new(),
        };

        if let Some(raw) = lookup("DAVKIT_HEADERS") {
            for pair in raw.split(';').filter(|p| !p.trim().is_empty()) {
                let (name, value) = parse_header_pair(pair)?;
                overrides = overrides.with_header(name, value);
            }
        }

        if let Some(raw) = lookup("DAVKIT_TIMEOUT_MS") {
            let timeout_ms: u64 = raw.trim().parse().map_err(|_| {
                DavError::InvalidConfig(format!("DAVKIT_TIMEOUT_MS must be an integer, got '{}'", raw))
            })?;
            overrides = overrides.with_transport_option("timeout_ms", timeout_ms);
        }

        Ok(overrides)
    }

    /// Validates that the base URL is an absolute http(s) URL
    pub fn validate(&self) -> DavResult<()> {
        let parsed = url::Url::parse(self.base_url.trim())
            .map_err(|e| DavError::InvalidUrl(format!("{}: {}", self.base_url, e)))?;

        match parsed.scheme() {
            "http" | "https" => Ok(()),
            other => Err(DavError::InvalidUrl(format!(
                "unsupported scheme '{}' in {}",
                other, self.base_url
            ))),
        }
    }
}

/// Parses `Name: value` into its trimmed parts
pub fn parse_header_pair(pair: &str) -> DavResult<(String, String)> {
    match pair.split_once(':') {
        Some((name, value)) if !name.trim().is_empty() => {
            Ok((name.trim().to_string(), value.trim().to_string()))
        }
        _ => Err(DavError::InvalidConfig(format!(
            "header must look like 'Name: value', got '{}'",
            pair
        ))),
    }
}

/// Supplies the configuration for a single operation.
///
/// The client calls [`ConfigProvider::current`] once per operation, so a
/// provider backed by changing state gives runtime reconfiguration without
/// any shared mutable config inside the client.
pub trait ConfigProvider: Send + Sync {
    fn current(&self) -> WebDAVConfig;
}

impl ConfigProvider for WebDAVConfig {
    fn current(&self) -> WebDAVConfig {
        self.clone()
    }
}

impl<F> ConfigProvider for F
where
    F: Fn() -> WebDAVConfig + Send + Sync,
{
    fn current(&self) -> WebDAVConfig {
        self()
    }
}
