//! HTTP client configuration.
//!
//! Defaults live in `config/default.toml`, embedded at compile time.
//! Callers can override any subset of fields with their own TOML.

use serde::Deserialize;

use crate::RequestError;

const DEFAULT_CONFIG_TOML: &str = include_str!("../config/default.toml");

/// Settings used to build the `reqwest` client behind
/// [`crate::HttpDispatcher`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ClientConfig {
    /// `User-Agent` header sent with every request.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Whole-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// GET requests whose full URL would exceed this many bytes are sent
    /// as form-encoded POST instead. Many `ArcGIS` Server deployments sit
    /// behind proxies that reject long URLs.
    #[serde(default = "default_max_get_url_length")]
    pub max_get_url_length: usize,
}

fn default_user_agent() -> String {
    "arcgis-rest-rs/0.1".to_string()
}

const fn default_timeout_secs() -> u64 {
    60
}

const fn default_max_get_url_length() -> usize {
    2000
}

impl ClientConfig {
    /// Parses a TOML document. Missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError::Config`] if the TOML is malformed.
    pub fn from_toml_str(toml_str: &str) -> Result<Self, RequestError> {
        Ok(toml::de::from_str(toml_str)?)
    }
}

impl Default for ClientConfig {
    /// Returns the embedded default configuration.
    ///
    /// # Panics
    ///
    /// Panics if the embedded TOML is malformed (covered by tests).
    fn default() -> Self {
        Self::from_toml_str(DEFAULT_CONFIG_TOML)
            .unwrap_or_else(|e| panic!("Failed to parse embedded client config: {e}"))
    }
}
