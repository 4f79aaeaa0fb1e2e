//! Pass-through request options.
//!
//! Endpoint helpers take a URL plus whatever the caller wants forwarded to
//! the dispatcher. The forwarded set is closed: only the fields on
//! [`RequestOptions`] ever reach the wire.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// HTTP verb used to reach the service.
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum HttpMethod {
    /// Parameters encoded in the query string.
    #[default]
    Get,
    /// Parameters sent as a form-encoded body.
    Post,
}

/// Options forwarded verbatim from an endpoint helper to the dispatcher.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestOptions {
    /// HTTP verb. Long GET requests may still be promoted to POST by the
    /// dispatcher (see [`crate::ClientConfig::max_get_url_length`]).
    #[serde(default)]
    pub http_method: HttpMethod,
    /// Additional service parameters (e.g. `f`, `returnUrl`).
    #[serde(default)]
    pub params: BTreeMap<String, serde_json::Value>,
    /// Access token, sent as the `token` parameter.
    #[serde(default)]
    pub token: Option<String>,
    /// Extra HTTP headers.
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
}

impl RequestOptions {
    /// Creates empty options (GET, no params, no token).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the HTTP verb.
    #[must_use]
    pub const fn with_http_method(mut self, method: HttpMethod) -> Self {
        self.http_method = method;
        self
    }

    /// Adds a service parameter, replacing any previous value for `key`.
    #[must_use]
    pub fn with_param(
        mut self,
        key: impl Into<String>,
        value: impl Into<serde_json::Value>,
    ) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    /// Sets the access token.
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Adds an HTTP header.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Returns the params that go on the wire: the caller's params plus
    /// `f=json` (unless the caller chose a format) and `token` (if set).
    #[must_use]
    pub fn effective_params(&self) -> BTreeMap<String, serde_json::Value> {
        let mut params = self.params.clone();
        params
            .entry("f".to_string())
            .or_insert_with(|| serde_json::Value::from("json"));
        if let Some(token) = &self.token {
            params.insert("token".to_string(), serde_json::Value::from(token.as_str()));
        }
        params
    }
}
