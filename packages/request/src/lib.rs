#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Generic `ArcGIS` REST request layer.
//!
//! Every typed endpoint helper (feature layers, portal items, etc.) goes
//! through the same three pieces:
//!
//! 1. [`clean_url()`] normalizes the base service URL the caller passed in.
//! 2. [`RequestOptions`] carries the explicit set of pass-through fields
//!    (HTTP method, extra parameters, token, headers).
//! 3. A [`Dispatcher`] sends the request and returns the parsed JSON body.
//!    [`HttpDispatcher`] is the `reqwest`-backed implementation; tests swap
//!    in their own.

pub mod clean_url;
pub mod config;
pub mod dispatcher;
pub mod options;
pub mod params;
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use clean_url::clean_url;
pub use config::ClientConfig;
pub use dispatcher::{Dispatcher, HttpDispatcher, request};
pub use options::{HttpMethod, RequestOptions};

/// Errors that can occur while dispatching an `ArcGIS` REST request.
#[derive(Debug, thiserror::Error)]
pub enum RequestError {
    /// HTTP transport failed (connection, timeout, TLS, body read).
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Response body was not valid JSON or did not match the expected shape.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// The request URL could not be parsed.
    #[error("Invalid URL '{url}': {message}")]
    InvalidUrl {
        /// The offending URL.
        url: String,
        /// Parser error message.
        message: String,
    },

    /// The server answered with a non-2xx status.
    #[error("HTTP {status} from {url}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Request URL (without query string).
        url: String,
        /// Truncated response body, for diagnostics.
        body: String,
    },

    /// The service returned a 2xx response carrying an `ArcGIS` error
    /// envelope.
    #[error("ArcGIS error {}: {message} ({url})", display_code(.code))]
    ArcGis {
        /// Service error code, when present.
        code: Option<i64>,
        /// Service error message.
        message: String,
        /// Additional detail lines reported by the service.
        details: Vec<String>,
        /// Request URL (without query string).
        url: String,
    },

    /// Client configuration could not be parsed.
    #[error("Config parse error: {0}")]
    Config(#[from] toml::de::Error),
}

fn display_code(code: &Option<i64>) -> String {
    code.map_or_else(|| "?".to_string(), |c| c.to_string())
}
