//! Request dispatch.
//!
//! Endpoint helpers never talk to `reqwest` directly. They hand a URL and
//! [`RequestOptions`] to a [`Dispatcher`] and get the parsed JSON body
//! back, which keeps them trivially testable with a fake dispatcher.

use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use crate::params::encode_params;
use crate::{ClientConfig, HttpMethod, RequestError, RequestOptions};

/// Maximum length of the response body preview kept in
/// [`RequestError::Status`].
const BODY_PREVIEW_LEN: usize = 500;

/// Sends a single request to an `ArcGIS` REST endpoint.
#[async_trait]
pub trait Dispatcher: Send + Sync {
    /// Sends `options` to `url` and returns the parsed JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError`] on transport failure, non-2xx status,
    /// malformed JSON, or a service-reported error envelope.
    async fn dispatch(
        &self,
        url: &str,
        options: &RequestOptions,
    ) -> Result<serde_json::Value, RequestError>;
}

/// Dispatches a request and deserializes the body into `T`.
///
/// # Errors
///
/// Returns whatever the dispatcher returned, or [`RequestError::Json`] if
/// the body does not match `T`.
pub async fn request<T, D>(
    dispatcher: &D,
    url: &str,
    options: &RequestOptions,
) -> Result<T, RequestError>
where
    T: DeserializeOwned,
    D: Dispatcher + ?Sized,
{
    let body = dispatcher.dispatch(url, options).await?;
    Ok(serde_json::from_value(body)?)
}

/// [`Dispatcher`] backed by a shared `reqwest` client.
///
/// Cloning is cheap; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct HttpDispatcher {
    client: reqwest::Client,
    max_get_url_length: usize,
}

impl HttpDispatcher {
    /// Builds a dispatcher from the embedded default [`ClientConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`RequestError::Http`] if the TLS backend cannot be
    /// initialized.
    pub fn new() -> Result<Self, RequestError> {
        Self::from_config(&ClientConfig::default())
    }

    /// Builds a dispatcher with its own `reqwest` client.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError::Http`] if the client cannot be built.
    pub fn from_config(config: &ClientConfig) -> Result<Self, RequestError> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self::with_client(client, config))
    }

    /// Wraps an existing `reqwest` client. Only the non-client settings of
    /// `config` are used.
    #[must_use]
    pub const fn with_client(client: reqwest::Client, config: &ClientConfig) -> Self {
        Self {
            client,
            max_get_url_length: config.max_get_url_length,
        }
    }

    fn build_request(
        &self,
        url: &str,
        options: &RequestOptions,
    ) -> Result<reqwest::RequestBuilder, RequestError> {
        let params = encode_params(&options.effective_params());

        let builder = match options.http_method {
            HttpMethod::Get => {
                let full_url = reqwest::Url::parse_with_params(url, &params).map_err(|e| {
                    RequestError::InvalidUrl {
                        url: url.to_string(),
                        message: e.to_string(),
                    }
                })?;

                if full_url.as_str().len() > self.max_get_url_length {
                    log::debug!(
                        "GET {url} exceeds {} bytes, sending as POST",
                        self.max_get_url_length
                    );
                    self.client.post(url).form(&params)
                } else {
                    log::debug!("GET {full_url}");
                    self.client.get(full_url)
                }
            }
            HttpMethod::Post => {
                log::debug!("POST {url}");
                self.client.post(url).form(&params)
            }
        };

        Ok(options
            .headers
            .iter()
            .fold(builder, |builder, (name, value)| builder.header(name, value)))
    }
}

#[async_trait]
impl Dispatcher for HttpDispatcher {
    async fn dispatch(
        &self,
        url: &str,
        options: &RequestOptions,
    ) -> Result<serde_json::Value, RequestError> {
        let response = self.build_request(url, options)?.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(RequestError::Status {
                status: status.as_u16(),
                url: url.to_string(),
                body: preview(&text),
            });
        }

        let body: serde_json::Value = serde_json::from_str(&text)?;
        check_for_errors(&body, url)?;
        Ok(body)
    }
}

/// Detects the error envelopes `ArcGIS` returns with an HTTP 200 status.
///
/// Two shapes exist in the wild:
///
/// * `{"error": {"code": 400, "message": "...", "details": [...]}}`
/// * `{"status": "failed", "messages": [...]}` (older services and jobs)
fn check_for_errors(body: &serde_json::Value, url: &str) -> Result<(), RequestError> {
    if let Some(error) = body.get("error") {
        let code = error.get("code").and_then(serde_json::Value::as_i64);
        let message = error
            .get("message")
            .and_then(serde_json::Value::as_str)
            .unwrap_or("Unknown error")
            .to_string();
        let details = string_list(error.get("details"));
        log::warn!("{url}: service returned error {code:?}: {message}");
        return Err(RequestError::ArcGis {
            code,
            message,
            details,
            url: url.to_string(),
        });
    }

    let status = body.get("status").and_then(serde_json::Value::as_str);
    if matches!(status, Some("failed" | "error")) {
        let details = string_list(body.get("messages"));
        let message = details
            .first()
            .cloned()
            .unwrap_or_else(|| format!("Request {}", status.unwrap_or_default()));
        log::warn!("{url}: service reported status {status:?}: {message}");
        return Err(RequestError::ArcGis {
            code: None,
            message,
            details,
            url: url.to_string(),
        });
    }

    Ok(())
}

fn string_list(value: Option<&serde_json::Value>) -> Vec<String> {
    value
        .and_then(serde_json::Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(serde_json::Value::as_str)
                .map(String::from)
                .collect()
        })
        .unwrap_or_default()
}

fn preview(text: &str) -> String {
    if text.len() <= BODY_PREVIEW_LEN {
        return text.to_string();
    }
    let mut end = BODY_PREVIEW_LEN;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &text[..end])
}
