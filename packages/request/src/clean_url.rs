//! Base URL normalization.
//!
//! Callers pass service URLs copied from browsers and portal item pages,
//! so they commonly carry a trailing slash, a `?f=pjson` query or a
//! `#fragment`. Endpoint helpers append path segments to the cleaned URL.

/// Normalizes a service base URL so path segments can be appended.
///
/// Trims surrounding whitespace, drops any query string or fragment, and
/// removes trailing slashes.
#[must_use]
pub fn clean_url(url: &str) -> String {
    let url = url.trim();
    let end = url.find(['?', '#']).unwrap_or(url.len());
    url[..end].trim_end_matches('/').to_string()
}
