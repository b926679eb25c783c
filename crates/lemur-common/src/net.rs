//! HTTP fetch utilities for the Lemur document loader.
//!
//! Provides a simple blocking GET wrapper. The engine core never talks to
//! the network directly; only the loader in `lemur-engine` goes through
//! this boundary, and a blocked or failed fetch is substituted with an
//! error document there.

use std::time::Duration;

use thiserror::Error;

/// User-Agent header sent with all requests.
///
/// Mimics a common desktop browser to avoid basic bot detection.
const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Default request timeout.
const TIMEOUT: Duration = Duration::from_secs(30);

/// Failure fetching a resource over HTTP.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The HTTP client could not be constructed or the request failed.
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    /// The server answered with a non-success status code.
    #[error("HTTP error: {0}")]
    Status(reqwest::StatusCode),
}

/// Fetch a URL and return its body as text.
///
/// # Errors
///
/// Returns a [`FetchError`] if the HTTP client cannot be created, the
/// request fails, the response has a non-success status, or the body
/// cannot be decoded.
pub fn fetch_text(url: &str) -> Result<String, FetchError> {
    let client = reqwest::blocking::Client::builder()
        .timeout(TIMEOUT)
        .build()?;

    let response = client.get(url).header("User-Agent", USER_AGENT).send()?;

    if !response.status().is_success() {
        return Err(FetchError::Status(response.status()));
    }

    Ok(response.text()?)
}
