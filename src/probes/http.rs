//! Blocking HTTP probe against the node's admin interface

use std::time::Duration;

use thiserror::Error;
use tracing::debug;

use crate::config::HttpConfig;

/// Error from a single HTTP probe
///
/// A timeout is deliberately the same error class as a refused connection
/// or a non-success status: the probe either produced a usable body within
/// the deadline or it did not.
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("could not build http client: {0}")]
    Client(reqwest::Error),
    #[error("request to {url} failed: {source}")]
    Request { url: String, source: reqwest::Error },
}

/// Fetches `path` from the node's HTTP interface and returns the body.
///
/// One request, no retries; the configured timeout bounds the whole
/// request including the body read.
pub fn get_text(cfg: &HttpConfig, path: &str) -> Result<String, ProbeError> {
    let url = format!("http://{}:{}{}", cfg.host, cfg.port, path);
    debug!(url = %url, timeout_secs = cfg.timeout_secs, "http probe");

    let client = reqwest::blocking::Client::builder()
        .timeout(Duration::from_secs(cfg.timeout_secs))
        .build()
        .map_err(ProbeError::Client)?;

    client
        .get(&url)
        .send()
        .and_then(|resp| resp.error_for_status())
        .and_then(|resp| resp.text())
        .map_err(|source| ProbeError::Request { url, source })
}
