//! Blocking HTTP access to the results site.
//!
//! Everything that touches the network goes through the [`Fetch`] trait so the
//! locator and engine can be driven by an in-memory source in tests.

use reqwest::blocking::Client;
use thiserror::Error;
use tracing::debug;

use crate::config::USER_AGENT;

/// Failure to retrieve a URL.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FetchError {
    /// Connection, TLS, or body read failure.
    #[error("request to {url} failed: {message}")]
    Request { url: String, message: String },

    /// The server answered with a non-success status.
    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },
}

/// Source of raw response bodies.
pub trait Fetch {
    fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError>;
}

/// `reqwest` blocking client with the client's default timeout.
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    pub fn new() -> Result<Self, FetchError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| FetchError::Request {
                url: String::new(),
                message: format!("failed to build HTTP client: {e}"),
            })?;
        Ok(Self { client })
    }

    /// Wrap a preconfigured client (proxy settings, timeouts).
    pub fn from_client(client: Client) -> Self {
        Self { client }
    }
}

impl Fetch for HttpClient {
    fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        debug!(url, "GET");
        let resp = self.client.get(url).send().map_err(|e| FetchError::Request {
            url: url.to_string(),
            message: e.to_string(),
        })?;

        if !resp.status().is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: resp.status().as_u16(),
            });
        }

        let body = resp.bytes().map_err(|e| FetchError::Request {
            url: url.to_string(),
            message: format!("failed to read body: {e}"),
        })?;
        debug!(url, bytes = body.len(), "fetched");
        Ok(body.to_vec())
    }
}
