//! Error types for GitHub fetches.

use reqwest::StatusCode;
use thiserror::Error;

/// A single GitHub request failed.
#[derive(Error, Debug)]
pub enum FetchError {
    /// The HTTP client could not be constructed
    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// Connection, timeout or other transport failure
    #[error("Request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Non-success HTTP status
    #[error("GitHub API returned {status} for {url}")]
    Status { url: String, status: StatusCode },

    /// Response body was not the expected JSON
    #[error("Failed to decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

impl FetchError {
    /// Create a status error.
    pub fn status(url: impl Into<String>, status: StatusCode) -> Self {
        Self::Status {
            url: url.into(),
            status,
        }
    }
}

/// The leaderboard could not be built. Nothing partial is shown.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Failed to load data: {0}")]
    Fetch(#[from] FetchError),
}
