//! Error types shared by the navigation layers.

use thiserror::Error;

/// Failure to retrieve a page body from its content location.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Failed to build the HTTP client
    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// Could not reach the content source
    #[error("Request to '{location}' failed: {source}")]
    Connection {
        location: String,
        #[source]
        source: reqwest::Error,
    },

    /// Content source answered with a non-success status
    #[error("'{location}' returned status {status}")]
    Status { location: String, status: u16 },

    /// Request exceeded the configured timeout
    #[error("Request to '{location}' timed out after {seconds}s")]
    Timeout { location: String, seconds: u64 },

    /// Body could not be read as text
    #[error("Failed to read body of '{location}': {source}")]
    Body {
        location: String,
        #[source]
        source: reqwest::Error,
    },

    /// Content source has nothing at this location (HTTP 404)
    #[error("No content at '{location}'")]
    NotFound { location: String },
}

/// Errors surfaced by page loads and navigations.
#[derive(Debug, Error)]
pub enum NavError {
    #[error("Failed to load '{path}': {source}")]
    Fetch {
        path: String,
        #[source]
        source: FetchError,
    },

    /// The spawned navigation task panicked or was cancelled
    #[error("Navigation task aborted: {0}")]
    Aborted(#[from] tokio::task::JoinError),
}
