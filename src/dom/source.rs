use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tokio::time::timeout;

use crate::error::FetchError;

/// Fetch-and-read-as-text contract for route content.
#[async_trait]
pub trait ContentSource: Send + Sync {
    /// Fetch the full body stored at `location`.
    async fn fetch_text(&self, location: &str) -> Result<String, FetchError>;
}

/// Fetches content over HTTP relative to a site base URL.
pub struct HttpContentSource {
    client: Client,
    base_url: String,
    request_timeout: Option<Duration>,
}

impl HttpContentSource {
    /// `request_timeout` of `None` waits indefinitely.
    pub fn new(
        base_url: impl Into<String>,
        request_timeout: Option<Duration>,
    ) -> Result<Self, FetchError> {
        let client = Client::builder().build().map_err(FetchError::Client)?;
        Ok(Self {
            client,
            base_url: base_url.into(),
            request_timeout,
        })
    }

    /// Absolute URL for a content location.
    ///
    /// Locations that already carry a scheme are used as-is.
    pub fn url_for(&self, location: &str) -> String {
        if location.starts_with("http://") || location.starts_with("https://") {
            return location.to_string();
        }
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            location.trim_start_matches('/')
        )
    }

    async fn do_fetch(&self, location: &str) -> Result<String, FetchError> {
        let url = self.url_for(location);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| FetchError::Connection {
                location: location.to_string(),
                source: e,
            })?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(FetchError::NotFound {
                location: location.to_string(),
            });
        }
        if !status.is_success() {
            return Err(FetchError::Status {
                location: location.to_string(),
                status: status.as_u16(),
            });
        }

        response.text().await.map_err(|e| FetchError::Body {
            location: location.to_string(),
            source: e,
        })
    }
}

#[async_trait]
impl ContentSource for HttpContentSource {
    async fn fetch_text(&self, location: &str) -> Result<String, FetchError> {
        tracing::debug!(location, "fetching content");

        let Some(limit) = self.request_timeout else {
            return self.do_fetch(location).await;
        };

        match timeout(limit, self.do_fetch(location)).await {
            Ok(result) => result,
            Err(_) => Err(FetchError::Timeout {
                location: location.to_string(),
                seconds: limit.as_secs(),
            }),
        }
    }
}
