//! HTTP client for the upstream fraud feed.
//!
//! The feed is a GET-able text resource (a spreadsheet published as CSV):
//! a header line followed by data rows. The client owns line-ending
//! normalization so the parser can split on `\n` alone.

use std::time::Duration;

use crate::error::FeedError;

/// Client for the published fraud-feed CSV.
///
/// Holds the `reqwest` client and the feed URL. Point the URL at a mock
/// server in tests.
pub struct FeedClient {
    client: reqwest::Client,
    url: String,
}

impl FeedClient {
    /// Creates a client for the given feed URL.
    ///
    /// # Errors
    ///
    /// Returns [`FeedError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(url: &str, timeout_secs: u64) -> Result<Self, FeedError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("fraudcheck/0.1 (fraud-number-lookup)")
            .build()?;

        Ok(Self {
            client,
            url: url.to_owned(),
        })
    }

    /// Fetches the feed body as text with line endings normalized to `\n`.
    ///
    /// # Errors
    ///
    /// - [`FeedError::Status`] if the feed host answers with a non-2xx status.
    /// - [`FeedError::Http`] on transport failure or body read failure.
    pub async fn fetch(&self) -> Result<String, FeedError> {
        let response = self.client.get(&self.url).send().await?;
        let status = response.status();
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "feed fetch rejected");
            return Err(FeedError::Status {
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        Ok(body.replace("\r\n", "\n"))
    }
}
