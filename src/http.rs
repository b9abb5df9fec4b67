//! reqwest-backed JSON fetching.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use url::Url;

use crate::capability::JsonFetcher;
use crate::error::ResolutionError;

/// [`JsonFetcher`] over a shared reqwest [`Client`]
#[derive(Debug, Clone, Default)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses an existing client, e.g. one configured with a timeout
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl JsonFetcher for HttpFetcher {
    async fn get_json(&self, url: &str) -> Result<Value, ResolutionError> {
        let url = Url::parse(url)?;
        let response = self.client
            .get(url)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ResolutionError::ResolutionFailed(
                format!("HTTP {} when fetching {}", response.status(), response.url())
            ));
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}
