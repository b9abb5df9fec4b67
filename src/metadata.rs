//! Client for the DID metadata service.

use std::sync::Arc;

use tracing::debug;

use crate::capability::JsonFetcher;
use crate::config::DEFAULT_METADATA_BASE_URL;
use crate::error::ResolutionError;
use crate::types::{Metadata, TokenId};

/// Fetches `{base_url}/{tokenId}` metadata documents
#[derive(Clone)]
pub struct MetadataClient {
    fetcher: Arc<dyn JsonFetcher>,
    base_url: String,
}

impl MetadataClient {
    /// Client against the public metadata service
    pub fn new(fetcher: Arc<dyn JsonFetcher>) -> Self {
        Self::with_base_url(fetcher, DEFAULT_METADATA_BASE_URL)
    }

    pub fn with_base_url(fetcher: Arc<dyn JsonFetcher>, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { fetcher, base_url }
    }

    pub fn url_for(&self, token_id: TokenId) -> String {
        format!("{}/{}", self.base_url, token_id)
    }

    /// Full metadata document of a DID token
    pub async fn metadata(&self, token_id: TokenId) -> Result<Metadata, ResolutionError> {
        let url = self.url_for(token_id);
        debug!(%url, "fetching DID metadata");

        let doc = self.fetcher
            .get_json(&url)
            .await
            .map_err(ResolutionError::into_resolution_failure)?;

        serde_json::from_value(doc)
            .map_err(|e| ResolutionError::ResolutionFailed(format!("malformed metadata: {e}")))
    }

    pub async fn image(&self, token_id: TokenId) -> Result<Option<String>, ResolutionError> {
        Ok(non_empty(self.metadata(token_id).await?.image))
    }

    pub async fn name(&self, token_id: TokenId) -> Result<Option<String>, ResolutionError> {
        Ok(non_empty(self.metadata(token_id).await?.name))
    }

    pub async fn description(&self, token_id: TokenId) -> Result<Option<String>, ResolutionError> {
        Ok(non_empty(self.metadata(token_id).await?.description))
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
