//! Avatar text parsing and interpretation.
//!
//! An avatar record is a colon-delimited string stored under the `avatar`
//! key of the resolver contract. Records of the form
//! `nft:<chainId>:<standard>:<contractAddress>:<tokenId>` point at an NFT
//! whose metadata holds the image; any other scheme is taken to be the image
//! URL itself.

use std::str::FromStr;
use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, warn};

use crate::capability::{JsonFetcher, NftReader};
use crate::chains::default_chain_table;
use crate::error::ResolutionError;
use crate::types::{AvatarReference, ChainTable, NftStandard};

const NFT_SCHEME: &str = "nft";
const NFT_FIELD_COUNT: usize = 5;

impl AvatarReference {
    /// Parses an avatar text record
    pub fn parse(record: &str) -> Result<Self, ResolutionError> {
        let fields: Vec<&str> = record.split(':').collect();
        if fields.len() < 2 {
            return Err(ResolutionError::InvalidAvatarText);
        }

        if fields[0] != NFT_SCHEME {
            return Ok(Self::DirectUrl(record.to_string()));
        }

        if fields.len() != NFT_FIELD_COUNT {
            return Err(ResolutionError::InvalidAvatarText);
        }

        let standard = NftStandard::from_field(fields[2])
            .ok_or(ResolutionError::InvalidAvatarText)?;

        Ok(Self::Nft {
            chain_id: fields[1].to_string(),
            standard,
            contract: fields[3].to_string(),
            token_id: fields[4].to_string(),
        })
    }
}

impl FromStr for AvatarReference {
    type Err = ResolutionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Turns avatar records into image URLs
#[derive(Clone)]
pub struct AvatarInterpreter {
    nft: Arc<dyn NftReader>,
    fetcher: Arc<dyn JsonFetcher>,
}

impl AvatarInterpreter {
    pub fn new(nft: Arc<dyn NftReader>, fetcher: Arc<dyn JsonFetcher>) -> Self {
        Self { nft, fetcher }
    }

    /// Resolves an avatar record to an image URL.
    ///
    /// `chains` overrides the built-in chain table for NFT records. Direct
    /// URLs are returned unchanged without any external call.
    pub async fn interpret(
        &self,
        record: &str,
        chains: Option<&ChainTable>,
    ) -> Result<String, ResolutionError> {
        let (chain_id, standard, contract, token_id) = match AvatarReference::parse(record)? {
            AvatarReference::DirectUrl(url) => {
                debug!(%url, "avatar is a direct url");
                return Ok(url);
            }
            AvatarReference::Nft { chain_id, standard, contract, token_id } => {
                (chain_id, standard, contract, token_id)
            }
        };

        let endpoint = chains
            .unwrap_or_else(|| default_chain_table())
            .get(&chain_id)
            .ok_or_else(|| ResolutionError::ChainNotConfigured(chain_id.clone()))?;

        debug!(
            chain = %chain_id,
            network = %endpoint.network,
            %standard,
            %contract,
            %token_id,
            "reading nft token uri"
        );

        let token_uri = match standard {
            NftStandard::Erc721 => self.nft.erc721_token_uri(endpoint, &contract, &token_id).await,
            NftStandard::Erc1155 => self.nft.erc1155_uri(endpoint, &contract, &token_id).await,
        }
        .map_err(|e| match e {
            ResolutionError::InvalidAvatarText => e,
            other => {
                warn!(error = %other, %contract, %token_id, "nft token uri read failed");
                ResolutionError::InvalidTokenUri
            }
        })?;

        self.image_from_token_uri(&token_uri).await
    }

    /// Fetches a token URI and returns the `image` field of its JSON body
    pub async fn image_from_token_uri(&self, token_uri: &str) -> Result<String, ResolutionError> {
        debug!(%token_uri, "fetching token metadata");

        let doc = self.fetcher.get_json(token_uri).await.map_err(|e| {
            warn!(error = %e, %token_uri, "token uri fetch failed");
            ResolutionError::InvalidTokenUri
        })?;

        doc.get("image")
            .and_then(Value::as_str)
            .filter(|image| !image.is_empty())
            .map(str::to_string)
            .ok_or(ResolutionError::InvalidTokenUri)
    }
}
