//! Capability traits for the external reads the resolver depends on.
//!
//! The resolver and interpreter only see these traits. [`crate::contracts`]
//! and [`crate::http`] provide the network-backed implementations; tests
//! substitute in-memory ones.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::ResolutionError;
use crate::types::{Address, BlockTag, ChainEndpoint, TokenId};

/// Read access to the DID registry contract
#[async_trait]
pub trait Registry: Send + Sync {
    /// Whether the DID name has been claimed
    async fn is_claimed_by_name(&self, name: &str, block: Option<BlockTag>) -> Result<bool, ResolutionError>;

    /// Whether the address owns a DID
    async fn is_claimed_by_address(&self, address: Address, block: Option<BlockTag>) -> Result<bool, ResolutionError>;

    /// Token id bound to a DID name
    async fn name_to_token_id(&self, name: &str, block: Option<BlockTag>) -> Result<TokenId, ResolutionError>;

    /// DID name bound to a token id
    async fn token_id_to_name(&self, token_id: TokenId, block: Option<BlockTag>) -> Result<String, ResolutionError>;

    /// Number of minted DIDs
    async fn total_supply(&self, block: Option<BlockTag>) -> Result<TokenId, ResolutionError>;

    /// Token id owned by `owner` at position `index`
    async fn token_of_owner_by_index(
        &self,
        owner: Address,
        index: TokenId,
        block: Option<BlockTag>,
    ) -> Result<TokenId, ResolutionError>;
}

/// Read access to the resolver contract's records
#[async_trait]
pub trait TextRecords: Send + Sync {
    /// Text record for `key`; an empty string means unset
    async fn text(&self, token_id: TokenId, key: &str, block: Option<BlockTag>) -> Result<String, ResolutionError>;

    /// Reverse record of an address; an empty string means unset
    async fn name(&self, address: Address, block: Option<BlockTag>) -> Result<String, ResolutionError>;
}

/// Token URI reads against NFT contracts on arbitrary chains
#[async_trait]
pub trait NftReader: Send + Sync {
    /// `tokenURI(tokenId)` of an ERC-721 contract
    async fn erc721_token_uri(
        &self,
        endpoint: &ChainEndpoint,
        contract: &str,
        token_id: &str,
    ) -> Result<String, ResolutionError>;

    /// `uri(tokenId)` of an ERC-1155 contract
    async fn erc1155_uri(
        &self,
        endpoint: &ChainEndpoint,
        contract: &str,
        token_id: &str,
    ) -> Result<String, ResolutionError>;
}

/// HTTP GET returning a JSON document
#[async_trait]
pub trait JsonFetcher: Send + Sync {
    async fn get_json(&self, url: &str) -> Result<Value, ResolutionError>;
}
