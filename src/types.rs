//! Core types for DID avatar resolution.
//!
//! This module provides the request-scoped value objects shared by the
//! resolver and the avatar interpreter: parsed avatar references, chain
//! endpoint tables, resolution options and metadata documents.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

pub use ethers::types::{Address, U256};

/// Numeric identifier of a minted DID or NFT
pub type TokenId = U256;

/// Block number pinning a read to a historical chain state
pub type BlockTag = u64;

/// Mapping from chain id (as written in avatar text) to its endpoint
pub type ChainTable = HashMap<String, ChainEndpoint>;

/// A network name and the RPC endpoint used to read contracts on it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainEndpoint {
    /// Human-readable network name
    pub network: String,

    /// JSON-RPC endpoint URL
    #[serde(rename = "RPC", alias = "rpc")]
    pub rpc_url: String,
}

impl ChainEndpoint {
    pub fn new(network: impl Into<String>, rpc_url: impl Into<String>) -> Self {
        Self {
            network: network.into(),
            rpc_url: rpc_url.into(),
        }
    }
}

/// Token standard of an NFT avatar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NftStandard {
    /// ERC-721, read through `tokenURI(uint256)`
    Erc721,
    /// ERC-1155, read through `uri(uint256)`
    Erc1155,
}

impl NftStandard {
    /// Parses the standard field of an `nft:` avatar record
    pub fn from_field(field: &str) -> Option<Self> {
        match field {
            "721" => Some(Self::Erc721),
            "1155" => Some(Self::Erc1155),
            _ => None,
        }
    }
}

impl fmt::Display for NftStandard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Erc721 => f.write_str("721"),
            Self::Erc1155 => f.write_str("1155"),
        }
    }
}

/// Parsed form of an avatar text record
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AvatarReference {
    /// The record itself is the image URL
    DirectUrl(String),

    /// `nft:<chainId>:<standard>:<contractAddress>:<tokenId>`
    Nft {
        chain_id: String,
        standard: NftStandard,
        contract: String,
        token_id: String,
    },
}

/// Options for a single resolution call
#[derive(Debug, Clone, Default)]
pub struct ResolutionOptions {
    /// Block to query registry and resolver contracts at
    pub block: Option<BlockTag>,

    /// Chain endpoints for NFT avatars; the built-in table is used when unset
    pub chains: Option<ChainTable>,
}

impl ResolutionOptions {
    pub fn at_block(mut self, block: BlockTag) -> Self {
        self.block = Some(block);
        self
    }

    pub fn with_chains(mut self, chains: ChainTable) -> Self {
        self.chains = Some(chains);
        self
    }
}

/// DID metadata document served by the metadata service
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}
