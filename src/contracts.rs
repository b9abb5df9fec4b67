//! ethers-backed implementations of the contract capabilities.
//!
//! Each type owns its own read-only provider; nothing here is process-wide.

use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;
use ethers::abi::{parse_abi, Abi, Detokenize, Tokenize};
use ethers::contract::Contract;
use ethers::providers::{Http, Provider};
use ethers::types::BlockId;

use crate::capability::{NftReader, Registry, TextRecords};
use crate::error::ResolutionError;
use crate::types::{Address, BlockTag, ChainEndpoint, TokenId};

const REGISTRY_ABI: &[&str] = &[
    "function didClaimed(string did) external view returns (bool)",
    "function addrClaimed(address addr) external view returns (bool)",
    "function did2TokenId(string did) external view returns (uint256)",
    "function tokenId2Did(uint256 tokenId) external view returns (string)",
    "function totalSupply() external view returns (uint256)",
    "function tokenOfOwnerByIndex(address owner, uint256 index) external view returns (uint256)",
];

const RESOLVER_ABI: &[&str] = &[
    "function text(uint256 tokenId, string key) external view returns (string)",
    "function name(address addr) external view returns (string)",
];

const ERC721_ABI: &[&str] = &["function tokenURI(uint256 tokenId) external view returns (string)"];

const ERC1155_ABI: &[&str] = &["function uri(uint256 id) external view returns (string)"];

type ReadContract = Contract<Provider<Http>>;

fn abi(signatures: &[&str]) -> Result<Abi, ResolutionError> {
    parse_abi(signatures).map_err(|e| ResolutionError::ContractCall(format!("invalid ABI: {e}")))
}

fn contract(rpc_url: &str, address: Address, signatures: &[&str]) -> Result<ReadContract, ResolutionError> {
    let provider = Provider::<Http>::try_from(rpc_url)?;
    Ok(Contract::new(address, abi(signatures)?, Arc::new(provider)))
}

fn parse_address(address: &str) -> Result<Address, ResolutionError> {
    Address::from_str(address).map_err(|_| ResolutionError::InvalidAvatarText)
}

fn parse_token_id(token_id: &str) -> Result<TokenId, ResolutionError> {
    let parsed = match token_id.strip_prefix("0x") {
        Some(hex) if !hex.is_empty() => TokenId::from_str_radix(hex, 16).ok(),
        None if !token_id.is_empty() => TokenId::from_dec_str(token_id).ok(),
        _ => None,
    };
    parsed.ok_or(ResolutionError::InvalidAvatarText)
}

async fn read<T, D>(
    contract: &ReadContract,
    method: &str,
    args: T,
    block: Option<BlockTag>,
) -> Result<D, ResolutionError>
where
    T: Tokenize,
    D: Detokenize,
{
    let mut call = contract
        .method::<T, D>(method, args)
        .map_err(|e| ResolutionError::ContractCall(format!("{method}: {e}")))?;
    if let Some(block) = block {
        call = call.block(BlockId::from(block));
    }
    call.call()
        .await
        .map_err(|e| ResolutionError::ContractCall(format!("{method}: {e}")))
}

/// The DID registry contract
pub struct DidRegistryContract {
    contract: ReadContract,
}

impl DidRegistryContract {
    pub fn connect(rpc_url: &str, address: &str) -> Result<Self, ResolutionError> {
        let address = Address::from_str(address)
            .map_err(|e| ResolutionError::ResolutionFailed(format!("invalid registry address: {e}")))?;
        Ok(Self {
            contract: contract(rpc_url, address, REGISTRY_ABI)?,
        })
    }
}

#[async_trait]
impl Registry for DidRegistryContract {
    async fn is_claimed_by_name(&self, name: &str, block: Option<BlockTag>) -> Result<bool, ResolutionError> {
        read(&self.contract, "didClaimed", name.to_string(), block).await
    }

    async fn is_claimed_by_address(&self, address: Address, block: Option<BlockTag>) -> Result<bool, ResolutionError> {
        read(&self.contract, "addrClaimed", address, block).await
    }

    async fn name_to_token_id(&self, name: &str, block: Option<BlockTag>) -> Result<TokenId, ResolutionError> {
        read(&self.contract, "did2TokenId", name.to_string(), block).await
    }

    async fn token_id_to_name(&self, token_id: TokenId, block: Option<BlockTag>) -> Result<String, ResolutionError> {
        read(&self.contract, "tokenId2Did", token_id, block).await
    }

    async fn total_supply(&self, block: Option<BlockTag>) -> Result<TokenId, ResolutionError> {
        read(&self.contract, "totalSupply", (), block).await
    }

    async fn token_of_owner_by_index(
        &self,
        owner: Address,
        index: TokenId,
        block: Option<BlockTag>,
    ) -> Result<TokenId, ResolutionError> {
        read(&self.contract, "tokenOfOwnerByIndex", (owner, index), block).await
    }
}

/// The DID resolver contract holding text and reverse records
pub struct ResolverContract {
    contract: ReadContract,
}

impl ResolverContract {
    pub fn connect(rpc_url: &str, address: &str) -> Result<Self, ResolutionError> {
        let address = Address::from_str(address)
            .map_err(|e| ResolutionError::ResolutionFailed(format!("invalid resolver address: {e}")))?;
        Ok(Self {
            contract: contract(rpc_url, address, RESOLVER_ABI)?,
        })
    }
}

#[async_trait]
impl TextRecords for ResolverContract {
    async fn text(&self, token_id: TokenId, key: &str, block: Option<BlockTag>) -> Result<String, ResolutionError> {
        read(&self.contract, "text", (token_id, key.to_string()), block).await
    }

    async fn name(&self, address: Address, block: Option<BlockTag>) -> Result<String, ResolutionError> {
        read(&self.contract, "name", address, block).await
    }
}

/// Reads token URIs from ERC-721 and ERC-1155 contracts on any chain.
///
/// A provider is built per call from the endpoint's RPC URL.
#[derive(Debug, Clone, Default)]
pub struct EthNftReader;

impl EthNftReader {
    pub fn new() -> Self {
        Self
    }

    async fn token_uri(
        &self,
        endpoint: &ChainEndpoint,
        signatures: &[&str],
        method: &str,
        contract_address: &str,
        token_id: &str,
    ) -> Result<String, ResolutionError> {
        let address = parse_address(contract_address)?;
        let token_id = parse_token_id(token_id)?;
        let nft = contract(&endpoint.rpc_url, address, signatures)
            .map_err(|e| ResolutionError::ContractCall(e.to_string()))?;
        read(&nft, method, token_id, None).await
    }
}

#[async_trait]
impl NftReader for EthNftReader {
    async fn erc721_token_uri(
        &self,
        endpoint: &ChainEndpoint,
        contract: &str,
        token_id: &str,
    ) -> Result<String, ResolutionError> {
        self.token_uri(endpoint, ERC721_ABI, "tokenURI", contract, token_id).await
    }

    async fn erc1155_uri(
        &self,
        endpoint: &ChainEndpoint,
        contract: &str,
        token_id: &str,
    ) -> Result<String, ResolutionError> {
        self.token_uri(endpoint, ERC1155_ABI, "uri", contract, token_id).await
    }
}
