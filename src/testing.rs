//! In-memory capability doubles shared by the unit tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use crate::capability::{JsonFetcher, NftReader, Registry, TextRecords};
use crate::error::ResolutionError;
use crate::types::{Address, BlockTag, ChainEndpoint, NftStandard, TokenId};

/// Registry double recording every call and the block it was asked for
#[derive(Default)]
pub struct FakeRegistry {
    pub names: HashMap<String, TokenId>,
    pub owners: HashMap<Address, Vec<TokenId>>,
    pub total_supply: TokenId,
    pub reject: bool,
    pub calls: Mutex<Vec<(&'static str, Option<BlockTag>)>>,
}

impl FakeRegistry {
    pub fn with_name(mut self, name: &str, token_id: u64) -> Self {
        self.names.insert(name.to_string(), TokenId::from(token_id));
        self.total_supply = self.total_supply.max(TokenId::from(token_id));
        self
    }

    pub fn with_owner(mut self, owner: Address, token_id: u64) -> Self {
        self.owners.entry(owner).or_default().push(TokenId::from(token_id));
        self
    }

    pub fn calls(&self) -> Vec<(&'static str, Option<BlockTag>)> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: &'static str, block: Option<BlockTag>) -> Result<(), ResolutionError> {
        self.calls.lock().unwrap().push((call, block));
        if self.reject {
            return Err(ResolutionError::ContractCall("execution reverted".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl Registry for FakeRegistry {
    async fn is_claimed_by_name(&self, name: &str, block: Option<BlockTag>) -> Result<bool, ResolutionError> {
        self.record("didClaimed", block)?;
        Ok(self.names.contains_key(name))
    }

    async fn is_claimed_by_address(&self, address: Address, block: Option<BlockTag>) -> Result<bool, ResolutionError> {
        self.record("addrClaimed", block)?;
        Ok(self.owners.contains_key(&address))
    }

    async fn name_to_token_id(&self, name: &str, block: Option<BlockTag>) -> Result<TokenId, ResolutionError> {
        self.record("did2TokenId", block)?;
        Ok(self.names.get(name).copied().unwrap_or_default())
    }

    async fn token_id_to_name(&self, token_id: TokenId, block: Option<BlockTag>) -> Result<String, ResolutionError> {
        self.record("tokenId2Did", block)?;
        Ok(self.names
            .iter()
            .find(|(_, id)| **id == token_id)
            .map(|(name, _)| name.clone())
            .unwrap_or_default())
    }

    async fn total_supply(&self, block: Option<BlockTag>) -> Result<TokenId, ResolutionError> {
        self.record("totalSupply", block)?;
        Ok(self.total_supply)
    }

    async fn token_of_owner_by_index(
        &self,
        owner: Address,
        index: TokenId,
        block: Option<BlockTag>,
    ) -> Result<TokenId, ResolutionError> {
        self.record("tokenOfOwnerByIndex", block)?;
        self.owners
            .get(&owner)
            .and_then(|ids| ids.get(index.as_usize()))
            .copied()
            .ok_or_else(|| ResolutionError::ContractCall("owner index out of bounds".to_string()))
    }
}

/// Resolver-contract double
#[derive(Default)]
pub struct FakeTextRecords {
    pub texts: HashMap<(TokenId, String), String>,
    pub reverse: HashMap<Address, String>,
    pub calls: Mutex<Vec<(&'static str, Option<BlockTag>)>>,
}

impl FakeTextRecords {
    pub fn with_text(mut self, token_id: u64, key: &str, value: &str) -> Self {
        self.texts.insert((TokenId::from(token_id), key.to_string()), value.to_string());
        self
    }

    pub fn with_reverse(mut self, address: Address, name: &str) -> Self {
        self.reverse.insert(address, name.to_string());
        self
    }

    pub fn calls(&self) -> Vec<(&'static str, Option<BlockTag>)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextRecords for FakeTextRecords {
    async fn text(&self, token_id: TokenId, key: &str, block: Option<BlockTag>) -> Result<String, ResolutionError> {
        self.calls.lock().unwrap().push(("text", block));
        Ok(self.texts.get(&(token_id, key.to_string())).cloned().unwrap_or_default())
    }

    async fn name(&self, address: Address, block: Option<BlockTag>) -> Result<String, ResolutionError> {
        self.calls.lock().unwrap().push(("name", block));
        Ok(self.reverse.get(&address).cloned().unwrap_or_default())
    }
}

/// NFT reader double returning a fixed token URI
#[derive(Default)]
pub struct FakeNftReader {
    pub token_uri: String,
    pub error: Option<fn() -> ResolutionError>,
    pub calls: Mutex<Vec<(NftStandard, String, String, String)>>,
}

impl FakeNftReader {
    pub fn returning(token_uri: impl Into<String>) -> Self {
        Self {
            token_uri: token_uri.into(),
            ..Default::default()
        }
    }

    pub fn failing(error: fn() -> ResolutionError) -> Self {
        Self {
            error: Some(error),
            ..Default::default()
        }
    }

    pub fn calls(&self) -> Vec<(NftStandard, String, String, String)> {
        self.calls.lock().unwrap().clone()
    }

    fn read(
        &self,
        standard: NftStandard,
        endpoint: &ChainEndpoint,
        contract: &str,
        token_id: &str,
    ) -> Result<String, ResolutionError> {
        self.calls.lock().unwrap().push((
            standard,
            endpoint.rpc_url.clone(),
            contract.to_string(),
            token_id.to_string(),
        ));
        match self.error {
            Some(error) => Err(error()),
            None => Ok(self.token_uri.clone()),
        }
    }
}

#[async_trait]
impl NftReader for FakeNftReader {
    async fn erc721_token_uri(
        &self,
        endpoint: &ChainEndpoint,
        contract: &str,
        token_id: &str,
    ) -> Result<String, ResolutionError> {
        self.read(NftStandard::Erc721, endpoint, contract, token_id)
    }

    async fn erc1155_uri(
        &self,
        endpoint: &ChainEndpoint,
        contract: &str,
        token_id: &str,
    ) -> Result<String, ResolutionError> {
        self.read(NftStandard::Erc1155, endpoint, contract, token_id)
    }
}

/// JSON fetcher double serving documents by URL
#[derive(Default)]
pub struct FakeFetcher {
    pub documents: HashMap<String, Value>,
    pub calls: Mutex<Vec<String>>,
}

impl FakeFetcher {
    pub fn with_document(mut self, url: &str, doc: Value) -> Self {
        self.documents.insert(url.to_string(), doc);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl JsonFetcher for FakeFetcher {
    async fn get_json(&self, url: &str) -> Result<Value, ResolutionError> {
        self.calls.lock().unwrap().push(url.to_string());
        self.documents
            .get(url)
            .cloned()
            .ok_or_else(|| ResolutionError::ResolutionFailed(format!("HTTP 404 Not Found when fetching {url}")))
    }
}
