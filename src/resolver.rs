//! Core DID avatar resolution functionality.
//!
//! This module checks that a DID name or token id exists in the registry,
//! reads its `avatar` text record from the resolver contract and hands the
//! record to the [`AvatarInterpreter`]. It also hosts the metadata-image
//! lookups and the reverse (address to name) lookups, which share the same
//! existence checks.

use std::sync::Arc;

use tracing::{debug, instrument};

use crate::avatar::AvatarInterpreter;
use crate::capability::{JsonFetcher, NftReader, Registry, TextRecords};
use crate::config::ResolverConfig;
use crate::contracts::{DidRegistryContract, EthNftReader, ResolverContract};
use crate::error::ResolutionError;
use crate::http::HttpFetcher;
use crate::metadata::MetadataClient;
use crate::types::{Address, BlockTag, ResolutionOptions, TokenId};

/// Resolver-contract key holding the avatar record
pub const AVATAR_KEY: &str = "avatar";

/// Resolves DID names and token ids to avatar image URLs
#[derive(Clone)]
pub struct AvatarResolver {
    registry: Arc<dyn Registry>,
    records: Arc<dyn TextRecords>,
    interpreter: AvatarInterpreter,
    metadata: MetadataClient,
}

impl AvatarResolver {
    /// Creates a resolver from explicit capabilities
    pub fn new(
        registry: Arc<dyn Registry>,
        records: Arc<dyn TextRecords>,
        interpreter: AvatarInterpreter,
        metadata: MetadataClient,
    ) -> Self {
        Self {
            registry,
            records,
            interpreter,
            metadata,
        }
    }

    /// Creates a resolver backed by the configured contracts and services
    ///
    /// # Example
    /// ```no_run
    /// use hashkey_did_avatar::{AvatarResolver, ResolutionOptions, ResolverConfig};
    ///
    /// #[tokio::main]
    /// async fn main() -> Result<(), Box<dyn std::error::Error>> {
    ///     let resolver = AvatarResolver::connect(&ResolverConfig::default())?;
    ///     let image = resolver
    ///         .resolve_by_name("herro.key", &ResolutionOptions::default())
    ///         .await?;
    ///     println!("avatar: {image}");
    ///     Ok(())
    /// }
    /// ```
    pub fn connect(config: &ResolverConfig) -> Result<Self, ResolutionError> {
        let registry = Arc::new(DidRegistryContract::connect(&config.rpc_url, &config.registry_address)?);
        let records = Arc::new(ResolverContract::connect(&config.rpc_url, &config.resolver_address)?);
        let fetcher: Arc<dyn JsonFetcher> = Arc::new(HttpFetcher::new());
        let nft: Arc<dyn NftReader> = Arc::new(EthNftReader::new());

        Ok(Self::new(
            registry,
            records,
            AvatarInterpreter::new(nft, fetcher.clone()),
            MetadataClient::with_base_url(fetcher, config.metadata_base_url.clone()),
        ))
    }

    pub fn interpreter(&self) -> &AvatarInterpreter {
        &self.interpreter
    }

    pub fn metadata(&self) -> &MetadataClient {
        &self.metadata
    }

    /// Resolves the avatar image of a DID name
    #[instrument(skip(self, options), fields(block = ?options.block))]
    pub async fn resolve_by_name(
        &self,
        name: &str,
        options: &ResolutionOptions,
    ) -> Result<String, ResolutionError> {
        let token_id = self.claimed_token_id(name, options.block).await?;
        self.resolve_avatar(token_id, options).await
    }

    /// Resolves the avatar image of a DID token id
    #[instrument(skip(self, options), fields(block = ?options.block))]
    pub async fn resolve_by_token_id(
        &self,
        token_id: TokenId,
        options: &ResolutionOptions,
    ) -> Result<String, ResolutionError> {
        self.ensure_minted(token_id, options.block).await?;
        self.resolve_avatar(token_id, options).await
    }

    /// Image of a DID name taken from the metadata service
    #[instrument(skip(self, options), fields(block = ?options.block))]
    pub async fn metadata_image_by_name(
        &self,
        name: &str,
        options: &ResolutionOptions,
    ) -> Result<String, ResolutionError> {
        let token_id = self.claimed_token_id(name, options.block).await?;
        self.metadata_image(token_id).await
    }

    /// Image of a DID token id taken from the metadata service
    #[instrument(skip(self, options), fields(block = ?options.block))]
    pub async fn metadata_image_by_token_id(
        &self,
        token_id: TokenId,
        options: &ResolutionOptions,
    ) -> Result<String, ResolutionError> {
        self.ensure_minted(token_id, options.block).await?;
        self.metadata_image(token_id).await
    }

    /// DID name an address has set as its reverse record.
    ///
    /// Returns an empty string when the address owns a DID but never set
    /// the reverse record.
    #[instrument(skip(self, options), fields(block = ?options.block))]
    pub async fn name_by_address(
        &self,
        address: Address,
        options: &ResolutionOptions,
    ) -> Result<String, ResolutionError> {
        self.ensure_address_claimed(address, options.block).await?;
        self.records
            .name(address, options.block)
            .await
            .map_err(ResolutionError::into_resolution_failure)
    }

    /// First DID name owned by an address, ignoring the reverse record
    #[instrument(skip(self, options), fields(block = ?options.block))]
    pub async fn name_by_address_force(
        &self,
        address: Address,
        options: &ResolutionOptions,
    ) -> Result<String, ResolutionError> {
        self.ensure_address_claimed(address, options.block).await?;
        let token_id = self.registry
            .token_of_owner_by_index(address, TokenId::zero(), options.block)
            .await
            .map_err(ResolutionError::into_resolution_failure)?;
        self.registry
            .token_id_to_name(token_id, options.block)
            .await
            .map_err(ResolutionError::into_resolution_failure)
    }

    async fn claimed_token_id(&self, name: &str, block: Option<BlockTag>) -> Result<TokenId, ResolutionError> {
        let claimed = self.registry
            .is_claimed_by_name(name, block)
            .await
            .map_err(ResolutionError::into_resolution_failure)?;
        if !claimed {
            return Err(ResolutionError::DidNotClaimed);
        }

        let token_id = self.registry
            .name_to_token_id(name, block)
            .await
            .map_err(ResolutionError::into_resolution_failure)?;
        debug!(%name, %token_id, "did name resolved to token id");
        Ok(token_id)
    }

    async fn ensure_minted(&self, token_id: TokenId, block: Option<BlockTag>) -> Result<(), ResolutionError> {
        let total_supply = self.registry
            .total_supply(block)
            .await
            .map_err(ResolutionError::into_resolution_failure)?;
        if token_id > total_supply {
            return Err(ResolutionError::TokenNotMinted);
        }
        Ok(())
    }

    async fn ensure_address_claimed(&self, address: Address, block: Option<BlockTag>) -> Result<(), ResolutionError> {
        let claimed = self.registry
            .is_claimed_by_address(address, block)
            .await
            .map_err(ResolutionError::into_resolution_failure)?;
        if !claimed {
            return Err(ResolutionError::AddrNotClaimed);
        }
        Ok(())
    }

    async fn resolve_avatar(&self, token_id: TokenId, options: &ResolutionOptions) -> Result<String, ResolutionError> {
        let record = self.records
            .text(token_id, AVATAR_KEY, options.block)
            .await
            .map_err(ResolutionError::into_resolution_failure)?;
        if record.is_empty() {
            return Err(ResolutionError::AvatarNotSet);
        }

        debug!(%token_id, %record, "avatar record found");
        self.interpreter.interpret(&record, options.chains.as_ref()).await
    }

    async fn metadata_image(&self, token_id: TokenId) -> Result<String, ResolutionError> {
        self.metadata
            .image(token_id)
            .await?
            .ok_or(ResolutionError::MetadataImageNotSet)
    }
}
