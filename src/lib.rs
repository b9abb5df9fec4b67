//! Client-side avatar resolution for HashKey DID names and tokens.
//!
//! A DID's avatar is stored as a text record in the resolver contract. The
//! record is either a plain image URL or an `nft:` reference naming an NFT
//! on some chain, whose token metadata in turn holds the image. This library
//! checks the DID exists, reads the record and follows it to an image URL.

mod avatar;
mod capability;
mod chains;
mod config;
mod contracts;
mod error;
mod http;
mod metadata;
mod resolver;
mod types;

#[cfg(test)]
mod testing;

pub use avatar::AvatarInterpreter;
pub use capability::{JsonFetcher, NftReader, Registry, TextRecords};
pub use chains::default_chain_table;
pub use config::ResolverConfig;
pub use contracts::{DidRegistryContract, EthNftReader, ResolverContract};
pub use error::ResolutionError;
pub use http::HttpFetcher;
pub use metadata::MetadataClient;
pub use resolver::{AvatarResolver, AVATAR_KEY};
pub use types::{
    Address,
    AvatarReference,
    BlockTag,
    ChainEndpoint,
    ChainTable,
    Metadata,
    NftStandard,
    ResolutionOptions,
    TokenId,
};

/// Resolves the avatar image URL of a DID name against the default deployment
///
/// # Arguments
/// * `name` - The DID name, e.g. `herro.key`
/// * `options` - Optional block pin and chain table
///
/// # Example
/// ```no_run
/// use hashkey_did_avatar::resolve_avatar;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let image = resolve_avatar("herro.key", None).await?;
///     println!("avatar: {image}");
///     Ok(())
/// }
/// ```
pub async fn resolve_avatar(
    name: &str,
    options: Option<ResolutionOptions>,
) -> Result<String, ResolutionError> {
    let resolver = AvatarResolver::connect(&ResolverConfig::from_env())?;
    resolver.resolve_by_name(name, &options.unwrap_or_default()).await
}

/// Resolves the avatar image URL of a DID token id against the default deployment
pub async fn resolve_avatar_by_token_id(
    token_id: TokenId,
    options: Option<ResolutionOptions>,
) -> Result<String, ResolutionError> {
    let resolver = AvatarResolver::connect(&ResolverConfig::from_env())?;
    resolver.resolve_by_token_id(token_id, &options.unwrap_or_default()).await
}
