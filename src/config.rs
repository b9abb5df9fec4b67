//! Connection settings for the DID registry, resolver contract and metadata service.

use std::env;

/// PlatON JSON-RPC endpoint hosting the DID contracts
pub const DEFAULT_RPC_URL: &str = "https://openapi2.platon.network/rpc";
/// DID registry contract
pub const DEFAULT_REGISTRY_ADDRESS: &str = "0x7fDd3f96cBDE51737A9E24b461E7E92A057C3BBf";
/// DID resolver contract
pub const DEFAULT_RESOLVER_ADDRESS: &str = "0x606729294604A1c71f4BFc001894E4f8095Ec2eF";
/// Metadata service; the token id is appended as the last path segment
pub const DEFAULT_METADATA_BASE_URL: &str = "https://api.hashkey.id/did/api/nft/metadata";

/// Settings used by [`crate::AvatarResolver::connect`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverConfig {
    pub rpc_url: String,
    pub registry_address: String,
    pub resolver_address: String,
    pub metadata_base_url: String,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            rpc_url: DEFAULT_RPC_URL.to_string(),
            registry_address: DEFAULT_REGISTRY_ADDRESS.to_string(),
            resolver_address: DEFAULT_RESOLVER_ADDRESS.to_string(),
            metadata_base_url: DEFAULT_METADATA_BASE_URL.to_string(),
        }
    }
}

impl ResolverConfig {
    /// Builds a config from the defaults, overridden by `HASHKEY_DID_RPC_URL`,
    /// `HASHKEY_DID_REGISTRY`, `HASHKEY_DID_RESOLVER` and `HASHKEY_DID_METADATA_URL`
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            rpc_url: lookup("HASHKEY_DID_RPC_URL").unwrap_or(defaults.rpc_url),
            registry_address: lookup("HASHKEY_DID_REGISTRY").unwrap_or(defaults.registry_address),
            resolver_address: lookup("HASHKEY_DID_RESOLVER").unwrap_or(defaults.resolver_address),
            metadata_base_url: lookup("HASHKEY_DID_METADATA_URL")
                .unwrap_or(defaults.metadata_base_url),
        }
    }
}
