//! Error types for DID avatar resolution.
//!
//! Every public operation of this crate returns [`ResolutionError`]. The
//! first group of variants are the resolution outcomes a caller is expected
//! to branch on; the rest describe failures of the underlying contract and
//! HTTP calls.

use thiserror::Error;
use url::ParseError;

/// Errors that can occur while resolving a DID avatar
#[derive(Error, Debug)]
pub enum ResolutionError {
    /// The DID name has no registered owner
    #[error("this did name has not been claimed")]
    DidNotClaimed,

    /// The address has not claimed a DID
    #[error("this address has not claimed a did")]
    AddrNotClaimed,

    /// The token id is greater than the current total supply
    #[error("this tokenId has not been minted")]
    TokenNotMinted,

    /// The avatar text record is empty
    #[error("the avatar text has not been set on this did")]
    AvatarNotSet,

    /// The avatar text record is malformed or uses an unknown NFT standard
    #[error("the avatar text is invalid")]
    InvalidAvatarText,

    /// The token URI could not be fetched, was not JSON, or had no image
    #[error("the tokenURI of avatar is invalid")]
    InvalidTokenUri,

    /// The chain id referenced by an NFT avatar is not in the endpoint table
    #[error("chain {0} is not configured")]
    ChainNotConfigured(String),

    /// The metadata service returned no image for the token
    #[error("the metadata of this did has no image")]
    MetadataImageNotSet,

    /// A registry, resolver or metadata call was rejected
    #[error("DID resolution failed: {0}")]
    ResolutionFailed(String),

    /// A contract read failed
    #[error("contract call failed: {0}")]
    ContractCall(String),

    /// HTTP request error
    #[error("HTTP request error: {0}")]
    RequestError(#[from] reqwest::Error),

    /// URL parse error
    #[error("URL parse error: {0}")]
    UrlError(#[from] ParseError),

    /// JSON error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl ResolutionError {
    /// Wraps a failed registry or resolver read into [`ResolutionError::ResolutionFailed`],
    /// leaving typed resolution outcomes untouched.
    pub(crate) fn into_resolution_failure(self) -> Self {
        match self {
            Self::ContractCall(msg) => Self::ResolutionFailed(msg),
            Self::RequestError(e) => Self::ResolutionFailed(e.to_string()),
            Self::UrlError(e) => Self::ResolutionFailed(e.to_string()),
            Self::JsonError(e) => Self::ResolutionFailed(e.to_string()),
            other => other,
        }
    }
}
