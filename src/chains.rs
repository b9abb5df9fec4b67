//! Built-in chain endpoint table used when a caller supplies none.

use std::sync::OnceLock;

use crate::types::{ChainEndpoint, ChainTable};

const DEFAULT_CHAINS: &[(&str, &str, &str)] = &[
    ("1", "Ethereum", "https://eth-mainnet.nodereal.io/v1/1659dfb40aa24bbb8153a677b98064d7"),
    ("137", "Polygon", "https://matic-mainnet-archive-rpc.bwarelabs.com"),
    ("8217", "Klaytn", "https://klaytn01.fandom.finance"),
    ("210425", "PlatON", "https://openapi2.platon.network/rpc"),
];

/// Returns the process-wide default chain table
pub fn default_chain_table() -> &'static ChainTable {
    static TABLE: OnceLock<ChainTable> = OnceLock::new();
    TABLE.get_or_init(|| {
        DEFAULT_CHAINS
            .iter()
            .map(|(id, network, rpc)| (id.to_string(), ChainEndpoint::new(*network, *rpc)))
            .collect()
    })
}
