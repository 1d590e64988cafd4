pub mod alloy;
pub mod test_node;

use ::alloy::providers::DynProvider;

pub type AlloyProvider = DynProvider;

/// Default JSON-RPC endpoint of a locally running Hardhat network or anvil.
pub const DEFAULT_NODE_URL: &str = "http://127.0.0.1:8545";
