use {
    anyhow::{Context, Result},
    chain::{Chain, rpc::RpcChainClient},
    contracts::Artifacts,
    ethrpc::test_node::TestNodeApi,
    std::{path::PathBuf, sync::Arc},
    url::Url,
};

/// Hardhat build output of the project, relative to this crate.
const DEFAULT_ARTIFACTS: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../../artifacts");

/// A development node reachable at `NODE_URL` (default
/// [`ethrpc::DEFAULT_NODE_URL`]) together with the artifacts found at
/// `ARTIFACTS`.
#[derive(Debug, Clone)]
pub struct LocalNode {
    pub chain: Chain,
    pub test_node: TestNodeApi,
}

impl LocalNode {
    pub fn connect() -> Result<Self> {
        let url: Url = std::env::var("NODE_URL")
            .as_deref()
            .unwrap_or(ethrpc::DEFAULT_NODE_URL)
            .parse()
            .context("invalid NODE_URL")?;
        let artifacts = std::env::var_os("ARTIFACTS")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_ARTIFACTS));
        let artifacts = Artifacts::load(&artifacts)
            .with_context(|| format!("failed to load artifacts from {}", artifacts.display()))?;

        let provider = ethrpc::alloy::provider(&url, "e2e");
        let client = RpcChainClient::new(provider.clone(), Arc::new(artifacts));
        Ok(Self {
            chain: Chain::new(Arc::new(client)),
            test_node: TestNodeApi::new(provider),
        })
    }
}
