use {
    crate::AlloyProvider,
    alloy::{primitives::U256, providers::Provider, transports::TransportResult},
};

/// Implements functions that are only available in a testing node.
///
/// Relevant RPC calls for the Hardhat network can be found at:
/// https://hardhat.org/hardhat-network/docs/reference#special-testing/debugging-methods
/// anvil implements the same methods.
#[derive(Debug, Clone)]
pub struct TestNodeApi {
    provider: AlloyProvider,
}

impl TestNodeApi {
    pub fn new(provider: AlloyProvider) -> Self {
        Self { provider }
    }

    /// Saves the current chain state and returns an id to revert to it.
    pub async fn snapshot(&self) -> TransportResult<U256> {
        self.provider
            .raw_request("evm_snapshot".into(), ())
            .await
    }

    /// Restores the state saved under `snapshot_id`. The snapshot is consumed
    /// and so are all snapshots taken after it. Returns `false` if the id is
    /// unknown.
    pub async fn revert(&self, snapshot_id: U256) -> TransportResult<bool> {
        self.provider
            .raw_request("evm_revert".into(), (snapshot_id,))
            .await
    }

    pub async fn mine_pending_block(&self) -> TransportResult<String> {
        self.provider.raw_request("evm_mine".into(), ()).await
    }
}
