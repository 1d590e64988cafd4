//! Trait definition for the blockchain boundary.

use {
    crate::{
        Result,
        types::{Account, ContractFactory, ContractHandle, Receipt, SnapshotId, TxHash},
    },
    alloy::dyn_abi::DynSolValue,
};

/// Operations the workflows need from a chain. Implemented against a JSON-RPC
/// development node ([`crate::rpc::RpcChainClient`]) and in memory
/// (`crate::dev::DevChain`).
///
/// Submitting a transaction and observing its effect are separate steps:
/// [`ChainClient::deploy`] and [`ChainClient::send`] return as soon as the
/// node accepted the transaction, only [`ChainClient::wait_for_receipt`]
/// guarantees it was mined.
#[cfg_attr(any(test, feature = "test-util"), mockall::automock)]
#[async_trait::async_trait]
pub trait ChainClient: Send + Sync {
    /// Accounts available for signing, in the node's order.
    async fn signers(&self) -> Result<Vec<Account>>;

    /// Looks up a contract type by name. Fails if the name is unknown.
    fn contract_factory(&self, name: &str) -> Result<ContractFactory>;

    /// Submits the deployment of `factory` with the given constructor
    /// arguments, signed by `from`.
    async fn deploy(
        &self,
        factory: &ContractFactory,
        from: &Account,
        args: &[DynSolValue],
    ) -> Result<TxHash>;

    /// Submits a state-changing call signed by `from`.
    async fn send(
        &self,
        contract: &ContractHandle,
        from: &Account,
        method: &str,
        args: &[DynSolValue],
    ) -> Result<TxHash>;

    /// Executes a read-only call against the latest block. No transaction is
    /// created.
    async fn call(
        &self,
        contract: &ContractHandle,
        method: &str,
        args: &[DynSolValue],
    ) -> Result<Vec<DynSolValue>>;

    /// Suspends until the transaction is mined.
    async fn wait_for_receipt(&self, tx_hash: TxHash) -> Result<Receipt>;

    /// Saves the current chain state.
    async fn snapshot(&self) -> Result<SnapshotId>;

    /// Restores a saved state. Snapshots taken after `snapshot` are discarded
    /// as well. Returns `false` if the snapshot does not exist (anymore).
    async fn revert(&self, snapshot: SnapshotId) -> Result<bool>;
}
