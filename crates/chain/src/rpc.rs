//! [`ChainClient`] backed by a JSON-RPC development node (Hardhat network or
//! anvil).
//!
//! Transactions are sent unsigned with `eth_sendTransaction` and an explicit
//! `from`, so the node signs them with one of its unlocked accounts. This is
//! what makes `eth_accounts` a valid answer to "which signers are there".

use {
    crate::{
        ChainClient,
        Error,
        Result,
        types::{Account, ContractFactory, ContractHandle, Receipt, SnapshotId, TxHash},
    },
    alloy::{
        dyn_abi::{DynSolValue, FunctionExt, JsonAbiExt},
        network::{ReceiptResponse, TransactionBuilder},
        providers::{PendingTransactionBuilder, Provider},
        rpc::types::TransactionRequest,
    },
    contracts::Artifacts,
    ethrpc::{AlloyProvider, test_node::TestNodeApi},
    std::{sync::Arc, time::Duration},
    url::Url,
};

#[derive(Debug, Clone)]
pub struct RpcChainClient {
    provider: AlloyProvider,
    test_node: TestNodeApi,
    artifacts: Arc<Artifacts>,
    confirmation_timeout: Option<Duration>,
}

impl RpcChainClient {
    pub fn new(provider: AlloyProvider, artifacts: Arc<Artifacts>) -> Self {
        Self {
            test_node: TestNodeApi::new(provider.clone()),
            provider,
            artifacts,
            confirmation_timeout: None,
        }
    }

    /// Connects to the node at `url`.
    pub fn connect(url: &Url, artifacts: Arc<Artifacts>) -> Self {
        Self::new(ethrpc::alloy::provider(url, "chain"), artifacts)
    }

    /// Upper bound for [`ChainClient::wait_for_receipt`]. `None` (the
    /// default) waits for as long as the node takes.
    pub fn with_confirmation_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.confirmation_timeout = timeout;
        self
    }

    fn encode_call(
        contract: &ContractHandle,
        method: &str,
        args: &[DynSolValue],
    ) -> Result<Vec<u8>> {
        contract
            .function(method, args.len())?
            .abi_encode_input(args)
            .map_err(|source| Error::Abi {
                action: "encode arguments",
                contract: contract.name().to_string(),
                method: method.to_string(),
                source,
            })
    }

    fn encode_deployment(factory: &ContractFactory, args: &[DynSolValue]) -> Result<Vec<u8>> {
        let mut code = factory.bytecode().to_vec();
        match &factory.abi().constructor {
            Some(constructor) => {
                let encoded = constructor
                    .abi_encode_input(args)
                    .map_err(|source| Error::Abi {
                        action: "encode constructor arguments",
                        contract: factory.name().to_string(),
                        method: "constructor".to_string(),
                        source,
                    })?;
                code.extend(encoded);
            }
            None if args.is_empty() => (),
            None => {
                return Err(Error::UnknownMethod {
                    contract: factory.name().to_string(),
                    method: "constructor".to_string(),
                    arguments: args.len(),
                });
            }
        }
        Ok(code)
    }
}

#[async_trait::async_trait]
impl ChainClient for RpcChainClient {
    async fn signers(&self) -> Result<Vec<Account>> {
        let accounts = self.provider.get_accounts().await?;
        Ok(accounts.into_iter().map(Account::new).collect())
    }

    fn contract_factory(&self, name: &str) -> Result<ContractFactory> {
        let artifact = self.artifacts.deployable(name)?;
        tracing::debug!(
            contract = %artifact.fully_qualified_name(),
            bytecode_len = artifact.bytecode.len(),
            "found contract artifact"
        );
        Ok(ContractFactory::from_artifact(&artifact))
    }

    async fn deploy(
        &self,
        factory: &ContractFactory,
        from: &Account,
        args: &[DynSolValue],
    ) -> Result<TxHash> {
        let code = Self::encode_deployment(factory, args)?;
        let tx = TransactionRequest::default()
            .with_from(from.address())
            .with_deploy_code(code);
        let pending = self.provider.send_transaction(tx).await?;
        Ok(*pending.tx_hash())
    }

    async fn send(
        &self,
        contract: &ContractHandle,
        from: &Account,
        method: &str,
        args: &[DynSolValue],
    ) -> Result<TxHash> {
        let calldata = Self::encode_call(contract, method, args)?;
        let tx = TransactionRequest::default()
            .with_from(from.address())
            .with_to(contract.address())
            .with_input(calldata);
        let pending = self.provider.send_transaction(tx).await?;
        Ok(*pending.tx_hash())
    }

    async fn call(
        &self,
        contract: &ContractHandle,
        method: &str,
        args: &[DynSolValue],
    ) -> Result<Vec<DynSolValue>> {
        let function = contract.function(method, args.len())?;
        let calldata = Self::encode_call(contract, method, args)?;
        let tx = TransactionRequest::default()
            .with_to(contract.address())
            .with_input(calldata);
        let output = self.provider.call(tx).await?;
        function
            .abi_decode_output(&output)
            .map_err(|source| Error::Abi {
                action: "decode return data",
                contract: contract.name().to_string(),
                method: method.to_string(),
                source,
            })
    }

    async fn wait_for_receipt(&self, tx_hash: TxHash) -> Result<Receipt> {
        let receipt = PendingTransactionBuilder::new(self.provider.root().clone(), tx_hash)
            .with_timeout(self.confirmation_timeout)
            .get_receipt()
            .await
            .map_err(|source| Error::Confirmation { tx_hash, source })?;
        if !receipt.status() {
            return Err(Error::Reverted {
                reason: format!("transaction {tx_hash} was mined but reverted"),
            });
        }
        Ok(Receipt {
            transaction_hash: receipt.transaction_hash(),
            block_number: receipt.block_number(),
            gas_used: receipt.gas_used(),
            contract_address: receipt.contract_address(),
        })
    }

    async fn snapshot(&self) -> Result<SnapshotId> {
        Ok(SnapshotId(self.test_node.snapshot().await?))
    }

    async fn revert(&self, snapshot: SnapshotId) -> Result<bool> {
        Ok(self.test_node.revert(snapshot.0).await?)
    }
}
