use {
    crate::{
        ChainClient,
        Error,
        Result,
        types::{Account, ContractFactory, ContractHandle, Receipt, SnapshotId, TxHash},
    },
    alloy::{dyn_abi::DynSolValue, primitives::Address},
    std::sync::Arc,
};

/// Cheaply cloneable entry point wrapping a [`ChainClient`].
#[derive(Clone)]
pub struct Chain {
    client: Arc<dyn ChainClient>,
}

impl Chain {
    pub fn new(client: Arc<dyn ChainClient>) -> Self {
        Self { client }
    }

    pub async fn signers(&self) -> Result<Vec<Account>> {
        self.client.signers().await
    }

    pub fn contract_factory(&self, name: &str) -> Result<Factory> {
        let factory = self.client.contract_factory(name)?;
        Ok(Factory {
            chain: self.clone(),
            factory,
        })
    }

    /// Wraps an already deployed contract.
    pub fn contract(&self, handle: ContractHandle) -> Contract {
        Contract {
            chain: self.clone(),
            handle,
        }
    }

    pub async fn snapshot(&self) -> Result<SnapshotId> {
        self.client.snapshot().await
    }

    pub async fn revert(&self, snapshot: SnapshotId) -> Result<bool> {
        self.client.revert(snapshot).await
    }

    /// Like [`Chain::revert`] but treats an unknown snapshot as an error.
    pub async fn restore(&self, snapshot: SnapshotId) -> Result<()> {
        if self.client.revert(snapshot).await? {
            tracing::debug!(%snapshot, "restored chain snapshot");
            Ok(())
        } else {
            Err(Error::UnknownSnapshot(snapshot))
        }
    }
}

impl std::fmt::Debug for Chain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Chain").finish_non_exhaustive()
    }
}

#[derive(Debug, Clone)]
pub struct Factory {
    chain: Chain,
    factory: ContractFactory,
}

impl Factory {
    pub fn name(&self) -> &str {
        self.factory.name()
    }

    /// Submits the deployment. The returned handle must be awaited with
    /// [`PendingDeployment::wait_for_deployment`] before the contract can be
    /// used.
    pub async fn deploy(&self, from: &Account, args: &[DynSolValue]) -> Result<PendingDeployment> {
        let tx_hash = self.chain.client.deploy(&self.factory, from, args).await?;
        tracing::debug!(contract = self.name(), %from, ?tx_hash, "deployment submitted");
        Ok(PendingDeployment {
            chain: self.chain.clone(),
            factory: self.factory.clone(),
            tx_hash,
        })
    }
}

#[derive(Debug)]
#[must_use = "a deployment is only usable after waiting for it"]
pub struct PendingDeployment {
    chain: Chain,
    factory: ContractFactory,
    tx_hash: TxHash,
}

impl PendingDeployment {
    pub fn tx_hash(&self) -> TxHash {
        self.tx_hash
    }

    /// Suspends until the deployment transaction is mined.
    pub async fn wait_for_deployment(self) -> Result<Contract> {
        let receipt = self.chain.client.wait_for_receipt(self.tx_hash).await?;
        let address = receipt
            .contract_address
            .ok_or(Error::MissingContractAddress(self.tx_hash))?;
        tracing::debug!(contract = self.factory.name(), %address, "deployment mined");
        Ok(self.chain.contract(self.factory.at(address)))
    }
}

#[derive(Debug, Clone)]
pub struct Contract {
    chain: Chain,
    handle: ContractHandle,
}

impl Contract {
    pub fn address(&self) -> Address {
        self.handle.address()
    }

    pub fn handle(&self) -> &ContractHandle {
        &self.handle
    }

    pub fn chain(&self) -> &Chain {
        &self.chain
    }

    /// Read-only call returning all output values.
    pub async fn call(&self, method: &str, args: &[DynSolValue]) -> Result<Vec<DynSolValue>> {
        self.chain.client.call(&self.handle, method, args).await
    }

    /// Read-only call of a function with exactly one return value.
    pub async fn call_one(&self, method: &str, args: &[DynSolValue]) -> Result<DynSolValue> {
        let mut values = self.call(method, args).await?;
        match values.len() {
            1 => Ok(values.remove(0)),
            count => Err(Error::UnexpectedOutput {
                contract: self.handle.name().to_string(),
                method: method.to_string(),
                count,
            }),
        }
    }

    /// Submits a state-changing call. Its effects are only guaranteed to be
    /// visible after [`PendingTransaction::wait`] returned.
    pub async fn send(
        &self,
        from: &Account,
        method: &str,
        args: &[DynSolValue],
    ) -> Result<PendingTransaction> {
        let tx_hash = self.chain.client.send(&self.handle, from, method, args).await?;
        tracing::debug!(contract = self.handle.name(), method, %from, ?tx_hash, "transaction submitted");
        Ok(PendingTransaction {
            chain: self.chain.clone(),
            tx_hash,
        })
    }
}

#[derive(Debug)]
#[must_use = "effects of a transaction are only visible after waiting for it"]
pub struct PendingTransaction {
    chain: Chain,
    tx_hash: TxHash,
}

impl PendingTransaction {
    pub fn tx_hash(&self) -> TxHash {
        self.tx_hash
    }

    /// Suspends until the transaction is mined.
    pub async fn wait(self) -> Result<Receipt> {
        self.chain.client.wait_for_receipt(self.tx_hash).await
    }
}
