use {
    alloy::{
        json_abi::{Function, JsonAbi},
        primitives::{Address, Bytes, U256},
    },
    contracts::Artifact,
    std::{fmt, sync::Arc},
};

pub use alloy::primitives::TxHash;

/// An identity able to sign transactions. Accounts are provided by the
/// environment (the node or the dev chain) and never created here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Account {
    address: Address,
}

impl Account {
    pub fn new(address: Address) -> Self {
        Self { address }
    }

    pub fn address(&self) -> Address {
        self.address
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.address)
    }
}

/// Everything needed to deploy a named contract type.
#[derive(Debug, Clone)]
pub struct ContractFactory {
    name: String,
    abi: Arc<JsonAbi>,
    bytecode: Bytes,
}

impl ContractFactory {
    pub fn new(name: impl Into<String>, abi: JsonAbi, bytecode: Bytes) -> Self {
        Self {
            name: name.into(),
            abi: Arc::new(abi),
            bytecode,
        }
    }

    pub fn from_artifact(artifact: &Artifact) -> Self {
        Self::new(
            artifact.contract_name.clone(),
            artifact.abi.clone(),
            artifact.bytecode.clone(),
        )
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn abi(&self) -> &JsonAbi {
        &self.abi
    }

    pub fn bytecode(&self) -> &Bytes {
        &self.bytecode
    }

    /// Handle for an instance of this contract type at `address`.
    pub fn at(&self, address: Address) -> ContractHandle {
        ContractHandle {
            name: self.name.clone(),
            address,
            abi: Arc::clone(&self.abi),
        }
    }
}

/// A deployed contract instance. Assumed to stay callable for as long as the
/// workflow holding it runs.
#[derive(Debug, Clone)]
pub struct ContractHandle {
    name: String,
    address: Address,
    abi: Arc<JsonAbi>,
}

impl ContractHandle {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn address(&self) -> Address {
        self.address
    }

    pub fn abi(&self) -> &JsonAbi {
        &self.abi
    }

    /// Resolves an overloaded function by name and number of arguments.
    pub fn function(&self, method: &str, arguments: usize) -> crate::Result<&Function> {
        self.abi
            .function(method)
            .into_iter()
            .flatten()
            .find(|function| function.inputs.len() == arguments)
            .ok_or_else(|| crate::Error::UnknownMethod {
                contract: self.name.clone(),
                method: method.to_string(),
                arguments,
            })
    }
}

/// Proof that a transaction was mined successfully. Reverted transactions
/// never produce a receipt, they surface as [`crate::Error::Reverted`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Receipt {
    pub transaction_hash: TxHash,
    pub block_number: Option<u64>,
    pub gas_used: u64,
    pub contract_address: Option<Address>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SnapshotId(pub U256);

impl fmt::Display for SnapshotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}
