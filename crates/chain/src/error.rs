use {
    crate::types::{SnapshotId, TxHash},
    alloy::{
        primitives::Address,
        providers::PendingTransactionError,
        transports::TransportError,
    },
    ethrpc::alloy::errors::TransportErrorExt,
};

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The requested contract type is not part of the build artifacts.
    #[error(transparent)]
    Artifact(#[from] contracts::Error),
    #[error("contract {contract} has no function {method} taking {arguments} argument(s)")]
    UnknownMethod {
        contract: String,
        method: String,
        arguments: usize,
    },
    #[error("failed to {action} for {contract}.{method}")]
    Abi {
        action: &'static str,
        contract: String,
        method: String,
        #[source]
        source: alloy::dyn_abi::Error,
    },
    #[error("{contract}.{method} returned {count} values, expected 1")]
    UnexpectedOutput {
        contract: String,
        method: String,
        count: usize,
    },
    #[error("account {0} is not managed by the node")]
    UnknownAccount(Address),
    #[error("execution reverted: {reason}")]
    Reverted { reason: String },
    #[error("node request failed")]
    Node(#[source] TransportError),
    #[error("failed waiting for transaction {tx_hash} to be mined")]
    Confirmation {
        tx_hash: TxHash,
        #[source]
        source: PendingTransactionError,
    },
    #[error("transaction {0} did not create a contract")]
    MissingContractAddress(TxHash),
    #[error("transaction {0} is unknown")]
    UnknownTransaction(TxHash),
    #[error("snapshot {0} is unknown or was already reverted")]
    UnknownSnapshot(SnapshotId),
}

impl Error {
    pub fn is_unknown_contract(&self) -> bool {
        matches!(
            self,
            Self::Artifact(
                contracts::Error::UnknownContract(_) | contracts::Error::AmbiguousContract { .. }
            )
        )
    }

    pub fn is_revert(&self) -> bool {
        matches!(self, Self::Reverted { .. })
    }
}

impl From<TransportError> for Error {
    fn from(err: TransportError) -> Self {
        if err.is_revert() {
            Self::Reverted {
                reason: err.to_string(),
            }
        } else {
            Self::Node(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use {super::*, ethrpc::alloy::errors::{testing_node_error, testing_revert_error}};

    #[test]
    fn transport_errors_are_classified() {
        assert!(Error::from(testing_revert_error()).is_revert());
        assert!(matches!(Error::from(testing_node_error()), Error::Node(_)));
    }

    #[test]
    fn unknown_contract() {
        let err = Error::from(contracts::Error::UnknownContract("Greeter".into()));
        assert!(err.is_unknown_contract());
        assert_eq!(err.to_string(), r#"artifact for contract "Greeter" not found"#);
    }
}
