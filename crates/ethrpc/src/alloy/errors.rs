use alloy::transports::{RpcError, TransportError};

pub trait TransportErrorExt {
    /// Returns whether the node rejected the request because the EVM
    /// execution reverted, as opposed to the node or the connection failing.
    fn is_revert(&self) -> bool;
}

impl TransportErrorExt for TransportError {
    fn is_revert(&self) -> bool {
        match self {
            // Hardhat reports reverts with code -32603 and a message starting
            // with "VM Exception", anvil with code 3 and "execution reverted".
            // Only the former attaches revert data consistently, so the
            // message is checked too.
            RpcError::ErrorResp(err) => {
                let has_revert_data = err.as_revert_data().is_some();
                tracing::debug!(?err, %has_revert_data, "rpc error response");
                has_revert_data || err.message.contains("revert")
            }
            _ => false,
        }
    }
}

/// Create an arbitrary transport error that classifies as a revert.
/// Useful for testing.
#[cfg(any(test, feature = "test-util"))]
pub fn testing_revert_error() -> TransportError {
    TransportError::ErrorResp(alloy::rpc::json_rpc::ErrorPayload {
        code: 3,
        message: "execution reverted".into(),
        data: None,
    })
}

/// Create an arbitrary transport error that classifies as a node error.
/// Useful for testing.
#[cfg(any(test, feature = "test-util"))]
pub fn testing_node_error() -> TransportError {
    TransportError::ErrorResp(alloy::rpc::json_rpc::ErrorPayload::internal_error())
}
