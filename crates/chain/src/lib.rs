//! Client side of the contract workflows: the [`ChainClient`] collaborator
//! interface, a JSON-RPC implementation for development nodes and an
//! in-memory chain for tests.
//!
//! Every state-changing operation returns a pending handle that has to be
//! awaited before its effects are guaranteed to be visible to reads:
//!
//! ```text
//! factory.deploy(&from, args) -> PendingDeployment -> wait_for_deployment() -> Contract
//! contract.send(&from, method, args) -> PendingTransaction -> wait() -> Receipt
//! ```

mod client;
mod contract;
#[cfg(any(test, feature = "test-util"))]
pub mod dev;
mod error;
pub mod rpc;
mod types;

#[cfg(any(test, feature = "test-util"))]
pub use client::MockChainClient;
pub use {
    alloy::dyn_abi::DynSolValue,
    client::ChainClient,
    contract::{Chain, Contract, Factory, PendingDeployment, PendingTransaction},
    error::{Error, Result},
    types::{Account, ContractFactory, ContractHandle, Receipt, SnapshotId, TxHash},
};
