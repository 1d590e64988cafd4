//! Deterministic in-memory chain for tests.
//!
//! Contract types are registered as [`ContractLogic`] implementations that
//! stand in for the compiled contracts. Submitted transactions wait in a
//! mempool and are only executed when mined, either explicitly through
//! [`DevChain::mine`] or implicitly when somebody waits for one of them. Reads
//! therefore never observe a transaction before its confirmation.

use {
    crate::{
        ChainClient,
        Error,
        Result,
        types::{Account, ContractFactory, ContractHandle, Receipt, SnapshotId, TxHash},
    },
    alloy::{
        dyn_abi::DynSolValue,
        json_abi::JsonAbi,
        primitives::{Address, Bytes, U256, keccak256},
    },
    std::{
        collections::HashMap,
        fmt,
        sync::{Arc, Mutex, MutexGuard},
    },
};

/// Number of accounts a [`DevChain`] starts with, same as the Hardhat network.
pub const DEFAULT_ACCOUNTS: usize = 20;

const GAS_PER_TRANSACTION: u64 = 21_000;

/// Constructor of a contract type.
pub trait ContractLogic: Send + Sync {
    fn deploy(&self, deployer: Address, args: &[DynSolValue]) -> Result<Box<dyn ContractState>>;
}

/// Storage and behaviour of one deployed contract instance.
pub trait ContractState: Send + Sync + fmt::Debug {
    /// Read-only call.
    fn call(&self, method: &str, args: &[DynSolValue]) -> Result<Vec<DynSolValue>>;

    /// State-changing call executed when the transaction is mined.
    fn transact(&mut self, sender: Address, method: &str, args: &[DynSolValue]) -> Result<()>;

    fn clone_box(&self) -> Box<dyn ContractState>;
}

impl Clone for Box<dyn ContractState> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

/// Convenience for [`ContractState`] implementations: the error a contract
/// reverts with.
pub fn revert(reason: impl Into<String>) -> Error {
    Error::Reverted {
        reason: reason.into(),
    }
}

#[derive(Debug, Clone)]
enum Payload {
    Deploy {
        contract: String,
        address: Address,
        args: Vec<DynSolValue>,
    },
    Call {
        to: Address,
        method: String,
        args: Vec<DynSolValue>,
    },
}

#[derive(Debug, Clone)]
struct PendingTx {
    hash: TxHash,
    from: Address,
    payload: Payload,
}

/// Outcome of a mined transaction.
#[derive(Debug, Clone)]
enum Mined {
    Success(Receipt),
    Reverted(String),
}

/// Everything a snapshot captures.
#[derive(Debug, Clone, Default)]
struct World {
    block_number: u64,
    nonces: HashMap<Address, u64>,
    contracts: HashMap<Address, Box<dyn ContractState>>,
    mempool: Vec<PendingTx>,
    mined: HashMap<TxHash, Mined>,
}

#[derive(Debug, Default)]
struct State {
    world: World,
    snapshots: Vec<(SnapshotId, World)>,
    next_snapshot: u64,
}

pub struct DevChain {
    logic: HashMap<String, Arc<dyn ContractLogic>>,
    accounts: Vec<Account>,
    state: Mutex<State>,
}

impl Default for DevChain {
    fn default() -> Self {
        Self::new(DEFAULT_ACCOUNTS)
    }
}

impl DevChain {
    /// Chain with `accounts` funded accounts and no contract types.
    pub fn new(accounts: usize) -> Self {
        let accounts = (0..accounts)
            .map(|i| {
                let mut bytes = [0u8; 20];
                bytes[0] = 0xde;
                bytes[12..].copy_from_slice(&(i as u64 + 1).to_be_bytes());
                Account::new(Address::from(bytes))
            })
            .collect();
        Self {
            logic: HashMap::new(),
            accounts,
            state: Mutex::default(),
        }
    }

    /// Registers a deployable contract type under `name`.
    pub fn with_contract(mut self, name: &str, logic: impl ContractLogic + 'static) -> Self {
        self.logic.insert(name.to_string(), Arc::new(logic));
        self
    }

    pub fn block_number(&self) -> u64 {
        self.lock().world.block_number
    }

    /// Number of submitted but not yet mined transactions.
    pub fn pending_transactions(&self) -> usize {
        self.lock().world.mempool.len()
    }

    /// Mines all pending transactions into one block. Does nothing if the
    /// mempool is empty.
    pub fn mine(&self) {
        let mut state = self.lock();
        Self::mine_block(&self.logic, &mut state.world);
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn ensure_account(&self, account: &Account) -> Result<()> {
        if self.accounts.contains(account) {
            Ok(())
        } else {
            Err(Error::UnknownAccount(account.address()))
        }
    }

    fn submit(&self, from: &Account, payload: impl FnOnce(u64) -> Payload) -> TxHash {
        let mut state = self.lock();
        let nonce = state.world.nonces.entry(from.address()).or_default();
        let current = *nonce;
        *nonce += 1;
        let hash = keccak256([from.address().as_slice(), &current.to_be_bytes()].concat());
        state.world.mempool.push(PendingTx {
            hash,
            from: from.address(),
            payload: payload(current),
        });
        hash
    }

    fn mine_block(logic: &HashMap<String, Arc<dyn ContractLogic>>, world: &mut World) {
        if world.mempool.is_empty() {
            return;
        }
        world.block_number += 1;
        let block_number = world.block_number;
        for tx in std::mem::take(&mut world.mempool) {
            let outcome = Self::execute(logic, world, &tx).map(|contract_address| Receipt {
                transaction_hash: tx.hash,
                block_number: Some(block_number),
                gas_used: GAS_PER_TRANSACTION,
                contract_address,
            });
            let mined = match outcome {
                Ok(receipt) => Mined::Success(receipt),
                Err(err) => {
                    tracing::debug!(tx_hash = ?tx.hash, %err, "dev chain transaction reverted");
                    Mined::Reverted(match err {
                        Error::Reverted { reason } => reason,
                        other => other.to_string(),
                    })
                }
            };
            world.mined.insert(tx.hash, mined);
        }
    }

    fn execute(
        logic: &HashMap<String, Arc<dyn ContractLogic>>,
        world: &mut World,
        tx: &PendingTx,
    ) -> Result<Option<Address>> {
        match &tx.payload {
            Payload::Deploy {
                contract,
                address,
                args,
            } => {
                let logic = logic
                    .get(contract)
                    .ok_or_else(|| contracts::Error::UnknownContract(contract.clone()))?;
                let state = logic.deploy(tx.from, args)?;
                world.contracts.insert(*address, state);
                Ok(Some(*address))
            }
            Payload::Call { to, method, args } => {
                let contract = world
                    .contracts
                    .get_mut(to)
                    .ok_or_else(|| revert(format!("no contract at {to}")))?;
                // Execute on a copy so a revert leaves no partial writes.
                let mut updated = contract.clone();
                updated.transact(tx.from, method, args)?;
                *contract = updated;
                Ok(None)
            }
        }
    }
}

impl fmt::Debug for DevChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DevChain")
            .field("contracts", &self.logic.keys().collect::<Vec<_>>())
            .field("accounts", &self.accounts.len())
            .finish_non_exhaustive()
    }
}

#[async_trait::async_trait]
impl ChainClient for DevChain {
    async fn signers(&self) -> Result<Vec<Account>> {
        Ok(self.accounts.clone())
    }

    fn contract_factory(&self, name: &str) -> Result<ContractFactory> {
        if !self.logic.contains_key(name) {
            return Err(contracts::Error::UnknownContract(name.to_string()).into());
        }
        Ok(ContractFactory::new(name, JsonAbi::default(), Bytes::new()))
    }

    async fn deploy(
        &self,
        factory: &ContractFactory,
        from: &Account,
        args: &[DynSolValue],
    ) -> Result<TxHash> {
        self.ensure_account(from)?;
        Ok(self.submit(from, |nonce| Payload::Deploy {
            contract: factory.name().to_string(),
            address: from.address().create(nonce),
            args: args.to_vec(),
        }))
    }

    async fn send(
        &self,
        contract: &ContractHandle,
        from: &Account,
        method: &str,
        args: &[DynSolValue],
    ) -> Result<TxHash> {
        self.ensure_account(from)?;
        Ok(self.submit(from, |_| Payload::Call {
            to: contract.address(),
            method: method.to_string(),
            args: args.to_vec(),
        }))
    }

    async fn call(
        &self,
        contract: &ContractHandle,
        method: &str,
        args: &[DynSolValue],
    ) -> Result<Vec<DynSolValue>> {
        let state = self.lock();
        state
            .world
            .contracts
            .get(&contract.address())
            .ok_or_else(|| revert(format!("no contract at {}", contract.address())))?
            .call(method, args)
    }

    async fn wait_for_receipt(&self, tx_hash: TxHash) -> Result<Receipt> {
        let mut state = self.lock();
        if state.world.mempool.iter().any(|tx| tx.hash == tx_hash) {
            Self::mine_block(&self.logic, &mut state.world);
        }
        match state.world.mined.get(&tx_hash) {
            Some(Mined::Success(receipt)) => Ok(receipt.clone()),
            Some(Mined::Reverted(reason)) => Err(revert(reason.clone())),
            None => Err(Error::UnknownTransaction(tx_hash)),
        }
    }

    async fn snapshot(&self) -> Result<SnapshotId> {
        let mut state = self.lock();
        state.next_snapshot += 1;
        let id = SnapshotId(U256::from(state.next_snapshot));
        let world = state.world.clone();
        state.snapshots.push((id, world));
        Ok(id)
    }

    async fn revert(&self, snapshot: SnapshotId) -> Result<bool> {
        let mut state = self.lock();
        let Some(position) = state.snapshots.iter().position(|(id, _)| *id == snapshot) else {
            return Ok(false);
        };
        state.world = state.snapshots[position].1.clone();
        state.snapshots.truncate(position);
        Ok(true)
    }
}
