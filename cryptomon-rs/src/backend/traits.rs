//! Execution backend trait
//!
//! Abstracts the chain a contract is deployed to. Implementations include:
//! - InMemoryBackend (simulated ledger for tests and local runs)
//! - Future: JSON-RPC backend against a live node
//!
//! Every method is a suspension point; callers await each one before issuing
//! the next, so a backend never sees overlapping requests from the core.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::account::{Account, Address};
use crate::contract::{ContractArtifact, Token};
use crate::errors::{DeployError, Result};

/// Local development chain id
pub const DEFAULT_CHAIN_ID: u64 = 31337;

/// A contract creation transaction
#[derive(Debug, Clone, PartialEq)]
pub struct DeployRequest {
    pub contract_name: String,
    pub args: Vec<Token>,
    pub from: Account,
}

/// Receipt of a mined transaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionReceipt {
    pub transaction_index: u64,
    pub block_number: u64,
    pub from: Address,
    /// `false` when the creation reverted (the nonce is still consumed)
    pub status: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contract_address: Option<Address>,
    pub timestamp: DateTime<Utc>,
}

/// Result of a successful contract creation
#[derive(Debug, Clone, PartialEq)]
pub struct Deployment {
    pub address: Address,
    pub receipt: TransactionReceipt,
}

/// Execution backend trait
///
/// All chains the deployer can target implement this interface. Failures map
/// onto the deployment error taxonomy:
/// - unknown contract name: `DeployError::NotFound`
/// - constructor rejected: `DeployError::Deployment`
/// - missing or reverting accessor: `DeployError::Call`
#[async_trait]
pub trait ExecutionBackend: Send + Sync {
    /// Chain id the backend executes against
    fn chain_id(&self) -> u64;

    /// Available signers in order; index 0 is the default deployer
    ///
    /// May be empty. Consumers that need an owner use [`first_signer`].
    async fn get_signers(&self) -> Result<Vec<Account>>;

    /// Compiled artifact for `contract_name`
    async fn artifact(&self, contract_name: &str) -> Result<ContractArtifact>;

    /// Send a contract creation transaction and wait for it to be mined
    async fn deploy(&self, request: DeployRequest) -> Result<Deployment>;

    /// Read-only call of a zero-argument accessor
    async fn call(&self, address: Address, accessor: &str) -> Result<Token>;
}

/// First available signer, or `NoSigners` when none are configured
pub async fn first_signer(backend: &dyn ExecutionBackend) -> Result<Account> {
    signer_at(backend, 0).await
}

/// Signer at `index`
pub async fn signer_at(backend: &dyn ExecutionBackend, index: usize) -> Result<Account> {
    let signers = backend.get_signers().await?;
    if signers.is_empty() {
        return Err(DeployError::NoSigners);
    }

    signers.get(index).copied().ok_or(DeployError::SignerOutOfRange {
        index,
        available: signers.len(),
    })
}
