//! Ownership verification for freshly deployed Cryptomon contracts
//!
//! The check deploys its own instance through the contract factory, passing
//! the chosen signer as the sole constructor argument, and then reads the
//! contract's `owner()` back. It does not go through the deployment module.

use std::sync::Arc;
use tracing::{info, warn};

use crate::account::Account;
use crate::backend::{signer_at, ExecutionBackend, TransactionReceipt};
use crate::contract::{get_contract_factory, ContractInstance};
use crate::errors::{DeployError, Result};
use crate::modules::cryptomon::CONTRACT_NAME;

/// Evidence of a passed ownership check
#[derive(Debug, Clone)]
pub struct OwnershipReport {
    pub owner: Account,
    pub contract: ContractInstance,
}

impl OwnershipReport {
    pub fn receipt(&self) -> &TransactionReceipt {
        self.contract.deployment_receipt()
    }
}

/// Deploy `Cryptomon` with `owner` as its constructor argument
pub async fn deploy_cryptomon(
    backend: Arc<dyn ExecutionBackend>,
    owner: Account,
) -> Result<ContractInstance> {
    let factory = get_contract_factory(backend, CONTRACT_NAME).await?;
    factory.deploy(vec![owner.into()]).await
}

/// Fail with `OwnerMismatch` unless `actual` is `expected`
pub fn assert_owner(expected: Account, actual: Account) -> Result<()> {
    if expected != actual {
        warn!(%expected, %actual, "owner mismatch");
        return Err(DeployError::OwnerMismatch {
            expected: expected.address(),
            actual: actual.address(),
        });
    }
    Ok(())
}

/// Deploy with the first signer as owner and confirm `owner()` reports it
pub async fn verify_owner(backend: Arc<dyn ExecutionBackend>) -> Result<OwnershipReport> {
    verify_owner_with(backend, 0).await
}

/// Same check using the signer at `signer_index` as owner
pub async fn verify_owner_with(
    backend: Arc<dyn ExecutionBackend>,
    signer_index: usize,
) -> Result<OwnershipReport> {
    let owner = signer_at(backend.as_ref(), signer_index).await?;
    let contract = deploy_cryptomon(backend, owner).await?;
    let reported = contract.owner().await?;

    assert_owner(owner, reported)?;

    info!(
        %owner,
        address = ?contract.address(),
        "ownership verified"
    );
    Ok(OwnershipReport { owner, contract })
}
