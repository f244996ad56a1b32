//! Deployed contract handles

use std::fmt;
use std::sync::Arc;

use crate::account::{Account, Address};
use crate::backend::{ExecutionBackend, TransactionReceipt};
use crate::contract::Token;
use crate::errors::{DeployError, Result};

/// A contract instance living on a backend
///
/// Read-only: the handle exposes accessors but never mutates contract state.
#[derive(Clone)]
pub struct ContractInstance {
    backend: Arc<dyn ExecutionBackend>,
    contract_name: String,
    address: Address,
    receipt: TransactionReceipt,
}

impl ContractInstance {
    pub(crate) fn new(
        backend: Arc<dyn ExecutionBackend>,
        contract_name: String,
        address: Address,
        receipt: TransactionReceipt,
    ) -> Self {
        Self {
            backend,
            contract_name,
            address,
            receipt,
        }
    }

    pub fn contract_name(&self) -> &str {
        &self.contract_name
    }

    pub fn address(&self) -> Address {
        self.address
    }

    /// Receipt of the creation transaction
    pub fn deployment_receipt(&self) -> &TransactionReceipt {
        &self.receipt
    }

    /// Call a zero-argument accessor
    pub async fn call(&self, accessor: &str) -> Result<Token> {
        self.backend.call(self.address, accessor).await
    }

    /// Current owner as reported by the contract's `owner()` accessor
    pub async fn owner(&self) -> Result<Account> {
        match self.call("owner").await? {
            Token::Address(address) => Ok(Account::new(address)),
            other => Err(DeployError::Call(format!(
                "{}.owner() returned {:?} instead of an address",
                self.contract_name, other
            ))),
        }
    }
}

impl fmt::Debug for ContractInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContractInstance")
            .field("contract_name", &self.contract_name)
            .field("address", &self.address)
            .field("block_number", &self.receipt.block_number)
            .finish()
    }
}
