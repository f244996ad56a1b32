//! In-memory execution backend
//!
//! Simulates the ledger effects the deployer depends on: signer nonces,
//! contract creation at the standard `keccak(rlp(sender, nonce))` address,
//! one block per transaction, and owner bookkeeping for `Ownable`-style
//! contracts. No bytecode is executed.

use async_trait::async_trait;
use chrono::Utc;
use ethers_core::utils::get_contract_address;
use std::collections::HashMap;
use std::path::Path;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::account::{default_signers, Account, Address};
use crate::backend::traits::{
    DeployRequest, Deployment, ExecutionBackend, TransactionReceipt, DEFAULT_CHAIN_ID,
};
use crate::config::NetworkConfig;
use crate::contract::{ContractArtifact, OwnerModel, Token};
use crate::errors::{DeployError, Result};

#[derive(Debug, Clone)]
struct DeployedContract {
    contract_name: String,
    owner: Address,
}

#[derive(Debug, Default)]
struct Ledger {
    artifacts: HashMap<String, ContractArtifact>,
    contracts: HashMap<Address, DeployedContract>,
    nonces: HashMap<Address, u64>,
    receipts: Vec<TransactionReceipt>,
    block_number: u64,
}

/// Simulated chain held entirely in memory
///
/// Each instance is an independent ledger; create a fresh one per scenario.
#[derive(Debug)]
pub struct InMemoryBackend {
    chain_id: u64,
    accounts: Vec<Account>,
    ledger: RwLock<Ledger>,
}

impl InMemoryBackend {
    /// Create an empty ledger with the given signers and no artifacts
    pub fn new(chain_id: u64, accounts: Vec<Account>) -> Self {
        Self {
            chain_id,
            accounts,
            ledger: RwLock::new(Ledger::default()),
        }
    }

    /// Local development chain: default signers and the bundled `Cryptomon` artifact
    pub fn local() -> Result<Self> {
        let backend = Self::new(DEFAULT_CHAIN_ID, default_signers()?);
        Ok(backend.with_artifact(ContractArtifact::cryptomon()?))
    }

    /// Build a backend from a network config
    ///
    /// Relative `artifactsDir` entries resolve against `base_dir`.
    pub fn from_config(config: &NetworkConfig, base_dir: &Path) -> Result<Self> {
        let accounts = config.accounts()?;
        let mut backend = Self::new(config.chain_id(), accounts);

        if let Some(dir) = config.spec.artifacts_dir.as_ref() {
            let dir = if dir.is_absolute() {
                dir.clone()
            } else {
                base_dir.join(dir)
            };
            for artifact in ContractArtifact::load_dir(&dir)? {
                backend = backend.with_artifact(artifact);
            }
        }

        info!(
            network = %config.metadata.name,
            chain_id = backend.chain_id,
            signers = backend.accounts.len(),
            "in-memory backend configured"
        );
        Ok(backend)
    }

    /// Register an artifact, replacing any artifact of the same name
    pub fn with_artifact(mut self, artifact: ContractArtifact) -> Self {
        self.ledger
            .get_mut()
            .artifacts
            .insert(artifact.contract_name.clone(), artifact);
        self
    }

    /// Register an artifact on a shared backend
    pub async fn register_artifact(&self, artifact: ContractArtifact) {
        let mut ledger = self.ledger.write().await;
        ledger.artifacts.insert(artifact.contract_name.clone(), artifact);
    }

    /// Receipts of every mined transaction, oldest first
    pub async fn receipts(&self) -> Vec<TransactionReceipt> {
        self.ledger.read().await.receipts.clone()
    }

    pub async fn block_number(&self) -> u64 {
        self.ledger.read().await.block_number
    }

    /// Next nonce of `account`
    pub async fn nonce(&self, account: Address) -> u64 {
        self.ledger.read().await.nonces.get(&account).copied().unwrap_or(0)
    }

    fn check_arguments(artifact: &ContractArtifact, args: &[Token]) -> Result<()> {
        let inputs = artifact.constructor_inputs();
        if inputs.len() != args.len() {
            return Err(DeployError::Deployment(format!(
                "{} constructor expects {} argument(s), got {}",
                artifact.contract_name,
                inputs.len(),
                args.len()
            )));
        }

        for (position, (param, value)) in inputs.iter().zip(args).enumerate() {
            if !value.type_check(&param.kind) {
                return Err(DeployError::Deployment(format!(
                    "{} constructor argument {} ({}) expects {}, got {:?}",
                    artifact.contract_name, position, param.name, param.kind, value
                )));
            }
        }

        Ok(())
    }

    fn resolve_owner(artifact: &ContractArtifact, request: &DeployRequest) -> Result<Address> {
        match artifact.owner_model() {
            OwnerModel::ConstructorArgument { index } => {
                let owner = request
                    .args
                    .get(index)
                    .cloned()
                    .and_then(Token::into_address)
                    .ok_or_else(|| {
                        DeployError::Deployment(format!(
                            "{} constructor argument {} is not an address",
                            artifact.contract_name, index
                        ))
                    })?;

                if owner.is_zero() {
                    return Err(DeployError::Deployment(format!(
                        "{} constructor reverted: OwnableInvalidOwner({:?})",
                        artifact.contract_name, owner
                    )));
                }
                Ok(owner)
            }
            OwnerModel::Deployer => Ok(request.from.address()),
            OwnerModel::Fixed(owner) => Ok(owner),
        }
    }
}

#[async_trait]
impl ExecutionBackend for InMemoryBackend {
    fn chain_id(&self) -> u64 {
        self.chain_id
    }

    async fn get_signers(&self) -> Result<Vec<Account>> {
        debug!(count = self.accounts.len(), "signers requested");
        Ok(self.accounts.clone())
    }

    async fn artifact(&self, contract_name: &str) -> Result<ContractArtifact> {
        self.ledger
            .read()
            .await
            .artifacts
            .get(contract_name)
            .cloned()
            .ok_or_else(|| DeployError::NotFound(contract_name.to_string()))
    }

    async fn deploy(&self, request: DeployRequest) -> Result<Deployment> {
        let mut ledger = self.ledger.write().await;

        let artifact = ledger
            .artifacts
            .get(&request.contract_name)
            .ok_or_else(|| DeployError::NotFound(request.contract_name.clone()))?;

        if !self.accounts.contains(&request.from) {
            return Err(DeployError::Deployment(format!(
                "sender {} is not a configured signer",
                request.from
            )));
        }

        // Malformed arguments never leave the client; a constructor revert
        // is mined and consumes the sender's nonce.
        Self::check_arguments(artifact, &request.args)?;
        let construction = Self::resolve_owner(artifact, &request);

        let deployer = request.from.address();
        let nonce = ledger.nonces.get(&deployer).copied().unwrap_or(0);
        let address = get_contract_address(deployer, nonce);

        ledger.nonces.insert(deployer, nonce + 1);
        ledger.block_number += 1;

        let receipt = TransactionReceipt {
            transaction_index: ledger.receipts.len() as u64,
            block_number: ledger.block_number,
            from: deployer,
            status: construction.is_ok(),
            contract_address: construction.is_ok().then_some(address),
            timestamp: Utc::now(),
        };
        ledger.receipts.push(receipt.clone());

        let owner = match construction {
            Ok(owner) => owner,
            Err(e) => {
                warn!(
                    contract = %request.contract_name,
                    from = ?deployer,
                    nonce,
                    error = %e,
                    "contract creation reverted"
                );
                return Err(e);
            }
        };
        ledger.contracts.insert(
            address,
            DeployedContract {
                contract_name: request.contract_name.clone(),
                owner,
            },
        );

        info!(
            contract = %request.contract_name,
            ?address,
            from = ?deployer,
            block = receipt.block_number,
            "contract deployed"
        );

        Ok(Deployment { address, receipt })
    }

    async fn call(&self, address: Address, accessor: &str) -> Result<Token> {
        let ledger = self.ledger.read().await;

        let contract = ledger
            .contracts
            .get(&address)
            .ok_or_else(|| DeployError::Call(format!("no contract deployed at {:?}", address)))?;

        let artifact = ledger
            .artifacts
            .get(&contract.contract_name)
            .ok_or_else(|| DeployError::NotFound(contract.contract_name.clone()))?;

        if !artifact.has_accessor(accessor) {
            return Err(DeployError::Call(format!(
                "{} at {:?} has no accessor `{}`",
                contract.contract_name, address, accessor
            )));
        }

        debug!(contract = %contract.contract_name, ?address, accessor, "accessor call");

        match accessor {
            "owner" => Ok(Token::Address(contract.owner)),
            other => Err(DeployError::Call(format!(
                "{}.{}() has no simulated state",
                contract.contract_name, other
            ))),
        }
    }
}
