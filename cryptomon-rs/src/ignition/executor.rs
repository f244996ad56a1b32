//! Module execution
//!
//! Deploys every declared contract in declaration order, strictly one at a
//! time. Arguments are forwarded exactly as the module declares them.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

use crate::account::{checksummed, Account, Address};
use crate::backend::ExecutionBackend;
use crate::contract::{get_contract_factory, ContractInstance, Token};
use crate::errors::{DeployError, Result};
use crate::ignition::module::{AccountRef, Argument, ContractFuture, DeploymentModule};

/// File written per chain by [`DeploymentResult::write_deployed_addresses`]
pub const DEPLOYED_ADDRESSES_FILE: &str = "deployed_addresses.json";

/// Outcome of executing a module
#[derive(Debug, Clone)]
pub struct DeploymentResult {
    module_id: String,
    chain_id: u64,
    instances: BTreeMap<String, ContractInstance>,
    results: BTreeMap<String, ContractInstance>,
}

impl DeploymentResult {
    pub fn module_id(&self) -> &str {
        &self.module_id
    }

    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }

    /// Instance exposed under `key` by the module
    pub fn get(&self, key: &str) -> Option<&ContractInstance> {
        self.results.get(key)
    }

    /// Instance deployed for future `future_id`
    pub fn instance(&self, future_id: &str) -> Option<&ContractInstance> {
        self.instances.get(future_id)
    }

    /// Future id to deployed address, for every future in the module
    pub fn deployed_addresses(&self) -> BTreeMap<String, Address> {
        self.instances
            .iter()
            .map(|(id, instance)| (id.clone(), instance.address()))
            .collect()
    }

    /// Write `deployed_addresses.json` under `<root>/chain-<chainId>/`
    ///
    /// Entries of other modules are kept. Every `<moduleId>#` entry is
    /// replaced by this run's futures, so futures the module no longer
    /// declares disappear. The file is swapped in by rename and is never
    /// observed half-written.
    pub fn write_deployed_addresses<P: AsRef<Path>>(&self, root: P) -> Result<PathBuf> {
        let chain_dir = root.as_ref().join(format!("chain-{}", self.chain_id));
        fs::create_dir_all(&chain_dir)?;

        let path = chain_dir.join(DEPLOYED_ADDRESSES_FILE);
        let mut addresses: BTreeMap<String, String> = if path.exists() {
            serde_json::from_str(&fs::read_to_string(&path)?)?
        } else {
            BTreeMap::new()
        };

        let prefix = format!("{}#", self.module_id);
        addresses.retain(|id, _| !id.starts_with(&prefix));
        addresses.extend(
            self.deployed_addresses()
                .into_iter()
                .map(|(id, address)| (id, checksummed(&address))),
        );

        let json = serde_json::to_string_pretty(&addresses)?;
        let staging = chain_dir.join(format!("{}.tmp", DEPLOYED_ADDRESSES_FILE));
        fs::write(&staging, json)?;
        fs::rename(&staging, &path)?;

        info!(path = %path.display(), entries = addresses.len(), "deployed addresses written");
        Ok(path)
    }
}

/// Runs deployment modules against one backend
pub struct ModuleExecutor {
    backend: Arc<dyn ExecutionBackend>,
}

impl ModuleExecutor {
    pub fn new(backend: Arc<dyn ExecutionBackend>) -> Self {
        Self { backend }
    }

    /// Deploy every future of `module`
    ///
    /// The first failure aborts the run and is returned unchanged.
    pub async fn deploy(&self, module: &DeploymentModule) -> Result<DeploymentResult> {
        let signers = self.backend.get_signers().await?;
        if signers.is_empty() {
            return Err(DeployError::NoSigners);
        }

        info!(
            module = module.id(),
            futures = module.futures().len(),
            chain_id = self.backend.chain_id(),
            "executing module"
        );

        let mut instances: BTreeMap<String, ContractInstance> = BTreeMap::new();
        for future in module.futures() {
            let instance = self.execute_future(future, &signers, &instances).await?;
            instances.insert(future.id.clone(), instance);
        }

        let mut results = BTreeMap::new();
        for (key, future) in module.results() {
            let instance = instances
                .get(&future.id)
                .cloned()
                .ok_or_else(|| DeployError::Module(format!("{} was never executed", future.id)))?;
            results.insert(key.clone(), instance);
        }

        Ok(DeploymentResult {
            module_id: module.id().to_string(),
            chain_id: self.backend.chain_id(),
            instances,
            results,
        })
    }

    async fn execute_future(
        &self,
        future: &ContractFuture,
        signers: &[Account],
        deployed: &BTreeMap<String, ContractInstance>,
    ) -> Result<ContractInstance> {
        let from = resolve_account(future.from.unwrap_or(AccountRef(0)), signers)?;
        let args = future
            .args
            .iter()
            .map(|arg| resolve_argument(arg, signers, deployed))
            .collect::<Result<Vec<_>>>()?;

        debug!(future = %future.id, %from, args = args.len(), "executing future");

        let factory = get_contract_factory(Arc::clone(&self.backend), &future.contract_name)
            .await?
            .connect(from);
        let instance = factory.deploy(args).await?;

        info!(future = %future.id, address = ?instance.address(), "future executed");
        Ok(instance)
    }
}

fn resolve_account(account: AccountRef, signers: &[Account]) -> Result<Account> {
    signers
        .get(account.0)
        .copied()
        .ok_or(DeployError::SignerOutOfRange {
            index: account.0,
            available: signers.len(),
        })
}

fn resolve_argument(
    arg: &Argument,
    signers: &[Account],
    deployed: &BTreeMap<String, ContractInstance>,
) -> Result<Token> {
    match arg {
        Argument::Value(value) => Ok(value.clone()),
        Argument::Account(account) => Ok(resolve_account(*account, signers)?.into()),
        Argument::Contract(id) => deployed
            .get(id)
            .map(|instance| Token::Address(instance.address()))
            .ok_or_else(|| DeployError::Module(format!("{} has not been deployed", id))),
    }
}
