//! Declarative deployment modules
//!
//! A module is a pure description of what to deploy. Building one performs
//! no I/O; the [`ModuleExecutor`](crate::ignition::ModuleExecutor) turns it
//! into transactions against a backend.
//!
//! ```
//! use cryptomon_deploy::ignition::{build_module, ModuleResults};
//!
//! let module = build_module("CryptomonModule", |m| {
//!     let cryptomon = m.contract("Cryptomon", vec![]);
//!     ModuleResults::new().with(cryptomon)
//! })
//! .unwrap();
//!
//! assert!(module.result("cryptomon").is_some());
//! ```

use std::collections::{BTreeMap, HashSet};

use crate::contract::Token;
use crate::errors::{DeployError, Result};

/// Reference to a signer by position, resolved when the module executes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccountRef(pub usize);

/// A constructor argument as declared in a module
#[derive(Debug, Clone, PartialEq)]
pub enum Argument {
    /// Literal value
    Value(Token),
    /// Signer at the given index
    Account(AccountRef),
    /// Address of a contract deployed earlier in the same module
    Contract(String),
}

impl From<Token> for Argument {
    fn from(value: Token) -> Self {
        Argument::Value(value)
    }
}

impl From<AccountRef> for Argument {
    fn from(account: AccountRef) -> Self {
        Argument::Account(account)
    }
}

impl From<&ContractFuture> for Argument {
    fn from(future: &ContractFuture) -> Self {
        Argument::Contract(future.id.clone())
    }
}

/// Per-contract options
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContractOptions {
    /// Overrides the contract name in the future id
    pub id: Option<String>,
    /// Sender of the deployment; defaults to the first signer
    pub from: Option<AccountRef>,
}

/// Handle to a contract the module will deploy
#[derive(Debug, Clone, PartialEq)]
pub struct ContractFuture {
    /// `<moduleId>#<contractName or options.id>`
    pub id: String,
    pub contract_name: String,
    pub args: Vec<Argument>,
    pub from: Option<AccountRef>,
}

/// Named handles a module exposes to its callers
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModuleResults {
    entries: Vec<(String, ContractFuture)>,
}

impl ModuleResults {
    pub fn new() -> Self {
        Self::default()
    }

    /// Expose `future` under its lowercased contract name
    pub fn with(self, future: ContractFuture) -> Self {
        let key = future.contract_name.to_lowercase();
        self.with_named(&key, future)
    }

    /// Expose `future` under an explicit key
    pub fn with_named(mut self, key: &str, future: ContractFuture) -> Self {
        self.entries.push((key.to_string(), future));
        self
    }
}

/// Collects contract declarations while a module is being defined
#[derive(Debug)]
pub struct ModuleBuilder {
    module_id: String,
    futures: Vec<ContractFuture>,
}

impl ModuleBuilder {
    fn new(module_id: &str) -> Self {
        Self {
            module_id: module_id.to_string(),
            futures: Vec::new(),
        }
    }

    /// Declare a deployment of `contract_name` with `args`
    pub fn contract(&mut self, contract_name: &str, args: Vec<Argument>) -> ContractFuture {
        self.contract_with(contract_name, args, ContractOptions::default())
    }

    /// Declare a deployment with explicit options
    pub fn contract_with(
        &mut self,
        contract_name: &str,
        args: Vec<Argument>,
        options: ContractOptions,
    ) -> ContractFuture {
        let local_id = options.id.as_deref().unwrap_or(contract_name);
        let future = ContractFuture {
            id: format!("{}#{}", self.module_id, local_id),
            contract_name: contract_name.to_string(),
            args,
            from: options.from,
        };
        self.futures.push(future.clone());
        future
    }

    /// Signer at `index`, resolved at execution time
    pub fn get_account(&self, index: usize) -> AccountRef {
        AccountRef(index)
    }
}

/// A built module: ordered declarations plus exposed results
#[derive(Debug, Clone, PartialEq)]
pub struct DeploymentModule {
    id: String,
    futures: Vec<ContractFuture>,
    results: BTreeMap<String, ContractFuture>,
}

impl DeploymentModule {
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Declarations in the order they were made
    pub fn futures(&self) -> &[ContractFuture] {
        &self.futures
    }

    pub fn results(&self) -> &BTreeMap<String, ContractFuture> {
        &self.results
    }

    pub fn result(&self, key: &str) -> Option<&ContractFuture> {
        self.results.get(key)
    }
}

/// Define a module by running `define` against a fresh builder
///
/// Fails when the id is empty, two declarations share a future id, a
/// contract argument refers to a later or unknown future, or a result key
/// is repeated.
pub fn build_module<F>(id: &str, define: F) -> Result<DeploymentModule>
where
    F: FnOnce(&mut ModuleBuilder) -> ModuleResults,
{
    if id.is_empty() {
        return Err(DeployError::Module("module id cannot be empty".to_string()));
    }

    let mut builder = ModuleBuilder::new(id);
    let exposed = define(&mut builder);

    let mut seen = HashSet::new();
    for future in &builder.futures {
        for arg in &future.args {
            if let Argument::Contract(dependency) = arg {
                if !seen.contains(dependency.as_str()) {
                    return Err(DeployError::Module(format!(
                        "{} depends on {} which is not declared before it",
                        future.id, dependency
                    )));
                }
            }
        }

        if !seen.insert(future.id.as_str()) {
            return Err(DeployError::Module(format!("duplicate future id {}", future.id)));
        }
    }

    let mut results = BTreeMap::new();
    for (key, future) in exposed.entries {
        if !seen.contains(future.id.as_str()) {
            return Err(DeployError::Module(format!(
                "result {} refers to {} which belongs to another module",
                key, future.id
            )));
        }
        if results.insert(key.clone(), future).is_some() {
            return Err(DeployError::Module(format!("duplicate result key {}", key)));
        }
    }

    Ok(DeploymentModule {
        id: id.to_string(),
        futures: builder.futures,
        results,
    })
}
