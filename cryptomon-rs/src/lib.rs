//! # Cryptomon Deploy
//!
//! Deployment module and ownership verification for the `Cryptomon`
//! contract.
//!
//! ## Two deployment paths
//!
//! - **Module** (`modules::cryptomon`): declares `Cryptomon` with zero
//!   constructor arguments under the handle `cryptomon`, executed by
//!   `ignition::ModuleExecutor` from the first signer.
//! - **Ownership check** (`ownership`): deploys through a contract factory
//!   with the first signer passed explicitly as owner, then asserts the
//!   contract's `owner()` returns that signer.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────┐   ┌──────────────────┐
//! │ CryptomonModule  │   │  OwnershipCheck  │
//! │ (declarative)    │   │  (factory)       │
//! └────────┬─────────┘   └────────┬─────────┘
//!          │                      │
//!          ▼                      ▼
//! ┌─────────────────────────────────────────┐
//! │   ExecutionBackend (async, sequential)  │
//! │   get_signers / deploy / call           │
//! └─────────────────────────────────────────┘
//! ```

pub mod account;
pub mod backend;
pub mod config;
pub mod contract;
pub mod errors;
pub mod ignition;
pub mod modules;
pub mod ownership;
pub mod telemetry;

pub use account::{default_signers, Account, Address};
pub use backend::{ExecutionBackend, InMemoryBackend, TransactionReceipt, DEFAULT_CHAIN_ID};
pub use config::NetworkConfig;
pub use contract::{get_contract_factory, ContractArtifact, ContractFactory, ContractInstance, Token};
pub use errors::{DeployError, Result};
pub use ignition::{build_module, DeploymentModule, DeploymentResult, ModuleExecutor, ModuleResults};
pub use modules::cryptomon_module;
pub use ownership::{deploy_cryptomon, verify_owner, verify_owner_with, OwnershipReport};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
