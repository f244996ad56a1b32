//! Contract artifacts, factories, and deployed instances
//!
//! Constructor arguments and accessor results are `ethers_core::abi::Token`
//! values, type-checked against the artifact ABI.

mod artifact;
mod factory;
mod instance;

pub use artifact::{ContractArtifact, OwnerModel};
pub use ethers_core::abi::Token;
pub use factory::{get_contract_factory, ContractFactory};
pub use instance::ContractInstance;
