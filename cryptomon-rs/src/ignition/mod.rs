//! Declarative deployment modules and their execution

pub mod executor;
pub mod module;

pub use executor::{DeploymentResult, ModuleExecutor, DEPLOYED_ADDRESSES_FILE};
pub use module::{
    build_module, AccountRef, Argument, ContractFuture, ContractOptions, DeploymentModule,
    ModuleBuilder, ModuleResults,
};
