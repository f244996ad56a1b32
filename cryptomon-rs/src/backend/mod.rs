//! Execution backends
//!
//! Provides the abstract chain interface (ExecutionBackend trait) and implementations:
//! - InMemoryBackend: simulated ledger

mod memory;
mod traits;

pub use memory::InMemoryBackend;
pub use traits::{
    first_signer, signer_at, DeployRequest, Deployment, ExecutionBackend, TransactionReceipt,
    DEFAULT_CHAIN_ID,
};
