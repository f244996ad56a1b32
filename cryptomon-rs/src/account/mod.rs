//! Account identities: addresses and signers

mod address;
mod signer;

pub use address::{checksummed, parse_address};
pub use ethers_core::types::Address;
pub use signer::{default_signers, Account, DEFAULT_SIGNER_ADDRESSES};
