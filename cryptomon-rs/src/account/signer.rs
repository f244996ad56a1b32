//! Signer accounts

use serde::{Deserialize, Serialize};
use std::fmt;

use ethers_core::abi::Token;

use crate::account::{checksummed, parse_address, Address};
use crate::errors::Result;

/// Well-known local development accounts, in signer order
///
/// Index 0 is the conventional deployer/owner.
pub const DEFAULT_SIGNER_ADDRESSES: [&str; 10] = [
    "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266",
    "0x70997970C51812dc3A010C7d01b50e0d17dc79C8",
    "0x3C44CdDdB6a900fa2b585dd299e03d12FA4293BC",
    "0x90F79bf6EB2c4f870365E785982E1f101E93b906",
    "0x15d34AAf54267DB7D7c367839AAf71A00a2C6A65",
    "0x9965507D1a55bcC2695C58ba16FB37d819B0A4dc",
    "0x976EA74026E726554dB657fA54763abd0C3a0aa9",
    "0x14dC79964da2C08b23698B3D3cc7Ca32193d9955",
    "0x23618e81E3f5cdF7f54C3d65f7FBc0aBf5B21E8f",
    "0xa0Ee7A142d267C1f36714E4a8F75612F20a79720",
];

/// An identity able to authorize deployments and transactions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Account {
    address: Address,
}

impl Account {
    pub fn new(address: Address) -> Self {
        Self { address }
    }

    pub fn parse(value: &str) -> Result<Self> {
        Ok(Self::new(parse_address(value)?))
    }

    pub fn address(&self) -> Address {
        self.address
    }
}

impl From<Address> for Account {
    fn from(address: Address) -> Self {
        Account::new(address)
    }
}

impl PartialEq<Address> for Account {
    fn eq(&self, other: &Address) -> bool {
        self.address == *other
    }
}

impl From<Account> for Token {
    fn from(account: Account) -> Self {
        Token::Address(account.address)
    }
}

/// Renders the EIP-55 checksummed address
impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&checksummed(&self.address))
    }
}

/// The default signer set of a local development network
pub fn default_signers() -> Result<Vec<Account>> {
    DEFAULT_SIGNER_ADDRESSES
        .iter()
        .map(|raw| Account::parse(raw))
        .collect()
}
