//! Address parsing and rendering
//!
//! Addresses are `ethers_core::types::Address`; this module only adds the
//! strict textual form accepted in configs and the checksummed rendering.

use ethers_core::types::Address;
use ethers_core::utils::to_checksum;
use std::str::FromStr;

use crate::errors::{DeployError, Result};

/// Parse a `0x`-prefixed, 40 hex digit address (any letter case)
///
/// # Example
///
/// ```
/// use cryptomon_deploy::account::parse_address;
///
/// let addr = parse_address("0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266").unwrap();
/// assert_eq!(format!("{:?}", addr), "0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266");
/// ```
pub fn parse_address(value: &str) -> Result<Address> {
    let digits = value
        .strip_prefix("0x")
        .or_else(|| value.strip_prefix("0X"))
        .ok_or_else(|| DeployError::InvalidAddress(value.to_string()))?;

    if digits.len() != 2 * Address::len_bytes() {
        return Err(DeployError::InvalidAddress(value.to_string()));
    }

    Address::from_str(digits).map_err(|e| DeployError::InvalidAddress(format!("{}: {}", value, e)))
}

/// EIP-55 mixed-case rendering
pub fn checksummed(address: &Address) -> String {
    to_checksum(address, None)
}
