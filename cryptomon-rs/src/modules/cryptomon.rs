//! Cryptomon deployment module
//!
//! Declares a single `Cryptomon` deployment with no constructor arguments,
//! exposed as `cryptomon`. The owner is whatever the contract derives from
//! the deploying account; nothing is injected on its behalf.

use crate::errors::Result;
use crate::ignition::{build_module, DeploymentModule, ModuleResults};

pub const MODULE_ID: &str = "CryptomonModule";
pub const CONTRACT_NAME: &str = "Cryptomon";
pub const RESULT_KEY: &str = "cryptomon";

pub fn cryptomon_module() -> Result<DeploymentModule> {
    build_module(MODULE_ID, |m| {
        let cryptomon = m.contract(CONTRACT_NAME, vec![]);
        ModuleResults::new().with(cryptomon)
    })
}
