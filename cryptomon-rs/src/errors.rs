//! Error types for Cryptomon deployment

use thiserror::Error;

use crate::account::Address;

#[derive(Error, Debug)]
pub enum DeployError {
    #[error("Contract not found: {0}")]
    NotFound(String),

    #[error("Deployment error: {0}")]
    Deployment(String),

    #[error("Call error: {0}")]
    Call(String),

    #[error("Owner mismatch: expected {expected:?}, got {actual:?}")]
    OwnerMismatch { expected: Address, actual: Address },

    #[error("No signers configured")]
    NoSigners,

    #[error("Signer index {index} out of range ({available} configured)")]
    SignerOutOfRange { index: usize, available: usize },

    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    #[error("Module error: {0}")]
    Module(String),

    #[error("Artifact error: {0}")]
    Artifact(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, DeployError>;
