/**
 * network.rs
 * Parser for network config files (YAML format)
 *
 * Format:
 * ```yaml
 * apiVersion: cryptomon/v1
 * kind: Network
 * metadata:
 *   name: hardhat
 * spec:
 *   chainId: 31337
 *   accounts:
 *     - "0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266"
 *   artifactsDir: artifacts
 * ```
 */

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::account::{default_signers, Account};
use crate::backend::DEFAULT_CHAIN_ID;
use crate::errors::DeployError;

pub const API_VERSION: &str = "cryptomon/v1";
pub const KIND: &str = "Network";

/// Default config file name looked up in a project root
pub const CONFIG_FILE_NAME: &str = "network.yaml";

/// Network config document
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NetworkConfig {
    pub api_version: String,
    pub kind: String,
    pub metadata: Metadata,
    pub spec: Spec,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Metadata {
    pub name: String,
}

/// Network specification
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Spec {
    /// Defaults to the local development chain id
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chain_id: Option<u64>,
    /// Signer addresses in order; omitted means the default local signers.
    /// An explicit empty list is a network with no signers.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accounts: Option<Vec<String>>,
    /// Directory of compiled artifacts
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artifacts_dir: Option<PathBuf>,
}

impl NetworkConfig {
    /// Load a network config from `path`
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, DeployError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(DeployError::FileNotFound(path.to_string_lossy().to_string()));
        }

        let content = fs::read_to_string(path)?;

        let config: NetworkConfig = serde_yaml::from_str(&content)
            .map_err(|e| DeployError::Config(format!("Invalid network YAML: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    /// Load `network.yaml` from a project root
    pub fn load_from_project<P: AsRef<Path>>(project_root: P) -> Result<Self, DeployError> {
        Self::load(project_root.as_ref().join(CONFIG_FILE_NAME))
    }

    /// Validate document header, name, and account addresses
    pub fn validate(&self) -> Result<(), DeployError> {
        if self.api_version != API_VERSION {
            return Err(DeployError::Config(format!(
                "Invalid apiVersion: expected '{}', got '{}'",
                API_VERSION, self.api_version
            )));
        }

        if self.kind != KIND {
            return Err(DeployError::Config(format!(
                "Invalid kind: expected '{}', got '{}'",
                KIND, self.kind
            )));
        }

        if self.metadata.name.is_empty() {
            return Err(DeployError::Config("metadata.name cannot be empty".to_string()));
        }

        if self.spec.chain_id == Some(0) {
            return Err(DeployError::Config("spec.chainId must be non-zero".to_string()));
        }

        self.accounts()?;

        Ok(())
    }

    /// Save config to `path`
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), DeployError> {
        let yaml = serde_yaml::to_string(self)?;
        fs::write(path.as_ref(), yaml)?;
        Ok(())
    }

    /// Config for a local development network with default signers
    pub fn local(name: &str) -> Self {
        NetworkConfig {
            api_version: API_VERSION.to_string(),
            kind: KIND.to_string(),
            metadata: Metadata {
                name: name.to_string(),
            },
            spec: Spec {
                chain_id: None,
                accounts: None,
                artifacts_dir: None,
            },
        }
    }

    pub fn chain_id(&self) -> u64 {
        self.spec.chain_id.unwrap_or(DEFAULT_CHAIN_ID)
    }

    /// Configured signers, parsed, in order
    pub fn accounts(&self) -> Result<Vec<Account>, DeployError> {
        match &self.spec.accounts {
            Some(raw) => raw.iter().map(|a| Account::parse(a)).collect(),
            None => default_signers(),
        }
    }
}
