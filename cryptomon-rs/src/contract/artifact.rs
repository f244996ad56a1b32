//! Compiled contract artifacts
//!
//! Artifacts follow the Hardhat JSON layout (`contractName`, `abi`,
//! `bytecode`). Only the ABI is interpreted: it fixes the constructor
//! signature and the set of callable accessors. Bytecode is carried but never
//! executed.

use ethers_core::abi::{Abi, Function, Param, ParamType, StateMutability};
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::account::Address;
use crate::errors::{DeployError, Result};

const CRYPTOMON_ARTIFACT_JSON: &str = include_str!("../../artifacts/Cryptomon.json");

/// How a deployed contract's `owner` is assigned at construction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OwnerModel {
    /// `constructor(address initialOwner)`: owner is the argument at `index`
    ConstructorArgument { index: usize },
    /// Owner is whoever sent the deployment transaction
    Deployer,
    /// Owner is baked into the contract and ignores the constructor
    Fixed(Address),
}

/// A compiled contract as produced by the build toolchain
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractArtifact {
    #[serde(rename = "_format", default)]
    pub format: Option<String>,
    pub contract_name: String,
    #[serde(default)]
    pub source_name: Option<String>,
    #[serde(deserialize_with = "deserialize_abi")]
    pub abi: Abi,
    #[serde(default)]
    pub bytecode: String,
    #[serde(skip)]
    fixed_owner: Option<Address>,
}

/// Parse an ABI, filling in the defaults of older compiler output
///
/// Entries without `type` are functions. Functions without
/// `stateMutability` derive it from the pre-0.5 `constant`/`payable` flags.
fn deserialize_abi<'de, D>(deserializer: D) -> std::result::Result<Abi, D::Error>
where
    D: Deserializer<'de>,
{
    let mut entries = Vec::<Value>::deserialize(deserializer)?;

    for entry in entries.iter_mut() {
        let Some(item) = entry.as_object_mut() else {
            continue;
        };

        item.entry("type").or_insert_with(|| Value::from("function"));
        if item.get("type").and_then(Value::as_str) != Some("function") {
            continue;
        }

        item.entry("inputs").or_insert_with(|| Value::Array(Vec::new()));
        item.entry("outputs").or_insert_with(|| Value::Array(Vec::new()));
        if !item.contains_key("stateMutability") {
            let flag = |key: &str| item.get(key).and_then(Value::as_bool).unwrap_or(false);
            let mutability = if flag("constant") {
                "view"
            } else if flag("payable") {
                "payable"
            } else {
                "nonpayable"
            };
            item.insert("stateMutability".to_string(), Value::from(mutability));
        }
    }

    serde_json::from_value(Value::Array(entries)).map_err(serde::de::Error::custom)
}

fn is_read_only(function: &Function) -> bool {
    matches!(
        function.state_mutability,
        StateMutability::View | StateMutability::Pure
    )
}

impl ContractArtifact {
    /// Parse an artifact from its JSON text
    pub fn from_json(json: &str) -> Result<Self> {
        let artifact: ContractArtifact = serde_json::from_str(json)?;
        artifact.validate()?;
        Ok(artifact)
    }

    /// Load a single artifact file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(DeployError::FileNotFound(path.to_string_lossy().to_string()));
        }

        let content = fs::read_to_string(path)?;
        Self::from_json(&content).map_err(|e| {
            DeployError::Artifact(format!("Invalid artifact {}: {}", path.display(), e))
        })
    }

    /// Load every artifact under `dir`
    ///
    /// Walks the directory recursively, skipping `*.dbg.json` debug files and
    /// JSON documents that are not contract artifacts (build-info, caches).
    /// Two artifacts sharing a `contractName` make the name ambiguous and
    /// fail the load.
    pub fn load_dir<P: AsRef<Path>>(dir: P) -> Result<Vec<Self>> {
        let dir = dir.as_ref();
        if !dir.exists() {
            return Err(DeployError::FileNotFound(dir.to_string_lossy().to_string()));
        }

        let mut artifacts = Vec::new();
        let mut seen: HashMap<String, PathBuf> = HashMap::new();
        for entry in walkdir::WalkDir::new(dir).sort_by_file_name() {
            let entry = entry.map_err(|e| DeployError::Artifact(e.to_string()))?;
            let path = entry.path();

            let file_name = path.file_name().and_then(|s| s.to_str()).unwrap_or("");
            if !file_name.ends_with(".json") || file_name.ends_with(".dbg.json") {
                continue;
            }

            let content = fs::read_to_string(path)?;
            let value: Value = serde_json::from_str(&content)?;
            if value.get("contractName").is_none() || value.get("abi").is_none() {
                debug!(path = %path.display(), "skipping non-artifact json");
                continue;
            }

            let artifact = Self::load(path)?;
            if let Some(first) = seen.get(&artifact.contract_name) {
                return Err(DeployError::Artifact(format!(
                    "contract name {} is ambiguous: {} and {}",
                    artifact.contract_name,
                    first.display(),
                    path.display()
                )));
            }
            seen.insert(artifact.contract_name.clone(), path.to_path_buf());
            artifacts.push(artifact);
        }

        Ok(artifacts)
    }

    /// The bundled `Cryptomon` artifact
    pub fn cryptomon() -> Result<Self> {
        Self::from_json(CRYPTOMON_ARTIFACT_JSON)
    }

    /// Pin the owner to `owner` regardless of constructor arguments
    pub fn with_fixed_owner(mut self, owner: Address) -> Self {
        self.fixed_owner = Some(owner);
        self
    }

    fn validate(&self) -> Result<()> {
        if self.contract_name.is_empty() {
            return Err(DeployError::Artifact("contractName cannot be empty".to_string()));
        }
        Ok(())
    }

    /// Constructor inputs (empty when the ABI declares no constructor)
    pub fn constructor_inputs(&self) -> &[Param] {
        self.abi
            .constructor()
            .map(|constructor| constructor.inputs.as_slice())
            .unwrap_or(&[])
    }

    pub fn constructor_arity(&self) -> usize {
        self.constructor_inputs().len()
    }

    /// Look up a function by name (first overload)
    pub fn function(&self, name: &str) -> Option<&Function> {
        self.abi
            .functions_by_name(name)
            .ok()
            .and_then(|overloads| overloads.first())
    }

    /// Names of the read-only functions (`view`/`pure`, or legacy `constant`)
    pub fn view_functions(&self) -> Vec<&str> {
        self.abi
            .functions()
            .filter(|function| is_read_only(function))
            .map(|function| function.name.as_str())
            .collect()
    }

    /// Whether `name` is a zero-argument read-only function
    pub fn has_accessor(&self, name: &str) -> bool {
        self.abi
            .functions_by_name(name)
            .map(|overloads| {
                overloads
                    .iter()
                    .any(|function| function.inputs.is_empty() && is_read_only(function))
            })
            .unwrap_or(false)
    }

    /// Owner assignment derived from the ABI
    ///
    /// A pinned owner wins; otherwise the first `address` constructor input
    /// is the owner, and without one the deployer owns the contract.
    pub fn owner_model(&self) -> OwnerModel {
        if let Some(owner) = self.fixed_owner {
            return OwnerModel::Fixed(owner);
        }

        self.constructor_inputs()
            .iter()
            .position(|param| param.kind == ParamType::Address)
            .map(|index| OwnerModel::ConstructorArgument { index })
            .unwrap_or(OwnerModel::Deployer)
    }
}
