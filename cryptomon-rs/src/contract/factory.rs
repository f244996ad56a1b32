//! Contract factories

use std::sync::Arc;
use tracing::debug;

use crate::account::Account;
use crate::backend::{first_signer, DeployRequest, ExecutionBackend};
use crate::contract::{ContractArtifact, ContractInstance, Token};
use crate::errors::Result;

/// Produces new instances of one compiled contract
///
/// Deploys from the connected signer, or from the backend's first signer
/// when none is connected.
#[derive(Clone)]
pub struct ContractFactory {
    backend: Arc<dyn ExecutionBackend>,
    artifact: ContractArtifact,
    signer: Option<Account>,
}

/// Resolve the factory for `contract_name`
///
/// Fails with `DeployError::NotFound` when the backend has no such artifact.
pub async fn get_contract_factory(
    backend: Arc<dyn ExecutionBackend>,
    contract_name: &str,
) -> Result<ContractFactory> {
    let artifact = backend.artifact(contract_name).await?;
    debug!(
        contract = contract_name,
        arity = artifact.constructor_arity(),
        "contract factory resolved"
    );
    Ok(ContractFactory {
        backend,
        artifact,
        signer: None,
    })
}

impl ContractFactory {
    pub fn artifact(&self) -> &ContractArtifact {
        &self.artifact
    }

    /// Deploy from `signer` instead of the default
    pub fn connect(mut self, signer: Account) -> Self {
        self.signer = Some(signer);
        self
    }

    /// Deploy a new instance with `args` as constructor arguments
    pub async fn deploy(&self, args: Vec<Token>) -> Result<ContractInstance> {
        let from = match self.signer {
            Some(signer) => signer,
            None => first_signer(self.backend.as_ref()).await?,
        };

        let deployment = self
            .backend
            .deploy(DeployRequest {
                contract_name: self.artifact.contract_name.clone(),
                args,
                from,
            })
            .await?;

        Ok(ContractInstance::new(
            Arc::clone(&self.backend),
            self.artifact.contract_name.clone(),
            deployment.address,
            deployment.receipt,
        ))
    }
}
