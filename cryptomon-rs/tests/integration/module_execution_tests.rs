//! Integration tests for module execution
//!
//! Runs CryptomonModule through the executor and checks the deployment
//! journal written to disk.

use cryptomon_deploy::ignition::DEPLOYED_ADDRESSES_FILE;
use cryptomon_deploy::{
    cryptomon_module, verify_owner, Address, ContractArtifact, DeployError, ExecutionBackend,
    InMemoryBackend, ModuleExecutor,
};
use std::collections::BTreeMap;
use std::fs;
use std::sync::Arc;
use tempfile::TempDir;

fn deployer_owned_backend() -> Arc<InMemoryBackend> {
    let artifact = ContractArtifact::from_json(
        r#"{"contractName": "Cryptomon", "abi": [
            {"type": "function", "name": "owner", "inputs": [],
             "outputs": [{"name": "", "type": "address"}], "stateMutability": "view"}
        ]}"#,
    )
    .unwrap();
    Arc::new(InMemoryBackend::local().unwrap().with_artifact(artifact))
}

#[tokio::test]
async fn test_module_deployment_writes_journal() {
    let temp = TempDir::new().unwrap();
    let backend: Arc<dyn ExecutionBackend> = deployer_owned_backend();

    let result = ModuleExecutor::new(backend)
        .deploy(&cryptomon_module().unwrap())
        .await
        .unwrap();
    assert_eq!(result.module_id(), "CryptomonModule");
    assert_eq!(result.chain_id(), 31337);

    let path = result.write_deployed_addresses(temp.path()).unwrap();
    assert!(path.ends_with(format!("chain-31337/{}", DEPLOYED_ADDRESSES_FILE)));

    let written: BTreeMap<String, Address> =
        serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(
        written.get("CryptomonModule#Cryptomon"),
        Some(&result.get("cryptomon").unwrap().address())
    );
}

#[tokio::test]
async fn test_redeploying_module_overwrites_its_entry() {
    let temp = TempDir::new().unwrap();
    let backend: Arc<dyn ExecutionBackend> = deployer_owned_backend();
    let executor = ModuleExecutor::new(backend);
    let module = cryptomon_module().unwrap();

    let first = executor.deploy(&module).await.unwrap();
    first.write_deployed_addresses(temp.path()).unwrap();
    let second = executor.deploy(&module).await.unwrap();
    let path = second.write_deployed_addresses(temp.path()).unwrap();

    let written: BTreeMap<String, Address> =
        serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(written.len(), 1);
    assert_eq!(
        written["CryptomonModule#Cryptomon"],
        second.get("cryptomon").unwrap().address()
    );
    assert_ne!(
        first.get("cryptomon").unwrap().address(),
        second.get("cryptomon").unwrap().address()
    );
}

#[tokio::test]
async fn test_module_and_ownership_check_share_backend() {
    let memory = deployer_owned_backend();
    let backend: Arc<dyn ExecutionBackend> = memory.clone();

    let module_result = ModuleExecutor::new(Arc::clone(&backend))
        .deploy(&cryptomon_module().unwrap())
        .await
        .unwrap();
    assert!(module_result.get("cryptomon").is_some());

    // Deployer-owned constructor takes no arguments, so the explicit-owner
    // check is rejected on this backend.
    assert!(matches!(
        verify_owner(Arc::clone(&backend)).await,
        Err(DeployError::Deployment(_))
    ));

    // Owner-argument Cryptomon: the check passes, the module does not.
    memory.register_artifact(ContractArtifact::cryptomon().unwrap()).await;
    assert!(verify_owner(Arc::clone(&backend)).await.is_ok());
    assert!(ModuleExecutor::new(backend)
        .deploy(&cryptomon_module().unwrap())
        .await
        .is_err());

    assert_eq!(memory.block_number().await, 2);
}

#[tokio::test]
async fn test_module_without_signers() {
    let backend: Arc<dyn ExecutionBackend> = Arc::new(
        InMemoryBackend::new(31337, vec![]).with_artifact(ContractArtifact::cryptomon().unwrap()),
    );
    let result = ModuleExecutor::new(backend)
        .deploy(&cryptomon_module().unwrap())
        .await;
    assert!(matches!(result, Err(DeployError::NoSigners)));
}

#[test]
fn test_module_executes_from_blocking_context() {
    let backend: Arc<dyn ExecutionBackend> = deployer_owned_backend();
    let result = tokio_test::block_on(
        ModuleExecutor::new(backend).deploy(&cryptomon_module().unwrap()),
    )
    .unwrap();
    assert!(result.get("cryptomon").is_some());
}
