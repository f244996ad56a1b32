// Ownership Contract Tests
//
// These tests verify that a freshly deployed Cryptomon reports, through its
// owner() accessor, exactly the account passed as its constructor argument.

use cryptomon_deploy::{
    default_signers, verify_owner, verify_owner_with, Address, ContractArtifact,
    DeployError, ExecutionBackend, InMemoryBackend,
};
use std::sync::Arc;

fn local() -> Arc<dyn ExecutionBackend> {
    Arc::new(InMemoryBackend::local().unwrap())
}

fn with_artifact(artifact: ContractArtifact) -> Arc<dyn ExecutionBackend> {
    Arc::new(InMemoryBackend::local().unwrap().with_artifact(artifact))
}

/// WHY: owner() must equal the first signer after deploy(owner)
/// BREAKS: Every access-controlled Cryptomon operation
#[tokio::test]
async fn owner_is_first_signer() -> anyhow::Result<()> {
    let backend = local();
    let owner = backend.get_signers().await?[0];

    let report = verify_owner(backend).await?;
    assert_eq!(report.owner, owner);
    assert_eq!(report.contract.owner().await?, owner);
    Ok(())
}

/// WHY: The check must follow the constructor argument, not the sender
/// REASON: deploy(accounts[1]) is sent by accounts[0] but owned by accounts[1]
/// BREAKS: Check passes for contracts that take msg.sender as owner
#[tokio::test]
async fn owner_follows_constructor_argument() -> anyhow::Result<()> {
    let backend = local();
    let signers = backend.get_signers().await?;

    let report = verify_owner_with(backend, 1).await?;
    assert_eq!(report.owner, signers[1]);
    assert_ne!(report.owner, signers[0]);
    assert_eq!(report.receipt().from, signers[0].address());
    Ok(())
}

/// WHY: Holds for every signer, not just index 0
#[tokio::test]
async fn owner_matches_for_every_signer() {
    let signers = default_signers().unwrap();
    for index in 0..signers.len() {
        let report = verify_owner_with(local(), index).await.unwrap();
        assert_eq!(report.owner, signers[index], "signer {}", index);
    }
}

/// WHY: A contract ignoring its constructor argument must FAIL the check
/// BREAKS: Check only compares types, silently passing a hardcoded owner
#[tokio::test]
async fn hardcoded_owner_fails_check() {
    let hardcoded = Address::from_low_u64_be(0xc0de);
    let backend = with_artifact(ContractArtifact::cryptomon().unwrap().with_fixed_owner(hardcoded));

    match verify_owner(backend).await {
        Err(DeployError::OwnerMismatch { expected, actual }) => {
            assert_eq!(expected, default_signers().unwrap()[0].address());
            assert_eq!(actual, hardcoded);
        }
        other => panic!("expected OwnerMismatch, got {:?}", other.map(|r| r.owner)),
    }
}

/// WHY: Hardcoding the first signer passes for index 0 only
/// REASON: Sensitivity to owner identity shows up as soon as another signer is used
#[tokio::test]
async fn hardcoded_first_signer_is_caught_by_second_signer() {
    let first = default_signers().unwrap()[0];
    let artifact = ContractArtifact::cryptomon().unwrap().with_fixed_owner(first.address());

    assert!(verify_owner(with_artifact(artifact.clone())).await.is_ok());
    assert!(matches!(
        verify_owner_with(with_artifact(artifact), 1).await,
        Err(DeployError::OwnerMismatch { .. })
    ));
}

/// WHY: Artifacts from pre-0.5 compilers mark accessors `constant`, not `view`
/// BREAKS: Only `stateMutability` is read and `owner()` looks missing
#[tokio::test]
async fn legacy_abi_owner_accessor_is_callable() {
    let legacy = ContractArtifact::from_json(
        r#"{"contractName": "Cryptomon", "abi": [
            {"inputs": [{"name": "initialOwner", "type": "address"}],
             "payable": false, "type": "constructor"},
            {"constant": true, "inputs": [], "name": "owner",
             "outputs": [{"name": "", "type": "address"}], "payable": false}
        ]}"#,
    )
    .unwrap();

    let report = verify_owner(with_artifact(legacy)).await.unwrap();
    assert_eq!(report.owner, default_signers().unwrap()[0]);
}

/// WHY: Zero configured accounts is an error, never an undefined owner
#[tokio::test]
async fn zero_signers_is_an_error() {
    let backend: Arc<dyn ExecutionBackend> = Arc::new(
        InMemoryBackend::new(31337, vec![]).with_artifact(ContractArtifact::cryptomon().unwrap()),
    );

    assert!(matches!(verify_owner(backend).await, Err(DeployError::NoSigners)));
}

/// WHY: Independent runs on fresh backends give the same outcome
#[tokio::test]
async fn rerun_on_fresh_backend_is_idempotent() {
    let first = verify_owner(local()).await.unwrap();
    let second = verify_owner(local()).await.unwrap();

    assert_eq!(first.owner, second.owner);
    assert_eq!(first.contract.address(), second.contract.address());
    assert_eq!(first.receipt().block_number, second.receipt().block_number);

    let hardcoded = ContractArtifact::cryptomon()
        .unwrap()
        .with_fixed_owner(Address::from_low_u64_be(7));
    for _ in 0..2 {
        assert!(verify_owner(with_artifact(hardcoded.clone())).await.is_err());
    }
}

/// WHY: Failures propagate with their own kind; nothing is swallowed
#[tokio::test]
async fn failures_propagate_uncaught() {
    let signers = default_signers().unwrap();

    // Unknown contract
    let empty: Arc<dyn ExecutionBackend> = Arc::new(InMemoryBackend::new(31337, signers.clone()));
    assert!(matches!(verify_owner(empty).await, Err(DeployError::NotFound(_))));

    // Constructor without an owner parameter rejects the explicit argument
    let no_args = ContractArtifact::from_json(
        r#"{"contractName": "Cryptomon", "abi": [
            {"type": "function", "name": "owner", "inputs": [],
             "outputs": [{"name": "", "type": "address"}], "stateMutability": "view"}
        ]}"#,
    )
    .unwrap();
    assert!(matches!(
        verify_owner(with_artifact(no_args)).await,
        Err(DeployError::Deployment(_))
    ));

    // No owner() accessor
    let no_accessor = ContractArtifact::from_json(
        r#"{"contractName": "Cryptomon", "abi": [
            {"type": "constructor", "inputs": [{"name": "initialOwner", "type": "address"}]}
        ]}"#,
    )
    .unwrap();
    assert!(matches!(
        verify_owner(with_artifact(no_accessor)).await,
        Err(DeployError::Call(_))
    ));

    // Signer index past the end
    assert!(matches!(
        verify_owner_with(local(), signers.len()).await,
        Err(DeployError::SignerOutOfRange { .. })
    ));
}
