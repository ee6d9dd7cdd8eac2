//! Identity provider lifecycle against a live agent.

use anyhow::{Context, Result};
use consul_acl::types::IdentityProvider;

use crate::common::{KubernetesEnv, unique_name, validate_environment};

#[tokio::test]
async fn test_identity_provider_lifecycle() -> Result<()> {
    let Some(k8s) = KubernetesEnv::from_env() else {
        eprintln!("skipping: K8S_* variables not set");
        return Ok(());
    };
    let client = validate_environment().await?;
    let idps = client.acl().identity_providers();

    let name = unique_name("k8s");
    let idp = IdentityProvider::kubernetes(&name, k8s.host, k8s.ca_cert, k8s.reviewer_jwt);
    let (created, _) = idps.create(&idp, None).await?;
    assert_eq!(created.name, name);
    assert!(created.create_index > 0);

    let (read, _) = idps.read(&name, None).await?;
    assert_eq!(read.context("provider missing")?.kind, created.kind);

    let (listed, _) = idps.list(None).await?;
    assert!(listed.iter().any(|entry| entry.name == name));

    idps.delete(&name, None).await?;
    let (gone, _) = idps.read(&name, None).await?;
    assert!(gone.is_none());
    Ok(())
}

#[tokio::test]
async fn test_missing_identity_provider_is_none() -> Result<()> {
    let client = validate_environment().await?;
    let (idp, _) = client
        .acl()
        .identity_providers()
        .read(&unique_name("absent"), None)
        .await?;
    assert!(idp.is_none());
    Ok(())
}
