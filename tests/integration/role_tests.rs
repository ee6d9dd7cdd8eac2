//! Role lifecycle against a live agent.

use anyhow::{Context, Result};
use consul_acl::types::{Role, ServiceIdentity};
use consul_acl::{Consistency, QueryOptions};

use crate::common::{unique_name, validate_environment};

#[tokio::test]
async fn test_role_lifecycle() -> Result<()> {
    let client = validate_environment().await?;
    let roles = client.acl().roles();
    let consistent = QueryOptions::new().with_consistency(Consistency::Consistent);

    let role = Role::new(unique_name("lifecycle"))
        .with_service_identity(ServiceIdentity::new("web").with_datacenter("dc1"));
    let (created, _) = roles.create(&role, None).await?;

    let (by_id, _) = roles.read(&created.id, Some(&consistent)).await?;
    assert_eq!(by_id.context("role missing by ID")?.name, created.name);

    let (by_name, _) = roles.read_by_name(&created.name, Some(&consistent)).await?;
    assert_eq!(by_name.context("role missing by name")?.id, created.id);

    roles.delete(&created.id, None).await?;
    let (gone, _) = roles.read(&created.id, Some(&consistent)).await?;
    assert!(gone.is_none());
    Ok(())
}

#[tokio::test]
async fn test_missing_role_is_none() -> Result<()> {
    let client = validate_environment().await?;
    let (role, _) = client
        .acl()
        .roles()
        .read("00000000-0000-0000-0000-00000000dead", None)
        .await?;
    assert!(role.is_none());
    Ok(())
}
