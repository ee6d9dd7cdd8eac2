//! Token lifecycle against a live agent.

use anyhow::Result;
use consul_acl::types::{Policy, PolicyLink, Token};
use consul_acl::{Consistency, ErrorKind, QueryOptions};

use crate::common::{unique_name, validate_environment};

#[tokio::test]
async fn test_create_read_round_trip() -> Result<()> {
    let client = validate_environment().await?;
    let tokens = client.acl().tokens();

    let (created, _) = tokens
        .create(&Token::new().with_description(unique_name("round-trip")), None)
        .await?;
    assert!(!created.accessor_id.is_empty());
    assert!(!created.secret_id.is_empty());
    assert!(created.create_index > 0);

    let consistent = QueryOptions::new().with_consistency(Consistency::Consistent);
    let (read, meta) = tokens.read(&created.accessor_id, Some(&consistent)).await?;
    assert_eq!(read.accessor_id, created.accessor_id);
    assert_eq!(read.secret_id, created.secret_id);
    assert_eq!(read.description, created.description);
    assert_eq!(read.hash, created.hash);
    assert!(meta.last_index >= created.create_index);

    tokens.delete(&created.accessor_id, None).await?;
    Ok(())
}

#[tokio::test]
async fn test_list_never_carries_secrets() -> Result<()> {
    let client = validate_environment().await?;
    let acl = client.acl();

    let (policy, _) = acl
        .policies()
        .create(&Policy::new(unique_name("list-filter"), ""), None)
        .await?;
    let (token, _) = acl
        .tokens()
        .create(&Token::new().with_policy(PolicyLink::by_id(&policy.id)), None)
        .await?;

    let (listed, _) = acl.tokens().list().policy(&policy.id).await?;
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].accessor_id, token.accessor_id);

    acl.tokens().delete(&token.accessor_id, None).await?;
    acl.policies().delete(&policy.id, None).await?;
    Ok(())
}

#[tokio::test]
async fn test_delete_then_read_is_error() -> Result<()> {
    let client = validate_environment().await?;
    let tokens = client.acl().tokens();

    let (created, _) = tokens.create(&Token::new(), None).await?;
    tokens.delete(&created.accessor_id, None).await?;

    let consistent = QueryOptions::new().with_consistency(Consistency::Consistent);
    let err = tokens
        .read(&created.accessor_id, Some(&consistent))
        .await
        .err()
        .ok_or_else(|| anyhow::anyhow!("deleted token is still readable"))?;
    assert!(err.is_server_error() || err.kind() == ErrorKind::NotFound);
    assert!(!err.is_precondition());
    Ok(())
}

#[tokio::test]
async fn test_clone() -> Result<()> {
    let client = validate_environment().await?;
    let tokens = client.acl().tokens();

    let (original, _) = tokens.create(&Token::new(), None).await?;
    let (copy, _) = tokens
        .clone_token(&original.accessor_id, "cloned", None)
        .await?;
    assert_ne!(copy.accessor_id, original.accessor_id);
    assert_eq!(copy.description, "cloned");

    tokens.delete(&copy.accessor_id, None).await?;
    tokens.delete(&original.accessor_id, None).await?;
    Ok(())
}

#[tokio::test]
async fn test_create_with_accessor_sends_nothing() -> Result<()> {
    let client = validate_environment().await?;
    let token = Token {
        accessor_id: "6a1253d2-1785-24fd-91c2-f8e78c745511".into(),
        ..Token::new()
    };
    let err = client
        .acl()
        .tokens()
        .create(&token, None)
        .await
        .err()
        .ok_or_else(|| anyhow::anyhow!("create with accessor succeeded"))?;
    assert!(err.is_precondition());
    Ok(())
}
