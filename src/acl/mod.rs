//! ACL endpoints.
//!
//! ## API Hierarchy
//!
//! ```rust,no_run
//! # async fn example(client: consul_acl::Client) -> Result<(), consul_acl::Error> {
//! let acl = client.acl();
//!
//! // Per-resource clients
//! let tokens = acl.tokens();
//! let policies = acl.policies();
//! let roles = acl.roles();
//! let identity_providers = acl.identity_providers();
//! let binding_rules = acl.binding_rules();
//!
//! // One-shot operations
//! let (status, _) = acl.replication(None).await?;
//! # let _ = (tokens, policies, roles, identity_providers, binding_rules, status);
//! # Ok(())
//! # }
//! ```
//!
//! Every resource follows one lifecycle:
//!
//! - `create`: rejects a resource whose agent-assigned key is already set
//! - `update`: rejects a resource whose key is empty
//! - `delete`, `read`: reject an empty key
//! - `list`: returns the reduced list projection
//!
//! Rejected calls fail with [`ErrorKind::Precondition`] and never reach
//! the network.
//!
//! [`ErrorKind::Precondition`]: crate::ErrorKind::Precondition

mod binding_rules;
mod identity_providers;
mod legacy;
mod lifecycle;
mod policies;
mod resource;
mod roles;
mod rules;
mod tokens;

pub use binding_rules::{BindingRulesClient, ListBindingRulesRequest};
pub use identity_providers::IdentityProvidersClient;
pub use legacy::LegacyClient;
pub use policies::PoliciesClient;
pub use roles::RolesClient;
pub use rules::RulesClient;
pub use tokens::{ListTokensRequest, TokensClient};

use crate::Error;
use crate::client::Client;
use crate::protocol::{QueryMeta, QueryOptions, Request, WriteMeta, WriteOptions};
use crate::types::{LoginParams, ReplicationStatus, Token};

/// Client for the ACL endpoints.
///
/// Access via `client.acl()`.
#[derive(Clone)]
pub struct AclClient {
    client: Client,
}

impl AclClient {
    /// Creates a new ACL client.
    pub(crate) fn new(client: Client) -> Self {
        Self { client }
    }

    /// Token operations.
    pub fn tokens(&self) -> TokensClient {
        TokensClient::new(self.client.clone())
    }

    /// Policy operations.
    pub fn policies(&self) -> PoliciesClient {
        PoliciesClient::new(self.client.clone())
    }

    /// Role operations.
    pub fn roles(&self) -> RolesClient {
        RolesClient::new(self.client.clone())
    }

    /// Identity provider operations.
    pub fn identity_providers(&self) -> IdentityProvidersClient {
        IdentityProvidersClient::new(self.client.clone())
    }

    /// Role binding rule operations.
    pub fn binding_rules(&self) -> BindingRulesClient {
        BindingRulesClient::new(self.client.clone())
    }

    /// Legacy rule translation.
    #[deprecated(note = "rule translation only exists to migrate legacy tokens")]
    pub fn rules(&self) -> RulesClient {
        RulesClient::new(self.client.clone())
    }

    /// Legacy single-type token operations.
    #[deprecated(note = "legacy tokens are superseded by `tokens()`")]
    pub fn legacy(&self) -> LegacyClient {
        LegacyClient::new(self.client.clone())
    }

    /// Mints the initial management token.
    ///
    /// Succeeds once per cluster. Later calls fail with the agent's error.
    ///
    /// ## Example
    ///
    /// ```rust,no_run
    /// # async fn example(client: consul_acl::Client) -> Result<(), consul_acl::Error> {
    /// let (root, _) = client.acl().bootstrap().await?;
    /// println!("management token: {}", root.accessor_id);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn bootstrap(&self) -> Result<(Token, WriteMeta), Error> {
        self.client
            .inner()
            .write(Request::put("/v1/acl/bootstrap"))
            .await
    }

    /// Exchanges an external credential for a new token.
    pub async fn login(
        &self,
        params: &LoginParams,
        options: Option<&WriteOptions>,
    ) -> Result<(Token, WriteMeta), Error> {
        let request = Request::post("/v1/acl/login")
            .maybe_write_options(options)
            .json(params)?;
        self.client.inner().write(request).await
    }

    /// Destroys the token the call is made with.
    ///
    /// That is the token in `options`, or the client default. Fails before
    /// sending if neither is set.
    pub async fn logout(&self, options: Option<&WriteOptions>) -> Result<WriteMeta, Error> {
        let per_call = options
            .and_then(|options| options.token.as_deref())
            .filter(|token| !token.is_empty());
        if per_call.or(self.client.inner().default_token()).is_none() {
            return Err(Error::precondition("must specify a token for logout"));
        }
        let request = Request::post("/v1/acl/logout").maybe_write_options(options);
        self.client.inner().write_discard(request).await
    }

    /// Returns the state of ACL replication in this datacenter.
    pub async fn replication(
        &self,
        options: Option<&QueryOptions>,
    ) -> Result<(ReplicationStatus, QueryMeta), Error> {
        let request = Request::get("/v1/acl/replication").maybe_query_options(options);
        self.client.inner().query(request).await
    }
}

impl std::fmt::Debug for AclClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AclClient").finish_non_exhaustive()
    }
}


#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::test_support::{anonymous_client, mock_client};
    use super::*;
    use crate::ErrorKind;
    use crate::transport::{Method, MockResponse};

    #[tokio::test]
    async fn test_bootstrap() {
        let (client, mock) = mock_client();
        mock.push(MockResponse::json(
            200,
            &json!({
                "AccessorID": "a1",
                "SecretID": "s1",
                "Description": "Bootstrap Token (Global Management)",
                "Policies": [{"ID": "00000000-0000-0000-0000-000000000001", "Name": "global-management"}],
                "CreateIndex": 12,
                "ModifyIndex": 12
            }),
        ));

        let (token, _) = client.acl().bootstrap().await.unwrap();
        assert_eq!(token.accessor_id, "a1");
        assert_eq!(token.secret_id, "s1");
        assert_eq!(token.policies[0].name, "global-management");

        let request = mock.last_request().unwrap();
        assert_eq!(request.method, Method::Put);
        assert_eq!(request.path, "/v1/acl/bootstrap");
        assert!(request.body.is_empty());
    }

    #[tokio::test]
    async fn test_bootstrap_twice_surfaces_server_error() {
        let (client, mock) = mock_client();
        mock.push(MockResponse::text(
            403,
            "Permission denied: ACL bootstrap no longer allowed (reset index: 13)",
        ));
        let err = client.acl().bootstrap().await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Forbidden);
        assert!(err.message().contains("ACL bootstrap no longer allowed"));
    }

    #[tokio::test]
    async fn test_login() {
        let (client, mock) = anonymous_client();
        mock.push(MockResponse::json(
            200,
            &json!({"AccessorID": "a2", "SecretID": "s2", "Local": true}),
        ));

        let params = LoginParams::kubernetes("minikube", "eyJhbGciOi").with_meta("pod", "web-0");
        let (token, _) = client.acl().login(&params, None).await.unwrap();
        assert_eq!(token.secret_id, "s2");
        assert!(token.local);

        let request = mock.last_request().unwrap();
        assert_eq!(request.method, Method::Post);
        assert_eq!(request.path, "/v1/acl/login");
        assert_eq!(
            request.body_json().unwrap(),
            json!({
                "IDPType": "kubernetes",
                "IDPName": "minikube",
                "IDPToken": "eyJhbGciOi",
                "Meta": {"pod": "web-0"}
            })
        );
    }

    #[tokio::test]
    async fn test_logout_uses_per_call_token() {
        let (client, mock) = mock_client();
        mock.push(MockResponse::text(200, "true"));

        let options = WriteOptions::new().with_token("s2");
        client.acl().logout(Some(&options)).await.unwrap();

        let request = mock.last_request().unwrap();
        assert_eq!(request.method, Method::Post);
        assert_eq!(request.path, "/v1/acl/logout");
        assert_eq!(request.header("X-Consul-Token"), Some("s2"));
    }

    #[tokio::test]
    async fn test_logout_without_token_is_rejected_locally() {
        let (client, mock) = anonymous_client();
        let err = client.acl().logout(None).await.unwrap_err();
        assert!(err.is_precondition());
        assert_eq!(mock.request_count(), 0);
    }

    #[tokio::test]
    async fn test_replication() {
        let (client, mock) = mock_client();
        mock.push(
            MockResponse::json(
                200,
                &json!({
                    "Enabled": true,
                    "Running": true,
                    "SourceDatacenter": "dc1",
                    "ReplicationType": "tokens",
                    "ReplicatedIndex": 1976,
                    "ReplicatedRoleIndex": 1976,
                    "ReplicatedTokenIndex": 2018,
                    "LastSuccess": "2018-11-03T06:28:58Z",
                    "LastError": "2016-11-03T06:28:28Z"
                }),
            )
            .with_header("X-Consul-Index", "2018"),
        );

        let options = QueryOptions::new().with_datacenter("dc2");
        let (status, meta) = client.acl().replication(Some(&options)).await.unwrap();
        assert!(status.enabled);
        assert_eq!(status.source_datacenter, "dc1");
        assert_eq!(status.replicated_token_index, 2018);
        assert!(status.last_success.is_some());
        assert_eq!(meta.last_index, 2018);
        assert_eq!(mock.last_request().unwrap().param("dc"), Some("dc2"));
    }
}
