//! Token management.

use serde::Serialize;

use super::lifecycle;
use super::resource::{AclResource, require_key};
use crate::Error;
use crate::client::Client;
use crate::protocol::{QueryMeta, QueryOptions, Request, WriteMeta, WriteOptions};
use crate::types::{Token, TokenListEntry};

/// Client for token operations.
///
/// Access via `client.acl().tokens()`.
///
/// ## Example
///
/// ```rust,no_run
/// # async fn example(client: consul_acl::Client) -> Result<(), consul_acl::Error> {
/// use consul_acl::types::{PolicyLink, Token};
///
/// let tokens = client.acl().tokens();
///
/// // Create a token
/// let (token, _) = tokens
///     .create(&Token::new().with_policy(PolicyLink::by_name("web")), None)
///     .await?;
///
/// // List tokens linked to a policy
/// let (linked, _) = tokens.list().policy("f2fd2e7c-5ee4-4d8a-a1dc-3a4e1b0fb7b1").await?;
///
/// // Delete it again
/// tokens.delete(&token.accessor_id, None).await?;
/// # let _ = linked;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct TokensClient {
    client: Client,
}

impl TokensClient {
    /// Creates a new tokens client.
    pub(crate) fn new(client: Client) -> Self {
        Self { client }
    }

    /// Creates a token. `accessor_id` and `secret_id` must be empty.
    pub async fn create(
        &self,
        token: &Token,
        options: Option<&WriteOptions>,
    ) -> Result<(Token, WriteMeta), Error> {
        lifecycle::create(&self.client, token, options).await
    }

    /// Replaces a token. `accessor_id` must be set; an empty `secret_id`
    /// keeps the current secret.
    pub async fn update(
        &self,
        token: &Token,
        options: Option<&WriteOptions>,
    ) -> Result<(Token, WriteMeta), Error> {
        lifecycle::update(&self.client, token, options).await
    }

    /// Copies a token's links into a new token with fresh IDs.
    ///
    /// Named `clone_token` so it does not shadow [`Clone::clone`].
    pub async fn clone_token(
        &self,
        accessor_id: &str,
        description: &str,
        options: Option<&WriteOptions>,
    ) -> Result<(Token, WriteMeta), Error> {
        #[derive(Serialize)]
        #[serde(rename_all = "PascalCase")]
        struct CloneBody<'a> {
            description: &'a str,
        }

        require_key(Token::KIND, Token::KEY_FIELD, accessor_id, "cloning")?;
        let request = Request::put(format!("{}/clone", Token::item_path(accessor_id)?))
            .maybe_write_options(options)
            .json(&CloneBody { description })?;
        self.client.inner().write(request).await
    }

    /// Deletes a token.
    pub async fn delete(
        &self,
        accessor_id: &str,
        options: Option<&WriteOptions>,
    ) -> Result<WriteMeta, Error> {
        lifecycle::delete::<Token>(&self.client, accessor_id, options).await
    }

    /// Reads a token. An unknown accessor ID is an error.
    pub async fn read(
        &self,
        accessor_id: &str,
        options: Option<&QueryOptions>,
    ) -> Result<(Token, QueryMeta), Error> {
        lifecycle::read(&self.client, accessor_id, options).await
    }

    /// Reads the token the call is made with.
    pub async fn read_self(
        &self,
        options: Option<&QueryOptions>,
    ) -> Result<(Token, QueryMeta), Error> {
        let request = Request::get("/v1/acl/token/self").maybe_query_options(options);
        self.client.inner().query(request).await
    }

    /// Lists tokens. Entries never carry the secret.
    pub fn list(&self) -> ListTokensRequest {
        ListTokensRequest {
            client: self.client.clone(),
            policy: None,
            role: None,
            options: QueryOptions::default(),
        }
    }
}

impl std::fmt::Debug for TokensClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokensClient").finish_non_exhaustive()
    }
}

/// Request to list tokens.
pub struct ListTokensRequest {
    client: Client,
    policy: Option<String>,
    role: Option<String>,
    options: QueryOptions,
}

impl ListTokensRequest {
    /// Only tokens linked to the policy with this ID.
    #[must_use]
    pub fn policy(mut self, policy_id: impl Into<String>) -> Self {
        self.policy = Some(policy_id.into());
        self
    }

    /// Only tokens linked to the role with this ID.
    #[must_use]
    pub fn role(mut self, role_id: impl Into<String>) -> Self {
        self.role = Some(role_id.into());
        self
    }

    /// Sets the query options.
    #[must_use]
    pub fn options(mut self, options: QueryOptions) -> Self {
        self.options = options;
        self
    }

    async fn execute(self) -> Result<(Vec<TokenListEntry>, QueryMeta), Error> {
        let mut request = Request::get("/v1/acl/tokens").query_options(&self.options);
        if let Some(policy) = self.policy.filter(|policy| !policy.is_empty()) {
            request = request.param("policy", policy);
        }
        if let Some(role) = self.role.filter(|role| !role.is_empty()) {
            request = request.param("role", role);
        }
        self.client.inner().query_list(request).await
    }
}

impl std::future::IntoFuture for ListTokensRequest {
    type Output = Result<(Vec<TokenListEntry>, QueryMeta), Error>;
    type IntoFuture = std::pin::Pin<Box<dyn std::future::Future<Output = Self::Output> + Send>>;

    fn into_future(self) -> Self::IntoFuture {
        Box::pin(self.execute())
    }
}
