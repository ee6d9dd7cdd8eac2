//! Error types for the ACL client.
//!
//! Every operation returns [`Result`]. The [`ErrorKind`] separates the four
//! ways a call can fail:
//!
//! - **precondition**: the request was rejected locally, nothing was sent
//! - **transport**: the exchange with the agent failed
//! - **server**: the agent answered with a non-success status
//! - **decode**: a success response carried an unexpected body
//!
//! ## Absence Is Not an Error
//!
//! Reads of roles, identity providers and binding rules return `Ok(None)`
//! when the agent answers 404. Token and policy reads surface the same
//! status as an error with [`ErrorKind::NotFound`].
//!
//! ```rust,no_run
//! # async fn example(client: consul_acl::Client) -> Result<(), consul_acl::Error> {
//! let acl = client.acl();
//!
//! let (role, _meta) = acl.roles().read("missing-id", None).await?;
//! assert!(role.is_none());
//!
//! let err = acl.tokens().read("missing-id", None).await.unwrap_err();
//! assert!(err.is_not_found());
//! # Ok(())
//! # }
//! ```

#[allow(clippy::module_inception)]
mod error;
mod kind;

pub use error::Error;
pub use kind::ErrorKind;

/// A specialized `Result` type for ACL client operations.
pub type Result<T> = std::result::Result<T, Error>;
