//! Error kind enumeration for categorizing client errors.

/// Categorization of client errors.
///
/// This enum provides a stable interface for matching on error types. The
/// kinds fall into four families:
///
/// | Family        | Kinds                                                   | Network call made |
/// |---------------|---------------------------------------------------------|-------------------|
/// | Precondition  | `Precondition`                                          | No                |
/// | Transport     | `Connection`, `Timeout`, `Transport`                    | Attempted         |
/// | Server        | `Unauthorized`, `Forbidden`, `NotFound`, `Conflict`, .. | Yes               |
/// | Decode        | `InvalidResponse`                                       | Yes               |
///
/// A `Precondition` error always means the request was rejected locally,
/// before anything was sent to the agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
#[non_exhaustive]
pub enum ErrorKind {
    /// A locally enforced precondition failed (e.g. an ID set on create).
    ///
    /// **Not retriable.** This is a programming error in the caller.
    #[error("precondition failed")]
    Precondition,

    /// The ACL token was missing or not recognized.
    ///
    /// HTTP: 401 Unauthorized
    #[error("unauthorized")]
    Unauthorized,

    /// The ACL token lacks the privileges for the operation, or is unknown.
    ///
    /// HTTP: 403 Forbidden
    #[error("forbidden")]
    Forbidden,

    /// The addressed resource does not exist.
    ///
    /// HTTP: 404 Not Found. Only surfaced for operations that do not treat
    /// absence as a normal outcome.
    #[error("not found")]
    NotFound,

    /// The agent rejected the request payload.
    ///
    /// HTTP: 400 Bad Request
    #[error("invalid argument")]
    InvalidArgument,

    /// Conflict with existing resource state.
    ///
    /// HTTP: 409 Conflict
    #[error("conflict")]
    Conflict,

    /// Rate limit exceeded.
    ///
    /// HTTP: 429 Too Many Requests
    #[error("rate limited")]
    RateLimited,

    /// Internal server error.
    ///
    /// HTTP: 500 Internal Server Error. Consul also uses this for many
    /// semantic rejections (e.g. "ACL bootstrap no longer allowed").
    #[error("internal error")]
    Internal,

    /// Agent or upstream temporarily unavailable.
    ///
    /// HTTP: 502, 503
    #[error("service unavailable")]
    Unavailable,

    /// Request timed out.
    ///
    /// HTTP: 504 Gateway Timeout or client-side timeout
    #[error("timeout")]
    Timeout,

    /// Connection error (DNS, TLS handshake, network unreachable).
    #[error("connection error")]
    Connection,

    /// Transport layer error that fits no more specific category.
    #[error("transport error")]
    Transport,

    /// The response body could not be decoded into the expected shape.
    ///
    /// **Not retriable.** Usually a protocol or version mismatch.
    #[error("invalid response")]
    InvalidResponse,

    /// Configuration error (invalid address, unreadable CA file).
    #[error("configuration error")]
    Configuration,

    /// Unknown or unexpected error.
    #[error("unknown error")]
    Unknown,
}

impl ErrorKind {
    /// Returns `true` if this error kind is generally safe to retry.
    ///
    /// ```rust
    /// use consul_acl::ErrorKind;
    ///
    /// assert!(ErrorKind::Timeout.is_retriable());
    /// assert!(!ErrorKind::Precondition.is_retriable());
    /// ```
    #[inline]
    pub fn is_retriable(&self) -> bool {
        matches!(
            self,
            ErrorKind::Unavailable
                | ErrorKind::Timeout
                | ErrorKind::RateLimited
                | ErrorKind::Connection
        )
    }

    /// Creates an `ErrorKind` from an HTTP status code.
    pub fn from_http_status(status: u16) -> Self {
        match status {
            400 => ErrorKind::InvalidArgument,
            401 => ErrorKind::Unauthorized,
            403 => ErrorKind::Forbidden,
            404 => ErrorKind::NotFound,
            409 => ErrorKind::Conflict,
            429 => ErrorKind::RateLimited,
            500 => ErrorKind::Internal,
            502 | 503 => ErrorKind::Unavailable,
            504 => ErrorKind::Timeout,
            _ => ErrorKind::Unknown,
        }
    }
}
