//! Main error type for the ACL client.

use std::borrow::Cow;
use std::error::Error as StdError;
use std::fmt;

use super::ErrorKind;

/// Maximum number of body bytes kept in a server error message.
const MAX_EXCERPT_BYTES: usize = 512;

/// The primary error type for ACL client operations.
///
/// ```text
/// Error
/// ├── kind: ErrorKind          (category for matching)
/// ├── message: String          (human-readable description)
/// ├── status: Option<u16>      (HTTP status, server errors only)
/// └── source: Option           (underlying cause)
/// ```
///
/// ## Example
///
/// ```rust
/// use consul_acl::{Error, ErrorKind};
///
/// fn describe(err: &Error) -> &'static str {
///     if err.is_precondition() {
///         "bad input, nothing was sent"
///     } else if err.is_not_found() {
///         "gone"
///     } else if err.is_server_error() {
///         "the agent said no"
///     } else {
///         "transport or decode problem"
///     }
/// }
///
/// let err = Error::precondition("cannot specify an ID in policy creation");
/// assert_eq!(describe(&err), "bad input, nothing was sent");
/// ```
#[derive(Debug)]
pub struct Error {
    kind: ErrorKind,
    message: Cow<'static, str>,
    status: Option<u16>,
    source: Option<Box<dyn StdError + Send + Sync + 'static>>,
}

impl Error {
    /// Creates a new error with the given kind and message.
    ///
    /// ```rust
    /// use consul_acl::{Error, ErrorKind};
    ///
    /// let err = Error::new(ErrorKind::Configuration, "address cannot be empty");
    /// assert_eq!(err.kind(), ErrorKind::Configuration);
    /// ```
    pub fn new(kind: ErrorKind, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            kind,
            message: message.into(),
            status: None,
            source: None,
        }
    }

    /// Creates an error for a non-success HTTP response.
    ///
    /// The message embeds the status code and an excerpt of the body, in the
    /// form `Unexpected response code: 403 (ACL not found)`.
    pub fn from_response(status: u16, body: &str) -> Self {
        let kind = ErrorKind::from_http_status(status);
        let excerpt = body_excerpt(body);
        let mut err = Self::new(
            kind,
            format!("Unexpected response code: {} ({})", status, excerpt),
        );
        err.status = Some(status);
        err
    }

    /// Returns the error kind for categorization.
    #[inline]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the human-readable message without the kind prefix.
    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the HTTP status code for errors produced from a response.
    #[inline]
    pub fn status(&self) -> Option<u16> {
        self.status
    }

    /// Returns `true` if the request was rejected locally and never sent.
    #[inline]
    pub fn is_precondition(&self) -> bool {
        self.kind == ErrorKind::Precondition
    }

    /// Returns `true` if the agent answered with a non-success status.
    #[inline]
    pub fn is_server_error(&self) -> bool {
        self.status.is_some()
    }

    /// Returns `true` if the agent answered 404.
    #[inline]
    pub fn is_not_found(&self) -> bool {
        self.status == Some(404)
    }

    /// Returns `true` if this error is generally safe to retry.
    #[inline]
    pub fn is_retriable(&self) -> bool {
        self.kind.is_retriable()
    }

    /// Sets the source error for this error.
    #[must_use]
    pub fn with_source<E>(mut self, source: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        self.source = Some(Box::new(source));
        self
    }

    // Convenience constructors for common error types

    /// Creates a precondition error.
    pub fn precondition(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::Precondition, message)
    }

    /// Creates an invalid response (decode) error.
    pub fn invalid_response(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::InvalidResponse, message)
    }

    /// Creates an invalid argument error.
    pub fn invalid_argument(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::InvalidArgument, message)
    }

    /// Creates a timeout error.
    pub fn timeout(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::Timeout, message)
    }

    /// Creates a connection error.
    pub fn connection(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::Connection, message)
    }

    /// Creates a transport error.
    pub fn transport(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::Transport, message)
    }

    /// Creates a configuration error.
    pub fn configuration(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::Configuration, message)
    }
}

/// Trims a response body down to its leading lines, capped in size.
fn body_excerpt(body: &str) -> String {
    let body = body.trim();
    let mut excerpt = String::new();

    for line in body.lines() {
        let line = line.trim_end();
        let needed = if excerpt.is_empty() { line.len() } else { line.len() + 1 };
        if excerpt.len() + needed > MAX_EXCERPT_BYTES {
            if excerpt.is_empty() {
                let mut end = MAX_EXCERPT_BYTES;
                while !line.is_char_boundary(end) {
                    end -= 1;
                }
                excerpt.push_str(&line[..end]);
            }
            break;
        }
        if !excerpt.is_empty() {
            excerpt.push('\n');
        }
        excerpt.push_str(line);
    }

    excerpt
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn StdError + 'static))
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Self {
        Self::new(kind, kind.to_string())
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        let kind = match err.kind() {
            std::io::ErrorKind::ConnectionRefused
            | std::io::ErrorKind::ConnectionReset
            | std::io::ErrorKind::ConnectionAborted
            | std::io::ErrorKind::NotConnected => ErrorKind::Connection,
            std::io::ErrorKind::TimedOut => ErrorKind::Timeout,
            _ => ErrorKind::Transport,
        };
        Error::new(kind, err.to_string()).with_source(err)
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Error::configuration(format!("invalid URL: {}", err)).with_source(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::invalid_response(format!("failed to decode response: {}", err)).with_source(err)
    }
}
