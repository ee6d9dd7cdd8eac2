//! Per-call query and write options.

use std::fmt;
use std::time::Duration;

/// Read consistency mode.
///
/// ```text
/// Default     leader answers, may be briefly stale during leader changes
/// Consistent  leader confirms leadership with a quorum first
/// Stale       any server answers, possibly lagging behind
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Consistency {
    /// Leader answers without a quorum round-trip.
    #[default]
    Default,
    /// Strongly consistent read. Use for read-your-own-writes.
    Consistent,
    /// Any server answers. Check [`QueryMeta::last_contact`] for staleness.
    ///
    /// [`QueryMeta::last_contact`]: super::QueryMeta::last_contact
    Stale,
}

/// Options for read requests.
///
/// ## Example
///
/// ```rust
/// use std::time::Duration;
/// use consul_acl::{Consistency, QueryOptions};
///
/// // Block until the token list changes past index 120, for at most 5 minutes.
/// let options = QueryOptions::new()
///     .with_wait_index(120)
///     .with_wait_time(Duration::from_secs(300))
///     .with_consistency(Consistency::Stale);
/// ```
#[derive(Clone, Default, PartialEq, Eq)]
pub struct QueryOptions {
    /// Datacenter to query instead of the client default.
    pub datacenter: Option<String>,
    /// Consistency mode.
    pub consistency: Consistency,
    /// Blocking query: wait until the result index exceeds this value.
    pub wait_index: Option<u64>,
    /// Blocking query: maximum time the agent may hold the request.
    pub wait_time: Option<Duration>,
    /// ACL token to use instead of the client default.
    pub token: Option<String>,
    /// Server-side filter expression.
    pub filter: Option<String>,
}

impl QueryOptions {
    /// Creates options with all defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Targets a datacenter.
    #[must_use]
    pub fn with_datacenter(mut self, datacenter: impl Into<String>) -> Self {
        self.datacenter = Some(datacenter.into());
        self
    }

    /// Sets the consistency mode.
    #[must_use]
    pub fn with_consistency(mut self, consistency: Consistency) -> Self {
        self.consistency = consistency;
        self
    }

    /// Sets the index a blocking query waits past.
    #[must_use]
    pub fn with_wait_index(mut self, index: u64) -> Self {
        self.wait_index = Some(index);
        self
    }

    /// Sets the maximum blocking time.
    #[must_use]
    pub fn with_wait_time(mut self, wait: Duration) -> Self {
        self.wait_time = Some(wait);
        self
    }

    /// Overrides the ACL token.
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Sets a filter expression.
    #[must_use]
    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self
    }
}

impl fmt::Debug for QueryOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueryOptions")
            .field("datacenter", &self.datacenter)
            .field("consistency", &self.consistency)
            .field("wait_index", &self.wait_index)
            .field("wait_time", &self.wait_time)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("filter", &self.filter)
            .finish()
    }
}

/// Options for write requests.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct WriteOptions {
    /// Datacenter to write to instead of the client default.
    pub datacenter: Option<String>,
    /// ACL token to use instead of the client default.
    pub token: Option<String>,
    /// Number of additional nodes to relay user events to. 0 disables.
    pub relay_factor: Option<u8>,
}

impl WriteOptions {
    /// Creates options with all defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Targets a datacenter.
    #[must_use]
    pub fn with_datacenter(mut self, datacenter: impl Into<String>) -> Self {
        self.datacenter = Some(datacenter.into());
        self
    }

    /// Overrides the ACL token.
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Sets the relay factor.
    #[must_use]
    pub fn with_relay_factor(mut self, relay_factor: u8) -> Self {
        self.relay_factor = Some(relay_factor);
        self
    }
}

impl fmt::Debug for WriteOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WriteOptions")
            .field("datacenter", &self.datacenter)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("relay_factor", &self.relay_factor)
            .finish()
    }
}
