//! Response metadata envelopes.

use std::time::Duration;

use crate::transport::HttpResponse;

/// Metadata returned alongside every read.
///
/// Header values the agent omits, or sends malformed, keep their defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct QueryMeta {
    /// Index the result is consistent as of. Pass it back as
    /// [`QueryOptions::wait_index`] to block until it changes.
    ///
    /// [`QueryOptions::wait_index`]: super::QueryOptions::wait_index
    pub last_index: u64,
    /// Time since the answering server last heard from the leader.
    pub last_contact: Duration,
    /// Whether the answering server knew of a leader.
    pub known_leader: bool,
    /// Round-trip latency of the request.
    pub request_time: Duration,
}

impl QueryMeta {
    pub(crate) fn from_response(response: &HttpResponse) -> Self {
        let last_index = response
            .header("X-Consul-Index")
            .and_then(|value| value.trim().parse().ok())
            .unwrap_or_default();
        let last_contact = response
            .header("X-Consul-LastContact")
            .and_then(|value| value.trim().parse::<u64>().ok())
            .map(Duration::from_millis)
            .unwrap_or_default();
        let known_leader = response
            .header("X-Consul-KnownLeader")
            .is_some_and(|value| value.trim() == "true");

        Self {
            last_index,
            last_contact,
            known_leader,
            request_time: response.elapsed,
        }
    }
}

/// Metadata returned alongside every write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WriteMeta {
    /// Round-trip latency of the request.
    pub request_time: Duration,
}

impl WriteMeta {
    pub(crate) fn from_response(response: &HttpResponse) -> Self {
        Self {
            request_time: response.elapsed,
        }
    }
}
