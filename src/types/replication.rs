//! ACL replication status.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::wire;

/// State of ACL replication from the primary datacenter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ReplicationStatus {
    /// Whether replication is configured.
    pub enabled: bool,
    /// Whether the replication routine is running.
    pub running: bool,
    /// Datacenter replicated from.
    pub source_datacenter: String,
    /// What is replicated: `legacy`, `policies` or `tokens`.
    pub replication_type: String,
    /// Last index replicated for policies (or legacy tokens).
    pub replicated_index: u64,
    /// Last index replicated for roles.
    pub replicated_role_index: u64,
    /// Last index replicated for tokens.
    pub replicated_token_index: u64,
    /// Time of the last successful replication round.
    #[serde(with = "wire::go_time", skip_serializing_if = "Option::is_none")]
    pub last_success: Option<DateTime<Utc>>,
    /// Time of the last failed replication round.
    #[serde(with = "wire::go_time", skip_serializing_if = "Option::is_none")]
    pub last_error: Option<DateTime<Utc>>,
}
