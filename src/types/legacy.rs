//! Legacy single-type ACL tokens.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Privilege level of a legacy token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LegacyTokenType {
    /// Rules-restricted token.
    #[default]
    Client,
    /// Unrestricted token.
    Management,
}

impl fmt::Display for LegacyTokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LegacyTokenType::Client => write!(f, "client"),
            LegacyTokenType::Management => write!(f, "management"),
        }
    }
}

/// A legacy ACL token, where the ID is also the secret.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct AclEntry {
    /// Index at which the token was created.
    pub create_index: u64,
    /// Index at which the token was last modified.
    pub modify_index: u64,
    /// Token ID, which doubles as the bearer credential.
    #[serde(rename = "ID")]
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Privilege level.
    #[serde(rename = "Type")]
    pub kind: LegacyTokenType,
    /// Inline rules.
    pub rules: String,
}

impl fmt::Debug for AclEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AclEntry")
            .field("id", &"<redacted>")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("create_index", &self.create_index)
            .field("modify_index", &self.modify_index)
            .finish_non_exhaustive()
    }
}
