//! Role binding rules.

use serde::{Deserialize, Serialize};

use super::wire;

/// Grants a role to tokens minted by an identity provider when the
/// login's verified attributes match.
///
/// `id` is assigned by the agent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct RoleBindingRule {
    /// Server-assigned ID.
    #[serde(rename = "ID")]
    pub id: String,
    /// Free-form description.
    pub description: String,
    /// Name of the identity provider this rule applies to.
    #[serde(rename = "IDPName")]
    pub idp_name: String,
    /// Match clauses. The rule applies when any clause matches.
    #[serde(rename = "Match", deserialize_with = "wire::null_as_default")]
    pub matches: Vec<RoleBindingRuleMatch>,
    /// Name of the role to bind. May contain `${...}` interpolations.
    pub role_name: String,
    /// Whether the named role must exist at login time.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub must_exist: bool,
    /// Index at which the rule was created.
    pub create_index: u64,
    /// Index at which the rule was last modified.
    pub modify_index: u64,
}

impl RoleBindingRule {
    /// Creates a rule binding `role_name` for logins through `idp_name`.
    pub fn new(idp_name: impl Into<String>, role_name: impl Into<String>) -> Self {
        Self {
            idp_name: idp_name.into(),
            role_name: role_name.into(),
            ..Default::default()
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Adds a match clause.
    #[must_use]
    pub fn with_match(mut self, clause: RoleBindingRuleMatch) -> Self {
        self.matches.push(clause);
        self
    }

    /// Requires the role to exist at login time.
    #[must_use]
    pub fn with_must_exist(mut self, must_exist: bool) -> Self {
        self.must_exist = must_exist;
        self
    }
}

/// A match clause: all selectors must match.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct RoleBindingRuleMatch {
    /// Selectors such as `serviceaccount.namespace=default`.
    #[serde(deserialize_with = "wire::null_as_default")]
    pub selector: Vec<String>,
}

impl RoleBindingRuleMatch {
    /// Creates a clause from selectors.
    pub fn new<I, S>(selectors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            selector: selectors.into_iter().map(Into::into).collect(),
        }
    }
}
