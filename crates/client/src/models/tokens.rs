//! API token models.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Dataset-level permissions a token can be assigned, one object per dataset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenDatasetCapabilities {
    /// Ability to ingest data.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ingest: Option<Vec<String>>,
    /// Ability to query data.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<Vec<String>>,
    /// Ability to use starred queries.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub starred_queries: Option<Vec<String>>,
    /// Ability to use virtual fields.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub virtual_fields: Option<Vec<String>>,
}

/// Organization-level permissions a token can be assigned.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenOrganizationCapabilities {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annotations: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_tokens: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub billing: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dashboards: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub datasets: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoints: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flows: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub integrations: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monitors: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notifiers: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rbac: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shared_access_keys: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub users: Option<Vec<String>>,
}

/// The input parameters for creating an API token.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenAttributes {
    /// Name for the token.
    pub name: String,
    /// Dataset-level capabilities, keyed on dataset name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dataset_capabilities: Option<HashMap<String, TokenDatasetCapabilities>>,
    /// Description for the token.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Expiration date for the token.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<String>,
    /// Organization-level capabilities.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub org_capabilities: Option<TokenOrganizationCapabilities>,
}

impl TokenAttributes {
    /// Create token attributes with the given name and no capabilities.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            dataset_capabilities: None,
            description: None,
            expires_at: None,
            org_capabilities: None,
        }
    }
}

/// An API token as returned by the token endpoints.
///
/// The `token` value itself is only present in create and regenerate
/// responses; list/get responses omit it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ApiToken {
    /// Unique id of the token, used to reference it later.
    pub id: String,
    /// Name of the token.
    #[serde(default)]
    pub name: String,
    /// The secret token value.
    #[serde(default)]
    pub token: Option<String>,
    /// Description of the token.
    #[serde(default)]
    pub description: Option<String>,
    /// Expiration date of the token.
    #[serde(default)]
    pub expires_at: Option<String>,
}
