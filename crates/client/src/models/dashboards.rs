//! Dashboard models.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A dashboard over one or more datasets.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Dashboard {
    /// Unique id of the dashboard.
    pub id: String,
    /// Name of the dashboard.
    pub name: String,
    /// Owner of the dashboard.
    pub owner: String,
    /// Refresh interval in seconds.
    pub refresh_time: u64,
    /// Version of the dashboard schema.
    pub schema_version: u64,
    /// Start of the displayed time window.
    pub time_window_start: String,
    /// End of the displayed time window.
    pub time_window_end: String,
    /// Chart definitions, opaque to the client.
    #[serde(default)]
    pub charts: Option<Value>,
    /// Layout definition, opaque to the client.
    #[serde(default)]
    pub layout: Option<Value>,
    #[serde(default)]
    pub description: Option<String>,
    /// Names of the datasets the dashboard draws from.
    #[serde(default)]
    pub datasets: Option<Vec<String>>,
    /// Comparison mode, if set.
    #[serde(default)]
    pub against: Option<String>,
    #[serde(default)]
    pub against_timestamp: Option<String>,
    #[serde(default)]
    pub overrides: Option<Value>,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub created_by: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub updated_by: Option<String>,
}

/// Request used to create a dashboard.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardCreateRequest {
    pub name: String,
    pub owner: String,
    pub refresh_time: u64,
    pub schema_version: u64,
    pub time_window_start: String,
    pub time_window_end: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub charts: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layout: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub datasets: Option<Vec<String>>,
}

/// Request used to update a dashboard.
///
/// `version` must echo the version of the dashboard being replaced.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardUpdateRequest {
    pub name: String,
    pub owner: String,
    pub refresh_time: u64,
    pub schema_version: u64,
    pub time_window_start: String,
    pub time_window_end: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub charts: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layout: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub datasets: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}
