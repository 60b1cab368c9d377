//! Annotation models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::serde_helpers::{opt_timestamp, timestamp};

/// A marker on one or more datasets, e.g. a deploy or an incident.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Annotation {
    /// Unique id of the annotation.
    pub id: String,
    /// Names of the datasets the annotation applies to.
    pub datasets: Vec<String>,
    /// Start time of the annotation.
    #[serde(with = "timestamp")]
    pub time: DateTime<Utc>,
    /// End time of the annotation, for ranged annotations.
    #[serde(default)]
    pub end_time: Option<DateTime<Utc>>,
    /// Title of the annotation.
    #[serde(default)]
    pub title: Option<String>,
    /// Description of the annotation.
    #[serde(default)]
    pub description: Option<String>,
    /// URL with more context for the annotation.
    #[serde(default)]
    pub url: Option<String>,
    /// Type of the annotation, e.g. `deploy`.
    #[serde(rename = "type")]
    pub kind: String,
}

/// Request used to create an annotation.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnotationCreateRequest {
    pub datasets: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none", with = "opt_timestamp")]
    pub time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none", with = "opt_timestamp")]
    pub end_time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(rename = "type")]
    pub kind: String,
}

/// Request used to update an annotation. Unset fields keep their value.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnotationUpdateRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub datasets: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none", with = "opt_timestamp")]
    pub time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none", with = "opt_timestamp")]
    pub end_time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}
