//! Dataset models.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::serde_helpers::format_duration_literal;

/// A named, server-side collection of ingested events.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Dataset {
    /// Unique id of the dataset.
    pub id: String,
    /// Name of the dataset.
    pub name: String,
    /// Description of the dataset.
    #[serde(default)]
    pub description: String,
    /// Who created the dataset.
    #[serde(default)]
    pub who: String,
    /// When the dataset was created.
    #[serde(default)]
    pub created: String,
}

/// Request used to create a dataset.
#[derive(Debug, Clone, Serialize)]
pub struct DatasetCreateRequest {
    pub name: String,
    pub description: String,
}

/// Request used to update a dataset.
#[derive(Debug, Clone, Serialize)]
pub struct DatasetUpdateRequest {
    pub description: String,
}

/// Request used to trim a dataset.
///
/// `max_duration` marks the oldest timestamp an event can have before it is
/// deleted, rendered as a duration literal (`"3600s"`).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrimRequest {
    pub max_duration: String,
}

impl TrimRequest {
    /// Build a trim request from the maximum event age to keep.
    pub fn new(max_duration: Duration) -> Self {
        Self {
            max_duration: format_duration_literal(max_duration),
        }
    }
}
