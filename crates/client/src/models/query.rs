//! Query request models: the legacy structured query, its options, and the
//! options for APL queries.
//!
//! Request bodies use the API's camelCase wire names; query-string
//! parameters are rendered by explicit builders because several keys
//! (`streaming-duration`) are not representable as field names and some
//! values (`nocache`) use a legacy textual form that must be preserved
//! byte-for-byte.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::time::Duration;

use crate::serde_helpers::{format_duration_literal, timestamp};

/// The kind a query is saved as on the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QueryKind {
    Analytics,
    Stream,
    Apl,
}

impl QueryKind {
    /// The wire value of the kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Analytics => "analytics",
            Self::Stream => "stream",
            Self::Apl => "apl",
        }
    }
}

impl fmt::Display for QueryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An order rule applied to a query result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    /// Field to order on. Must be present in the group-by clause or used by
    /// an aggregation.
    pub field: String,
    /// Whether the field is ordered descending.
    pub desc: bool,
}

/// A field whose value is derived from an expression instead of the dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VirtualField {
    /// Alias the virtual field is referenced by.
    pub alias: String,
    /// Expression which computes the field's value.
    pub expr: String,
}

/// A field projected to the query result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Projection {
    /// Field to project to the query result.
    pub field: String,
    /// Alias to reference the projected field by.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
}

/// An aggregation performed as part of a query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Aggregation {
    /// The aggregation operation, e.g. `count` or `topk`.
    pub op: String,
    /// Field the aggregation is computed on.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    /// Alias the aggregation result is referenced by.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    /// Non-field argument of the aggregation, e.g. the `k` of a `topk`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub argument: Option<Value>,
}

/// A filter condition applied to queried events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Filter {
    /// The filter operation.
    pub op: FilterOperation,
    /// Field the filter applies to.
    pub field: String,
    /// Value the field is compared against.
    pub value: Value,
    /// Whether string comparisons are case sensitive.
    #[serde(default)]
    pub case_sensitive: bool,
    /// Child filters, combined by the `And`/`Or`/`Not` operations.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Filter>,
}

/// A filter operation applied on queries to restrict the result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FilterOperation {
    #[serde(rename = "")]
    Empty,
    #[serde(rename = "and")]
    And,
    #[serde(rename = "or")]
    Or,
    #[serde(rename = "not")]
    Not,

    // Works for strings and numbers.
    #[serde(rename = "==")]
    Equal,
    #[serde(rename = "!=")]
    NotEqual,
    #[serde(rename = "exists")]
    Exists,
    #[serde(rename = "not-exists")]
    NotExists,

    // Only works for numbers.
    #[serde(rename = ">")]
    GreaterThan,
    #[serde(rename = ">=")]
    GreaterThanEqual,
    #[serde(rename = "<")]
    LessThan,
    #[serde(rename = "<=")]
    LessThanEqual,

    // Only works for strings.
    #[serde(rename = "starts-with")]
    StartsWith,
    #[serde(rename = "not-starts-with")]
    NotStartsWith,
    #[serde(rename = "ends-with")]
    EndsWith,
    #[serde(rename = "not-ends-with")]
    NotEndsWith,
    #[serde(rename = "regexp")]
    Regexp,
    #[serde(rename = "not-regexp")]
    NotRegexp,

    // Works for strings and arrays.
    #[serde(rename = "contains")]
    Contains,
    #[serde(rename = "not-contains")]
    NotContains,
}

/// A structured query executed against a dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryLegacy {
    /// Start time of the query interval.
    #[serde(with = "timestamp")]
    pub start_time: DateTime<Utc>,
    /// End time of the query interval.
    #[serde(with = "timestamp")]
    pub end_time: DateTime<Utc>,
    /// Resolution of the query's graph. Use `auto` for server-side detection.
    pub resolution: String,
    /// Aggregations performed as part of the query.
    #[serde(default)]
    pub aggregations: Vec<Aggregation>,
    /// Field names to group the result by. Only valid with at least one
    /// aggregation.
    #[serde(default)]
    pub group_by: Vec<String>,
    /// Filter applied on the queried results.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<Filter>,
    /// Order rules specifying the order of the query result.
    #[serde(default)]
    pub order: Vec<Order>,
    /// Maximum amount of results returned from the query.
    pub limit: u64,
    /// Virtual fields referenced by aggregations, filters and orders.
    #[serde(default)]
    pub virtual_fields: Vec<VirtualField>,
    /// Projections applied to the query result. Empty projects all fields.
    #[serde(default)]
    pub project: Vec<Projection>,
    /// Cursor returned with a previous partial result.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,
    /// Return the cursor as part of the query result.
    #[serde(default)]
    pub include_cursor: bool,
    /// Token to fetch more results of a previous query.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub continuation_token: Option<String>,
}

impl QueryLegacy {
    /// Create a query over the given interval with defaults everywhere else.
    pub fn new(start_time: DateTime<Utc>, end_time: DateTime<Utc>) -> Self {
        Self {
            start_time,
            end_time,
            resolution: "auto".to_string(),
            aggregations: vec![],
            group_by: vec![],
            filter: None,
            order: vec![],
            limit: 10,
            virtual_fields: vec![],
            project: vec![],
            cursor: None,
            include_cursor: false,
            continuation_token: None,
        }
    }

    /// Set the aggregations.
    pub fn with_aggregations(mut self, aggregations: Vec<Aggregation>) -> Self {
        self.aggregations = aggregations;
        self
    }

    /// Set the group-by fields.
    pub fn with_group_by(mut self, group_by: Vec<String>) -> Self {
        self.group_by = group_by;
        self
    }

    /// Set the filter.
    pub fn with_filter(mut self, filter: Filter) -> Self {
        self.filter = Some(filter);
        self
    }

    /// Set the result limit.
    pub fn with_limit(mut self, limit: u64) -> Self {
        self.limit = limit;
        self
    }
}

/// Optional parameters for the legacy query operation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryOptions {
    /// Streaming duration of the query.
    pub streaming_duration: Option<Duration>,
    /// Omit the query cache.
    pub nocache: bool,
    /// Save the query on the server with the given kind. `QueryKind::Apl` is
    /// not valid here.
    pub save_as_kind: Option<QueryKind>,
}

impl QueryOptions {
    /// Render the query-string parameters.
    ///
    /// `nocache` is always present and uses the legacy `"True"`/`"False"`
    /// textual form, not a JSON boolean.
    pub fn query_params(&self) -> Vec<(&'static str, String)> {
        let mut params: Vec<(&'static str, String)> = vec![];
        if let Some(duration) = self.streaming_duration {
            params.push(("streaming-duration", format_duration_literal(duration)));
        }
        if let Some(kind) = self.save_as_kind {
            params.push(("saveAsKind", kind.as_str().to_string()));
        }
        params.push(("nocache", if self.nocache { "True" } else { "False" }.to_string()));
        params
    }
}

/// The result format of an APL query.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AplResultFormat {
    #[default]
    Legacy,
    Tabular,
}

impl AplResultFormat {
    /// The wire value of the format.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Legacy => "legacy",
            Self::Tabular => "tabular",
        }
    }
}

/// Optional parameters for the APL query operation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AplOptions {
    /// Start time for the interval to query.
    pub start_time: Option<DateTime<Utc>>,
    /// End time for the interval to query.
    pub end_time: Option<DateTime<Utc>>,
    /// The result format.
    pub format: AplResultFormat,
    /// Cursor returned with a previous partial result.
    pub cursor: Option<String>,
    /// Return the cursor as part of the query result.
    pub include_cursor: bool,
}

impl AplOptions {
    /// Render the query-string parameters. `format` is always present.
    pub fn query_params(&self) -> Vec<(&'static str, String)> {
        vec![("format", self.format.as_str().to_string())]
    }
}

/// Build the request body for an APL query: `apl` plus each option that is
/// actually set, timestamps rendered as ISO-8601 with a trailing `Z`.
pub fn apl_body(apl: &str, opts: Option<&AplOptions>) -> Value {
    let mut body = serde_json::Map::new();
    body.insert("apl".to_string(), Value::String(apl.to_string()));

    if let Some(opts) = opts {
        if let Some(start) = opts.start_time {
            body.insert(
                "startTime".to_string(),
                Value::String(start.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
            );
        }
        if let Some(end) = opts.end_time {
            body.insert(
                "endTime".to_string(),
                Value::String(end.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
            );
        }
        if let Some(cursor) = &opts.cursor {
            body.insert("cursor".to_string(), Value::String(cursor.clone()));
        }
        if opts.include_cursor {
            body.insert("includeCursor".to_string(), Value::Bool(true));
        }
    }

    Value::Object(body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn start() -> DateTime<Utc> {
        "2024-02-06T10:00:00Z".parse().unwrap()
    }

    fn end() -> DateTime<Utc> {
        "2024-02-06T11:00:00Z".parse().unwrap()
    }

    #[test]
    fn test_query_legacy_serializes_camel_case_with_z_timestamps() {
        let query = QueryLegacy::new(start(), end());
        let body = serde_json::to_value(&query).unwrap();
        assert_eq!(body["startTime"], json!("2024-02-06T10:00:00Z"));
        assert_eq!(body["endTime"], json!("2024-02-06T11:00:00Z"));
        assert_eq!(body["resolution"], json!("auto"));
        assert_eq!(body["limit"], json!(10));
        assert_eq!(body["includeCursor"], json!(false));
        // Unset optionals are omitted entirely.
        assert!(body.get("cursor").is_none());
        assert!(body.get("filter").is_none());
    }

    #[test]
    fn test_filter_serializes_wire_operations() {
        let filter = Filter {
            op: FilterOperation::Equal,
            field: "status".to_string(),
            value: json!(500),
            case_sensitive: false,
            children: vec![],
        };
        let body = serde_json::to_value(&filter).unwrap();
        assert_eq!(body["op"], json!("=="));
        assert_eq!(body["caseSensitive"], json!(false));
        assert!(body.get("children").is_none());
    }

    #[test]
    fn test_query_options_params_full() {
        let opts = QueryOptions {
            streaming_duration: Some(Duration::from_secs(60)),
            nocache: true,
            save_as_kind: Some(QueryKind::Analytics),
        };
        assert_eq!(
            opts.query_params(),
            vec![
                ("streaming-duration", "60s".to_string()),
                ("saveAsKind", "analytics".to_string()),
                ("nocache", "True".to_string()),
            ]
        );
    }

    #[test]
    fn test_query_options_nocache_always_present_as_text() {
        let opts = QueryOptions::default();
        assert_eq!(opts.query_params(), vec![("nocache", "False".to_string())]);
    }

    #[test]
    fn test_apl_options_params_default_format() {
        assert_eq!(
            AplOptions::default().query_params(),
            vec![("format", "legacy".to_string())]
        );
        let opts = AplOptions {
            format: AplResultFormat::Tabular,
            ..Default::default()
        };
        assert_eq!(opts.query_params(), vec![("format", "tabular".to_string())]);
    }

    #[test]
    fn test_apl_body_minimal() {
        let body = apl_body("['my-dataset']", None);
        assert_eq!(body, json!({"apl": "['my-dataset']"}));
    }

    #[test]
    fn test_apl_body_includes_only_set_options() {
        let opts = AplOptions {
            start_time: Some(start()),
            end_time: None,
            format: AplResultFormat::Legacy,
            cursor: Some("c1".to_string()),
            include_cursor: true,
        };
        let body = apl_body("['my-dataset'] | count", Some(&opts));
        assert_eq!(
            body,
            json!({
                "apl": "['my-dataset'] | count",
                "startTime": "2024-02-06T10:00:00Z",
                "cursor": "c1",
                "includeCursor": true
            })
        );
    }

    #[test]
    fn test_apl_body_omits_include_cursor_when_false() {
        let opts = AplOptions::default();
        let body = apl_body("['d']", Some(&opts));
        assert!(body.get("includeCursor").is_none());
        assert!(body.get("startTime").is_none());
    }

    #[test]
    fn test_query_kind_round_trip() {
        assert_eq!(serde_json::to_value(QueryKind::Apl).unwrap(), json!("apl"));
        let kind: QueryKind = serde_json::from_value(json!("stream")).unwrap();
        assert_eq!(kind, QueryKind::Stream);
    }
}
