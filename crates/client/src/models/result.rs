//! Query result models.
//!
//! These are decoded through [`crate::decode`], so the snake_case fields
//! below accept the API's camelCase spellings (`elapsedTime`, `_sysTime`)
//! as well. Event payload maps (`Entry::data`, `EntryGroup::group`) carry
//! user keys and are never rewritten.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;

use super::query::{Order, QueryLegacy};
use crate::serde_helpers::timestamp;

/// Priority of a message associated with a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MessagePriority {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
    Fatal,
    /// Unknown or unrecognized priority.
    #[serde(other)]
    #[default]
    Unknown,
}

impl fmt::Display for MessagePriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Trace => write!(f, "trace"),
            Self::Debug => write!(f, "debug"),
            Self::Info => write!(f, "info"),
            Self::Warn => write!(f, "warn"),
            Self::Error => write!(f, "error"),
            Self::Fatal => write!(f, "fatal"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

/// A message associated with a query result.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Message {
    /// Priority of the message.
    pub priority: MessagePriority,
    /// How often a message of this type was raised by the query.
    pub count: u64,
    /// Code of the message.
    pub code: String,
    /// Human readable text of the message.
    pub msg: String,
}

/// The status of a query result.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct QueryStatus {
    /// The duration it took the query to execute, in microseconds.
    pub elapsed_time: u64,
    /// Amount of blocks examined by the query.
    pub blocks_examined: u64,
    /// Amount of rows examined by the query.
    pub rows_examined: u64,
    /// Amount of rows that matched the query.
    pub rows_matched: u64,
    /// Amount of groups returned by the query.
    pub num_groups: u64,
    /// Whether the query result is partial.
    pub is_partial: bool,
    /// Populated when `is_partial` is true; pass it to the next request to
    /// retrieve the next result set.
    #[serde(default)]
    pub continuation_token: Option<String>,
    /// Whether the query result is an estimate.
    #[serde(default)]
    pub is_estimate: Option<bool>,
    /// Timestamp of the oldest block examined.
    #[serde(default)]
    pub min_block_time: Option<String>,
    /// Timestamp of the newest block examined.
    #[serde(default)]
    pub max_block_time: Option<String>,
    /// Messages associated with the query.
    #[serde(default)]
    pub messages: Vec<Message>,
    /// Row id of the newest row, as seen server side.
    #[serde(default)]
    pub max_cursor: Option<String>,
    /// Row id of the oldest row, as seen server side.
    #[serde(default)]
    pub min_cursor: Option<String>,
}

/// An event that matched a query and is part of the result set.
///
/// Wire keys are `_time`, `_sysTime` and `_rowId`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Entry {
    /// The time the event occurred.
    pub time: String,
    /// The time the event was recorded on the server.
    pub sys_time: String,
    /// The unique id of the event row.
    pub row_id: String,
    /// The raw event data, with filters and aggregations applied.
    #[serde(default)]
    pub data: HashMap<String, Value>,
}

/// An aggregation which is part of a group of queried events.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EntryGroupAgg {
    /// The aggregation's alias, or the uppercased operation name when no
    /// alias was given at query time.
    #[serde(default)]
    pub op: String,
    /// The result value of the aggregation.
    pub value: Value,
}

/// A group of queried events.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EntryGroup {
    /// The unique id of the group.
    pub id: u64,
    /// Maps field names to the unique values for the entry.
    pub group: HashMap<String, Value>,
    /// Aggregations of the group.
    pub aggregations: Vec<EntryGroupAgg>,
}

/// The interval of a queried time series.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Interval {
    /// Start time of the interval.
    #[serde(with = "timestamp")]
    pub start_time: DateTime<Utc>,
    /// End time of the interval.
    #[serde(with = "timestamp")]
    pub end_time: DateTime<Utc>,
    /// Groups of the interval.
    #[serde(default)]
    pub groups: Option<Vec<EntryGroup>>,
}

/// A queried time series.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Timeseries {
    /// The intervals that build the time series.
    pub series: Vec<Interval>,
    /// Totals of the time series.
    #[serde(default)]
    pub totals: Option<Vec<EntryGroup>>,
}

/// The result of a legacy structured query.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct QueryLegacyResult {
    /// Status of the query result.
    pub status: QueryStatus,
    /// The events that matched the query.
    pub matches: Vec<Entry>,
    /// The time series buckets.
    pub buckets: Timeseries,
    /// Id of the query saved on the server, when the query was sent with a
    /// save kind. Threaded in from the `X-Axiom-History-Query-Id` response
    /// header by the client, not decoded from the body.
    #[serde(default)]
    pub saved_query_id: Option<String>,
}

/// A named dataset source of a tabular result.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Source {
    pub name: String,
}

/// A grouping operation performed on a tabular result.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Group {
    pub name: String,
}

/// The time range a tabular result was restricted by.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Range {
    /// Starting time the query is limited by.
    #[serde(with = "timestamp")]
    pub start: DateTime<Utc>,
    /// Ending time the query is limited by.
    #[serde(with = "timestamp")]
    pub end: DateTime<Utc>,
    /// Field name on which the query range was restricted.
    pub field: String,
}

/// The aggregation a tabular field was computed by.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FieldAggregation {
    /// Any non-field arguments of the aggregation.
    #[serde(default)]
    pub args: Option<Vec<Value>>,
    /// Names of the fields this aggregation is computed on.
    #[serde(default)]
    pub fields: Option<Vec<String>>,
    /// System name of the aggregation.
    pub name: String,
}

/// A field of a tabular result.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Field {
    /// Name of the field.
    pub name: String,
    /// Type of the field.
    #[serde(rename = "type")]
    pub type_name: String,
    /// The aggregation that computed the field, if any.
    #[serde(default)]
    pub agg: Option<FieldAggregation>,
}

/// The bucketing applied to a tabular result.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Bucket {
    /// Field used to create buckets on.
    pub field: String,
    /// The fixed bucket size.
    pub size: Value,
}

/// A table of a tabular query result.
///
/// Row data is stored column-major: `columns[j]` lines up with `fields[j]`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Table {
    /// Name assigned to this table. Defaults to "0"; "_totals" is reserved
    /// for system use.
    pub name: String,
    /// Names of the datasets that contributed data to these results.
    pub sources: Vec<Source>,
    /// The fields included in these results, in column order.
    pub fields: Vec<Field>,
    /// Ordering clauses used to sort the results.
    #[serde(default)]
    pub order: Vec<Order>,
    /// Grouping operations performed on the results.
    #[serde(default)]
    pub groups: Vec<Group>,
    /// The time range the results were restricted by.
    #[serde(default)]
    pub range: Option<Range>,
    /// The bucketing applied to the results.
    #[serde(default)]
    pub buckets: Option<Bucket>,
    /// The raw result data, one array per field.
    #[serde(default)]
    pub columns: Option<Vec<Vec<Value>>>,
}

impl Table {
    /// Iterate the rows of the table as field-name → value maps.
    pub fn events(&self) -> ColumnIter<'_> {
        ColumnIter { table: self, row: 0 }
    }
}

/// Row iterator over a column-major [`Table`].
pub struct ColumnIter<'a> {
    table: &'a Table,
    row: usize,
}

impl Iterator for ColumnIter<'_> {
    type Item = HashMap<String, Value>;

    fn next(&mut self) -> Option<Self::Item> {
        let columns = self.table.columns.as_ref()?;
        if columns.is_empty() || self.row >= columns[0].len() {
            return None;
        }

        let mut event = HashMap::with_capacity(self.table.fields.len());
        for (j, field) in self.table.fields.iter().enumerate() {
            if let Some(value) = columns.get(j).and_then(|col| col.get(self.row)) {
                event.insert(field.name.clone(), value.clone());
            }
        }

        self.row += 1;
        Some(event)
    }
}

/// The result of an APL query.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct QueryResult {
    /// The structured query the APL compiled to, echoed by the server.
    #[serde(default)]
    pub request: Option<QueryLegacy>,
    /// Status of the query result.
    pub status: QueryStatus,
    /// The events that matched the query (legacy format).
    #[serde(default)]
    pub matches: Option<Vec<Entry>>,
    /// The time series buckets (legacy format).
    #[serde(default)]
    pub buckets: Option<Timeseries>,
    /// Populated in tabular queries.
    #[serde(default)]
    pub tables: Option<Vec<Table>>,
    /// Names of the datasets used in the query.
    #[serde(default)]
    pub dataset_names: Vec<String>,
    /// Id of the query saved on the server; threaded in from the
    /// `X-Axiom-History-Query-Id` response header by the client.
    #[serde(default)]
    pub saved_query_id: Option<String>,
}
