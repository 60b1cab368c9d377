//! Data models for Axiom API requests and responses.
//!
//! Response types are decoded through [`crate::decode`], which accepts both
//! snake_case and camelCase key spellings; fields here are declared in the
//! canonical snake_case form. Request types serialize with explicit wire
//! names where the API expects camelCase.

pub mod annotations;
pub mod dashboards;
pub mod datasets;
pub mod ingest;
pub mod query;
pub mod result;
pub mod tokens;
pub mod users;

pub use annotations::{Annotation, AnnotationCreateRequest, AnnotationUpdateRequest};
pub use dashboards::{Dashboard, DashboardCreateRequest, DashboardUpdateRequest};
pub use datasets::{Dataset, DatasetCreateRequest, DatasetUpdateRequest, TrimRequest};
pub use ingest::{ContentEncoding, ContentType, IngestFailure, IngestOptions, IngestStatus};
pub use query::{
    Aggregation, AplOptions, AplResultFormat, Filter, FilterOperation, Order, Projection,
    QueryKind, QueryLegacy, QueryOptions, VirtualField,
};
pub use result::{
    Entry, EntryGroup, EntryGroupAgg, Interval, Message, MessagePriority, QueryLegacyResult,
    QueryResult, QueryStatus, Table, Timeseries,
};
pub use tokens::{
    ApiToken, TokenAttributes, TokenDatasetCapabilities, TokenOrganizationCapabilities,
};
pub use users::{Role, User};
