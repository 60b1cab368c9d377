//! Query methods for [`Client`].
//!
//! # What this module handles:
//! - The legacy structured query against a single dataset, including the
//!   pre-flight save-kind validation
//! - APL queries, routed to the edge endpoint when one is configured
//! - Threading the `X-Axiom-History-Query-Id` response header into the
//!   decoded result
//!
//! # What this module does NOT handle:
//! - Request body/parameter shapes (see [`crate::models::query`])
//! - Retry and error normalization (see [`crate::http`])

use reqwest::{Method, Response};
use tracing::debug;

use crate::client::Client;
use crate::decode::decode;
use crate::error::{Error, Result};
use crate::http::{json_body, send_with_retry};
use crate::models::{
    AplOptions, QueryKind, QueryLegacy, QueryLegacyResult, QueryOptions, QueryResult,
};
use crate::models::query::apl_body;

/// Response header carrying the id of a query saved on the server.
const HISTORY_QUERY_ID_HEADER: &str = "X-Axiom-History-Query-Id";

fn saved_query_id(response: &Response) -> Option<String> {
    response
        .headers()
        .get(HISTORY_QUERY_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(|value| value.to_string())
}

impl Client {
    /// Execute a structured query on the dataset identified by its id.
    ///
    /// # Errors
    ///
    /// Returns [`Error::WrongQueryKind`] before any request is sent when
    /// `opts.save_as_kind` is unset or [`QueryKind::Apl`]; the query endpoint
    /// cannot save structured queries as APL.
    pub async fn query_legacy(
        &self,
        dataset_id: &str,
        query: &QueryLegacy,
        opts: &QueryOptions,
    ) -> Result<QueryLegacyResult> {
        match opts.save_as_kind {
            None => return Err(Error::WrongQueryKind("none".to_string())),
            Some(QueryKind::Apl) => {
                return Err(Error::WrongQueryKind(QueryKind::Apl.as_str().to_string()));
            }
            Some(_) => {}
        }

        debug!(dataset = dataset_id, "sending query");
        let params = opts.query_params();
        let builder = self
            .request(Method::POST, &format!("/v1/datasets/{dataset_id}/query"))
            .query(&params)
            .json(query);
        let response = send_with_retry(builder, self.max_retries).await?;

        let query_id = saved_query_id(&response);
        debug!(query_id = ?query_id, "received query result");

        let mut result: QueryLegacyResult = decode(&json_body(response).await?)?;
        result.saved_query_id = query_id;
        Ok(result)
    }

    /// Execute an APL query.
    ///
    /// Routed to the edge endpoint when one is configured; edge endpoints
    /// reject personal tokens before any request is sent.
    pub async fn query(&self, apl: &str, opts: Option<&AplOptions>) -> Result<QueryResult> {
        let builder = match self.edge_query_url() {
            Some(url) => {
                self.check_edge_token()?;
                self.request_url(Method::POST, &url)
            }
            None => self.request(Method::POST, "/v1/datasets/_apl"),
        };

        debug!(apl = apl, "sending apl query");
        let params = opts
            .map(AplOptions::query_params)
            .unwrap_or_else(|| AplOptions::default().query_params());
        let builder = builder.query(&params).json(&apl_body(apl, opts));
        let response = send_with_retry(builder, self.max_retries).await?;

        let query_id = saved_query_id(&response);
        debug!(query_id = ?query_id, "received apl query result");

        let mut result: QueryResult = decode(&json_body(response).await?)?;
        result.saved_query_id = query_id;
        Ok(result)
    }

    /// Execute an APL query. Alias of [`Client::query`].
    pub async fn apl_query(&self, apl: &str, opts: Option<&AplOptions>) -> Result<QueryResult> {
        self.query(apl, opts).await
    }
}
