//! Annotation management methods for [`Client`].

use chrono::{DateTime, SecondsFormat, Utc};
use reqwest::Method;
use tracing::info;

use crate::client::Client;
use crate::decode::decode;
use crate::error::Result;
use crate::http::{json_body, send_with_retry};
use crate::models::{Annotation, AnnotationCreateRequest, AnnotationUpdateRequest};

impl Client {
    /// Get an annotation by id.
    pub async fn get_annotation(&self, id: &str) -> Result<Annotation> {
        let builder = self.request(Method::GET, &format!("/v2/annotations/{id}"));
        let response = send_with_retry(builder, self.max_retries).await?;
        decode(&json_body(response).await?)
    }

    /// Create an annotation with the given properties.
    pub async fn create_annotation(&self, request: &AnnotationCreateRequest) -> Result<Annotation> {
        let builder = self.request(Method::POST, "/v2/annotations").json(request);
        let response = send_with_retry(builder, self.max_retries).await?;
        let annotation: Annotation = decode(&json_body(response).await?)?;
        info!(annotation = %annotation.id, "created new annotation");
        Ok(annotation)
    }

    /// List annotations, optionally restricted to datasets and a time range.
    pub async fn list_annotations(
        &self,
        datasets: &[String],
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
    ) -> Result<Vec<Annotation>> {
        let mut params: Vec<(&'static str, String)> = vec![];
        if !datasets.is_empty() {
            params.push(("datasets", datasets.join(",")));
        }
        if let Some(start) = start {
            params.push(("start", start.to_rfc3339_opts(SecondsFormat::AutoSi, true)));
        }
        if let Some(end) = end {
            params.push(("end", end.to_rfc3339_opts(SecondsFormat::AutoSi, true)));
        }

        let builder = self.request(Method::GET, "/v2/annotations").query(&params);
        let response = send_with_retry(builder, self.max_retries).await?;
        decode(&json_body(response).await?)
    }

    /// Update an annotation with the given properties.
    pub async fn update_annotation(
        &self,
        id: &str,
        request: &AnnotationUpdateRequest,
    ) -> Result<Annotation> {
        let builder = self
            .request(Method::PUT, &format!("/v2/annotations/{id}"))
            .json(request);
        let response = send_with_retry(builder, self.max_retries).await?;
        let annotation: Annotation = decode(&json_body(response).await?)?;
        info!(annotation = %annotation.id, "updated annotation");
        Ok(annotation)
    }

    /// Delete the annotation with the given id.
    pub async fn delete_annotation(&self, id: &str) -> Result<()> {
        let builder = self.request(Method::DELETE, &format!("/v2/annotations/{id}"));
        send_with_retry(builder, self.max_retries).await?;
        Ok(())
    }
}
