//! Dataset management methods for [`Client`].

use reqwest::Method;
use std::time::Duration;
use tracing::{debug, info};

use crate::client::Client;
use crate::decode::decode;
use crate::error::Result;
use crate::http::{json_body, send_with_retry};
use crate::models::{Dataset, DatasetCreateRequest, DatasetUpdateRequest, TrimRequest};

impl Client {
    /// Get a dataset by id.
    pub async fn get_dataset(&self, id: &str) -> Result<Dataset> {
        let builder = self.request(Method::GET, &format!("/v1/datasets/{id}"));
        let response = send_with_retry(builder, self.max_retries).await?;
        decode(&json_body(response).await?)
    }

    /// List all available datasets.
    pub async fn list_datasets(&self) -> Result<Vec<Dataset>> {
        let builder = self.request(Method::GET, "/v1/datasets");
        let response = send_with_retry(builder, self.max_retries).await?;
        decode(&json_body(response).await?)
    }

    /// Create a dataset with the given name and description.
    pub async fn create_dataset(&self, name: &str, description: &str) -> Result<Dataset> {
        let request = DatasetCreateRequest {
            name: name.to_string(),
            description: description.to_string(),
        };
        let builder = self.request(Method::POST, "/v1/datasets").json(&request);
        let response = send_with_retry(builder, self.max_retries).await?;
        let dataset: Dataset = decode(&json_body(response).await?)?;
        info!(dataset = %dataset.name, "created new dataset");
        Ok(dataset)
    }

    /// Update the description of the dataset identified by its id.
    pub async fn update_dataset(&self, id: &str, new_description: &str) -> Result<Dataset> {
        let request = DatasetUpdateRequest {
            description: new_description.to_string(),
        };
        let builder = self
            .request(Method::PUT, &format!("/v1/datasets/{id}"))
            .json(&request);
        let response = send_with_retry(builder, self.max_retries).await?;
        let dataset: Dataset = decode(&json_body(response).await?)?;
        info!(dataset = %dataset.name, description = %dataset.description, "updated dataset");
        Ok(dataset)
    }

    /// Delete the dataset with the given id.
    pub async fn delete_dataset(&self, id: &str) -> Result<()> {
        let builder = self.request(Method::DELETE, &format!("/v1/datasets/{id}"));
        send_with_retry(builder, self.max_retries).await?;
        Ok(())
    }

    /// Trim the dataset identified by its id to a given length.
    ///
    /// `max_duration` marks the oldest timestamp an event can have; older
    /// events are deleted from the dataset.
    pub async fn trim_dataset(&self, id: &str, max_duration: Duration) -> Result<()> {
        let request = TrimRequest::new(max_duration);
        debug!(dataset = id, max_duration = %request.max_duration, "trimming dataset");
        let builder = self
            .request(Method::POST, &format!("/v1/datasets/{id}/trim"))
            .json(&request);
        send_with_retry(builder, self.max_retries).await?;
        Ok(())
    }
}
