//! Dashboard management methods for [`Client`].

use reqwest::Method;

use crate::client::Client;
use crate::decode::decode;
use crate::error::Result;
use crate::http::{json_body, send_with_retry};
use crate::models::{Dashboard, DashboardCreateRequest, DashboardUpdateRequest};

impl Client {
    /// Get a dashboard by id.
    pub async fn get_dashboard(&self, id: &str) -> Result<Dashboard> {
        let builder = self.request(Method::GET, &format!("/v1/dashboards/{id}"));
        let response = send_with_retry(builder, self.max_retries).await?;
        decode(&json_body(response).await?)
    }

    /// List all dashboards.
    pub async fn list_dashboards(&self) -> Result<Vec<Dashboard>> {
        let builder = self.request(Method::GET, "/v1/dashboards");
        let response = send_with_retry(builder, self.max_retries).await?;
        decode(&json_body(response).await?)
    }

    /// Create a dashboard with the given properties.
    pub async fn create_dashboard(&self, request: &DashboardCreateRequest) -> Result<Dashboard> {
        let builder = self.request(Method::POST, "/v1/dashboards").json(request);
        let response = send_with_retry(builder, self.max_retries).await?;
        decode(&json_body(response).await?)
    }

    /// Replace the dashboard with the given id.
    pub async fn update_dashboard(
        &self,
        id: &str,
        request: &DashboardUpdateRequest,
    ) -> Result<Dashboard> {
        let builder = self
            .request(Method::PUT, &format!("/v1/dashboards/{id}"))
            .json(request);
        let response = send_with_retry(builder, self.max_retries).await?;
        decode(&json_body(response).await?)
    }

    /// Delete the dashboard with the given id.
    pub async fn delete_dashboard(&self, id: &str) -> Result<()> {
        let builder = self.request(Method::DELETE, &format!("/v1/dashboards/{id}"));
        send_with_retry(builder, self.max_retries).await?;
        Ok(())
    }
}
