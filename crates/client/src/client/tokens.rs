//! API token management methods for [`Client`].

use reqwest::Method;
use tracing::info;

use crate::client::Client;
use crate::decode::decode;
use crate::error::Result;
use crate::http::{json_body, send_with_retry};
use crate::models::{ApiToken, TokenAttributes};

impl Client {
    /// List all API tokens. The secret token values are not included.
    pub async fn list_api_tokens(&self) -> Result<Vec<ApiToken>> {
        let builder = self.request(Method::GET, "/v2/tokens");
        let response = send_with_retry(builder, self.max_retries).await?;
        decode(&json_body(response).await?)
    }

    /// Get an API token by id. The secret token value is not included.
    pub async fn get_api_token(&self, id: &str) -> Result<ApiToken> {
        let builder = self.request(Method::GET, &format!("/v2/tokens/{id}"));
        let response = send_with_retry(builder, self.max_retries).await?;
        decode(&json_body(response).await?)
    }

    /// Create a new API token with the permissions given in `attributes`.
    ///
    /// The response carries the secret token value; it cannot be retrieved
    /// again later.
    pub async fn create_api_token(&self, attributes: &TokenAttributes) -> Result<ApiToken> {
        let builder = self.request(Method::POST, "/v2/tokens").json(attributes);
        let response = send_with_retry(builder, self.max_retries).await?;
        let token: ApiToken = decode(&json_body(response).await?)?;
        info!(token = %token.id, "created new api token");
        Ok(token)
    }

    /// Rotate the secret value of an API token, invalidating the old value.
    pub async fn regenerate_api_token(&self, id: &str) -> Result<ApiToken> {
        let builder = self.request(Method::POST, &format!("/v2/tokens/{id}/regenerate"));
        let response = send_with_retry(builder, self.max_retries).await?;
        decode(&json_body(response).await?)
    }

    /// Delete the API token with the given id.
    pub async fn delete_api_token(&self, id: &str) -> Result<()> {
        let builder = self.request(Method::DELETE, &format!("/v2/tokens/{id}"));
        send_with_retry(builder, self.max_retries).await?;
        Ok(())
    }
}
