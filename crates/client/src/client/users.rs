//! User methods for [`Client`].

use reqwest::Method;

use crate::client::Client;
use crate::decode::decode;
use crate::error::Result;
use crate::http::{json_body, send_with_retry};
use crate::models::User;

impl Client {
    /// Get the currently authenticated user.
    pub async fn current_user(&self) -> Result<User> {
        let builder = self.request(Method::GET, "/v2/user");
        let response = send_with_retry(builder, self.max_retries).await?;
        decode(&json_body(response).await?)
    }
}
