use async_trait::async_trait;
use tracing::{debug, instrument};

use super::types::{Article, DevToUser};
use super::{get_json, DevToApi, FetchError};

pub const DEFAULT_API_BASE: &str = "https://dev.to";

/// Client for the public dev.to API.
pub struct DevToClient {
    client: reqwest::Client,
    api_base: String,
}

impl DevToClient {
    pub fn new(client: reqwest::Client, api_base: &str) -> Self {
        Self {
            client,
            api_base: api_base.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl DevToApi for DevToClient {
    #[instrument(skip(self))]
    async fn articles(&self, username: &str, per_page: u32) -> Result<Vec<Article>, FetchError> {
        let url = format!("{}/api/articles", self.api_base);
        let query = [("username", username.to_string()), ("per_page", per_page.to_string())];
        let articles: Vec<Article> = get_json(&self.client, &url, &query).await?;
        debug!(count = articles.len(), "received articles");
        Ok(articles)
    }

    #[instrument(skip(self))]
    async fn user(&self, username: &str) -> Result<DevToUser, FetchError> {
        let url = format!("{}/api/users/by_username", self.api_base);
        get_json(&self.client, &url, &[("url", username.to_string())]).await
    }
}
