use async_trait::async_trait;
use tracing::{debug, instrument};

use super::types::{Event, GitHubUser, Repo};
use super::{get_json, FetchError, GitHubApi};

pub const DEFAULT_API_BASE: &str = "https://api.github.com";

/// Unauthenticated client for the public GitHub REST API.
pub struct GitHubClient {
    client: reqwest::Client,
    api_base: String,
}

impl GitHubClient {
    pub fn new(client: reqwest::Client, api_base: &str) -> Self {
        Self {
            client,
            api_base: api_base.trim_end_matches('/').to_string(),
        }
    }

    fn user_url(&self, username: &str) -> String {
        format!("{}/users/{}", self.api_base, username)
    }
}

#[async_trait]
impl GitHubApi for GitHubClient {
    #[instrument(skip(self))]
    async fn user(&self, username: &str) -> Result<GitHubUser, FetchError> {
        debug!("fetching GitHub user");
        get_json(&self.client, &self.user_url(username), &[]).await
    }

    #[instrument(skip(self))]
    async fn repos(&self, username: &str, per_page: u32) -> Result<Vec<Repo>, FetchError> {
        let url = format!("{}/repos", self.user_url(username));
        let query = [("sort", "updated".to_string()), ("per_page", per_page.to_string())];
        let repos: Vec<Repo> = get_json(&self.client, &url, &query).await?;
        debug!(count = repos.len(), "received repositories");
        Ok(repos)
    }

    #[instrument(skip(self))]
    async fn events(&self, username: &str, per_page: u32) -> Result<Vec<Event>, FetchError> {
        let url = format!("{}/events", self.user_url(username));
        let events: Vec<Event> =
            get_json(&self.client, &url, &[("per_page", per_page.to_string())]).await?;
        debug!(count = events.len(), "received events");
        Ok(events)
    }
}
