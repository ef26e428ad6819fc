pub mod devto;
pub mod fallback;
pub mod github;
pub mod types;

pub use devto::DevToClient;
pub use github::GitHubClient;
use types::{Article, DevToUser, Event, GitHubUser, Repo};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, info, instrument, warn};

use crate::stats::{self, ArticleStats, ProfileStats, ProjectStats};

const USER_AGENT: &str = "devfolio";

/// Page sizes requested from each endpoint.
pub const STATS_REPOS_PER_PAGE: u32 = 100;
pub const STATS_EVENTS_PER_PAGE: u32 = 100;
pub const PROJECT_REPOS_PER_PAGE: u32 = 50;
pub const ARTICLES_PER_PAGE: u32 = 20;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("{url} answered with HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("network access disabled")]
    Offline,
}

/// Read-only view of the GitHub REST API.
#[async_trait]
pub trait GitHubApi: Send + Sync {
    async fn user(&self, username: &str) -> Result<GitHubUser, FetchError>;

    /// Repositories sorted by last update.
    async fn repos(&self, username: &str, per_page: u32) -> Result<Vec<Repo>, FetchError>;

    async fn events(&self, username: &str, per_page: u32) -> Result<Vec<Event>, FetchError>;
}

/// Read-only view of the dev.to API.
#[async_trait]
pub trait DevToApi: Send + Sync {
    async fn articles(&self, username: &str, per_page: u32) -> Result<Vec<Article>, FetchError>;

    async fn user(&self, username: &str) -> Result<DevToUser, FetchError>;
}

/// Stand-in for both APIs that fails every call, so every loader takes
/// its fallback branch.
pub struct Offline;

#[async_trait]
impl GitHubApi for Offline {
    async fn user(&self, _username: &str) -> Result<GitHubUser, FetchError> {
        Err(FetchError::Offline)
    }

    async fn repos(&self, _username: &str, _per_page: u32) -> Result<Vec<Repo>, FetchError> {
        Err(FetchError::Offline)
    }

    async fn events(&self, _username: &str, _per_page: u32) -> Result<Vec<Event>, FetchError> {
        Err(FetchError::Offline)
    }
}

#[async_trait]
impl DevToApi for Offline {
    async fn articles(&self, _username: &str, _per_page: u32) -> Result<Vec<Article>, FetchError> {
        Err(FetchError::Offline)
    }

    async fn user(&self, _username: &str) -> Result<DevToUser, FetchError> {
        Err(FetchError::Offline)
    }
}

/// GET a JSON document, treating any non-2xx status as a failure.
pub(crate) async fn get_json<T: DeserializeOwned>(
    client: &reqwest::Client,
    url: &str,
    query: &[(&str, String)],
) -> Result<T, FetchError> {
    let response = client
        .get(url)
        .header("User-Agent", USER_AGENT)
        .header("Accept", "application/json")
        .query(query)
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    Ok(response.json::<T>().await?)
}

/// Where a loaded value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    Live,
    Fallback,
}

#[derive(Debug, Clone)]
pub struct Loaded<T> {
    pub value: T,
    pub origin: Origin,
}

impl<T> Loaded<T> {
    fn live(value: T) -> Self {
        Self { value, origin: Origin::Live }
    }

    fn fallback(value: T) -> Self {
        Self { value, origin: Origin::Fallback }
    }
}

/// Repositories for the project section plus the totals shown above it.
#[derive(Debug, Clone)]
pub struct Projects {
    /// Non-fork, non-Pages repositories in fetch order.
    pub featured: Vec<Repo>,
    pub stats: ProjectStats,
}

impl Projects {
    fn from_fetched(repos: Vec<Repo>) -> Self {
        let stats = stats::project_stats(&repos);
        let featured = repos.into_iter().filter(Repo::is_featured).collect();
        Self { featured, stats }
    }
}

/// Issues the requests behind each page section. Every loader recovers
/// from its own failures; none of them returns an error.
pub struct Fetcher {
    github: Box<dyn GitHubApi>,
    devto: Box<dyn DevToApi>,
    github_user: String,
    devto_user: String,
}

impl Fetcher {
    pub fn new(
        github: Box<dyn GitHubApi>,
        devto: Box<dyn DevToApi>,
        github_user: impl Into<String>,
        devto_user: impl Into<String>,
    ) -> Self {
        Self {
            github,
            devto,
            github_user: github_user.into(),
            devto_user: devto_user.into(),
        }
    }

    /// A fetcher that never touches the network.
    pub fn offline() -> Self {
        Self::new(Box::new(Offline), Box::new(Offline), "", "")
    }

    /// Quick stats from the user profile, repositories and recent events.
    #[instrument(skip(self, now), fields(user = %self.github_user))]
    pub async fn profile_stats(&self, now: DateTime<Utc>) -> Loaded<ProfileStats> {
        match self.fetch_profile_stats(now).await {
            Ok(stats) => {
                info!(experience = stats.experience_years, projects = stats.projects, contributions = stats.contributions, "computed profile stats");
                Loaded::live(stats)
            }
            Err(e) => {
                warn!(error = %e, "could not load GitHub stats, using defaults");
                Loaded::fallback(ProfileStats::fallback())
            }
        }
    }

    async fn fetch_profile_stats(&self, now: DateTime<Utc>) -> Result<ProfileStats, FetchError> {
        let user = self.github.user(&self.github_user).await?;
        debug!(login = %user.login, public_repos = user.public_repos, "received user profile");
        let repos = self.github.repos(&self.github_user, STATS_REPOS_PER_PAGE).await?;
        let events = self.github.events(&self.github_user, STATS_EVENTS_PER_PAGE).await?;
        debug!(repos = repos.len(), events = events.len(), "received activity");
        Ok(stats::profile_stats(&user, &repos, &events, now))
    }

    /// Featured repositories for the project section. A live but empty
    /// list is returned as-is; only a failed fetch falls back to demo data.
    #[instrument(skip(self), fields(user = %self.github_user))]
    pub async fn projects(&self) -> Loaded<Projects> {
        match self.github.repos(&self.github_user, PROJECT_REPOS_PER_PAGE).await {
            Ok(repos) => {
                let projects = Projects::from_fetched(repos);
                info!(featured = projects.featured.len(), total = projects.stats.repositories, "loaded repositories");
                Loaded::live(projects)
            }
            Err(e) => {
                warn!(error = %e, "could not load GitHub repositories, showing demo projects");
                Loaded::fallback(Projects::from_fetched(fallback::demo_repos()))
            }
        }
    }

    /// Articles for the article section. Failure and an empty list both
    /// fall back to the demo set.
    #[instrument(skip(self), fields(user = %self.devto_user))]
    pub async fn articles(&self) -> Loaded<Vec<Article>> {
        match self.devto.articles(&self.devto_user, ARTICLES_PER_PAGE).await {
            Ok(articles) if !articles.is_empty() => {
                info!(articles = articles.len(), "loaded articles");
                Loaded::live(articles)
            }
            Ok(_) => {
                info!("no articles published, showing demo articles");
                Loaded::fallback(fallback::demo_articles())
            }
            Err(e) => {
                warn!(error = %e, "could not load dev.to articles, showing demo articles");
                Loaded::fallback(fallback::demo_articles())
            }
        }
    }

    /// Totals over `articles`, with the follower count looked up separately.
    #[instrument(skip(self, articles), fields(user = %self.devto_user, articles = articles.len()))]
    pub async fn article_stats(&self, articles: &[Article]) -> ArticleStats {
        let followers = match self.devto.user(&self.devto_user).await {
            Ok(user) => user
                .followers_count
                .filter(|&n| n > 0)
                .unwrap_or(ArticleStats::DEFAULT_FOLLOWERS),
            Err(e) => {
                debug!(error = %e, "could not fetch dev.to profile, using default followers");
                ArticleStats::DEFAULT_FOLLOWERS
            }
        };
        stats::article_stats(articles, followers)
    }
}
