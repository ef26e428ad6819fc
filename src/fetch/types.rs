use chrono::{DateTime, Utc};
use serde::Deserialize;

/// A GitHub user profile from `GET /users/{user}`.
#[derive(Debug, Clone, Deserialize)]
pub struct GitHubUser {
    pub login: String,
    #[serde(default)]
    pub public_repos: u64,
    #[serde(default)]
    pub followers: u64,
    /// Account creation time, used for the experience estimate
    pub created_at: DateTime<Utc>,
}

/// A repository from `GET /users/{user}/repos`.
#[derive(Debug, Clone, Deserialize)]
pub struct Repo {
    pub name: String,
    pub description: Option<String>,
    pub html_url: String,
    /// Live demo link. GitHub sends an empty string as often as null.
    pub homepage: Option<String>,
    pub language: Option<String>,
    #[serde(default)]
    pub topics: Vec<String>,
    #[serde(default)]
    pub stargazers_count: u64,
    #[serde(default)]
    pub forks_count: u64,
    #[serde(default)]
    pub watchers_count: u64,
    /// Repository size in KB
    #[serde(default)]
    pub size: u64,
    #[serde(default)]
    pub fork: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Repo {
    /// Homepage link, ignoring the empty string GitHub uses for "unset".
    pub fn homepage_link(&self) -> Option<&str> {
        self.homepage.as_deref().filter(|h| !h.trim().is_empty())
    }

    /// Forks and GitHub Pages sites are not shown as portfolio projects.
    pub fn is_featured(&self) -> bool {
        !self.fork && !self.name.contains(".github.io")
    }
}

/// A public event from `GET /users/{user}/events`.
#[derive(Debug, Clone, Deserialize)]
pub struct Event {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub payload: Option<EventPayload>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EventPayload {
    /// Only present on push events; the commit bodies are not inspected.
    #[serde(default)]
    pub commits: Vec<serde_json::Value>,
}

impl Event {
    pub fn commit_count(&self) -> usize {
        self.payload.as_ref().map_or(0, |p| p.commits.len())
    }
}

/// An article from `GET /api/articles?username={user}` on dev.to.
#[derive(Debug, Clone, Deserialize)]
pub struct Article {
    pub title: String,
    pub description: Option<String>,
    pub url: String,
    pub published_at: DateTime<Utc>,
    #[serde(default)]
    pub tag_list: Vec<String>,
    #[serde(default)]
    pub public_reactions_count: u64,
    #[serde(default)]
    pub comments_count: u64,
    /// Only reported for the author's own API key; zero otherwise.
    #[serde(default)]
    pub page_views_count: u64,
    pub cover_image: Option<String>,
    pub social_image: Option<String>,
}

impl Article {
    pub fn image(&self) -> Option<&str> {
        self.cover_image
            .as_deref()
            .or(self.social_image.as_deref())
            .filter(|s| !s.is_empty())
    }
}

/// A dev.to profile from `GET /api/users/by_username`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DevToUser {
    #[serde(default)]
    pub followers_count: Option<u64>,
}
