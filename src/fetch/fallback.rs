//! Built-in demo data shown when a live fetch fails.

use tracing::warn;

use super::types::{Article, Repo};

const DEMO_REPOS: &str = include_str!("../../fixtures/demo_repos.json");
const DEMO_ARTICLES: &str = include_str!("../../fixtures/demo_articles.json");

/// Demo repositories used in place of a failed project fetch.
pub fn demo_repos() -> Vec<Repo> {
    serde_json::from_str(DEMO_REPOS).unwrap_or_else(|e| {
        warn!(error = %e, "embedded demo repositories are malformed");
        Vec::new()
    })
}

/// Demo articles used when the article fetch fails or comes back empty.
pub fn demo_articles() -> Vec<Article> {
    serde_json::from_str(DEMO_ARTICLES).unwrap_or_else(|e| {
        warn!(error = %e, "embedded demo articles are malformed");
        Vec::new()
    })
}
