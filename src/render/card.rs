use chrono::{DateTime, Utc};
use std::time::Duration;

use super::format::{format_size, published_date, reading_minutes, relative_age};
use crate::fetch::types::{Article, Repo};

pub const PROJECT_PLACEHOLDER: &str = "No description available";
pub const ARTICLE_PLACEHOLDER: &str =
    "Exploring new ideas and sharing insights about development, technology, and innovation.";

const MAX_TAGS: usize = 3;
const ENTRANCE_STAGGER: Duration = Duration::from_millis(100);

/// A numeric badge on a card, e.g. "★ 12".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Badge {
    pub icon: &'static str,
    pub label: &'static str,
    pub value: u64,
}

/// One rendered project or article.
#[derive(Debug, Clone)]
pub struct Card {
    pub title: String,
    pub link: String,
    /// Live demo for projects
    pub demo_link: Option<String>,
    pub description: String,
    pub tags: Vec<String>,
    pub badges: Vec<Badge>,
    pub language: Option<String>,
    /// e.g. "Updated 3 days ago"
    pub age: String,
    pub details: Vec<String>,
    /// Cover image for articles
    pub image: Option<String>,
    /// When the card's entrance highlight is due, relative to the render.
    pub entrance_delay: Duration,
}

fn entrance_delay(index: usize) -> Duration {
    ENTRANCE_STAGGER * index as u32
}

fn non_empty(text: Option<&str>) -> Option<&str> {
    text.map(str::trim).filter(|t| !t.is_empty())
}

pub fn project_card(repo: &Repo, index: usize, now: DateTime<Utc>) -> Card {
    Card {
        title: repo.name.clone(),
        link: repo.html_url.clone(),
        demo_link: repo.homepage_link().map(str::to_string),
        description: non_empty(repo.description.as_deref())
            .unwrap_or(PROJECT_PLACEHOLDER)
            .to_string(),
        tags: repo.topics.iter().take(MAX_TAGS).cloned().collect(),
        badges: vec![
            Badge { icon: "★", label: "stars", value: repo.stargazers_count },
            Badge { icon: "⑂", label: "forks", value: repo.forks_count },
            Badge { icon: "👁", label: "watchers", value: repo.watchers_count },
        ],
        language: repo.language.clone(),
        age: format!("Updated {}", relative_age(repo.updated_at, now)),
        details: vec![format_size(repo.size)],
        image: None,
        entrance_delay: entrance_delay(index),
    }
}

pub fn article_card(article: &Article, index: usize, now: DateTime<Utc>) -> Card {
    let description = non_empty(article.description.as_deref());
    Card {
        title: article.title.clone(),
        link: article.url.clone(),
        demo_link: None,
        description: description.unwrap_or(ARTICLE_PLACEHOLDER).to_string(),
        tags: article
            .tag_list
            .iter()
            .take(MAX_TAGS)
            .map(|t| format!("#{t}"))
            .collect(),
        badges: vec![
            Badge { icon: "♥", label: "reactions", value: article.public_reactions_count },
            Badge { icon: "💬", label: "comments", value: article.comments_count },
            Badge { icon: "👁", label: "views", value: article.page_views_count },
        ],
        language: None,
        age: format!("Published {}", relative_age(article.published_at, now)),
        details: vec![
            published_date(article.published_at),
            format!("{} min read", reading_minutes(description)),
        ],
        image: article.image().map(str::to_string),
        entrance_delay: entrance_delay(index),
    }
}
