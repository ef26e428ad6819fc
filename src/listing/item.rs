use chrono::{DateTime, Utc};

use crate::fetch::types::{Article, Repo};

/// Tag matched by items that carry no language or tags of their own.
pub const OTHER_TAG: &str = "other";
/// Tag that matches every item.
pub const ALL_TAG: &str = "all";

/// What the list pipeline needs from a fetched record.
pub trait Listable: Clone {
    fn name(&self) -> &str;
    fn description(&self) -> Option<&str>;
    /// Topics for repositories, tags for articles.
    fn topics(&self) -> &[String];
    /// Whether this item belongs under the filter `tag` (already lowercased,
    /// never `"all"`).
    fn has_tag(&self, tag: &str) -> bool;
    /// Stars for repositories, reactions for articles.
    fn stars(&self) -> u64;
    /// Forks for repositories, comments for articles.
    fn forks(&self) -> u64;
    fn created(&self) -> DateTime<Utc>;
    fn updated(&self) -> DateTime<Utc>;

    fn matches_tag(&self, tag: &str) -> bool {
        let tag = tag.trim().to_lowercase();
        tag.is_empty() || tag == ALL_TAG || self.has_tag(&tag)
    }

    /// Case-insensitive substring match on name, description or topics.
    fn matches_search(&self, term: &str) -> bool {
        let term = term.trim().to_lowercase();
        if term.is_empty() {
            return true;
        }
        self.name().to_lowercase().contains(&term)
            || self
                .description()
                .is_some_and(|d| d.to_lowercase().contains(&term))
            || self.topics().iter().any(|t| t.to_lowercase().contains(&term))
    }
}

impl Listable for Repo {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    fn topics(&self) -> &[String] {
        &self.topics
    }

    fn has_tag(&self, tag: &str) -> bool {
        match &self.language {
            Some(language) => language.to_lowercase() == tag,
            None => tag == OTHER_TAG,
        }
    }

    fn stars(&self) -> u64 {
        self.stargazers_count
    }

    fn forks(&self) -> u64 {
        self.forks_count
    }

    fn created(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn updated(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

impl Listable for Article {
    fn name(&self) -> &str {
        &self.title
    }

    fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    fn topics(&self) -> &[String] {
        &self.tag_list
    }

    fn has_tag(&self, tag: &str) -> bool {
        if self.tag_list.is_empty() {
            return tag == OTHER_TAG;
        }
        self.tag_list.iter().any(|t| t.to_lowercase() == tag)
    }

    fn stars(&self) -> u64 {
        self.public_reactions_count
    }

    fn forks(&self) -> u64 {
        self.comments_count
    }

    fn created(&self) -> DateTime<Utc> {
        self.published_at
    }

    fn updated(&self) -> DateTime<Utc> {
        self.published_at
    }
}
