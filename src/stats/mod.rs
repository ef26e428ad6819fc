//! Summary numbers derived from the fetched collections.
//!
//! Everything here is a pure function of its inputs; the current time is
//! passed in so results are deterministic. The numbers are heuristics, not
//! exact counts: the public API does not expose a full contribution history.

pub mod achievements;

pub use achievements::{achievements, Achievement};

use chrono::{DateTime, Utc};
use std::collections::BTreeSet;

use crate::fetch::types::{Article, Event, GitHubUser, Repo};

/// Event types counted as one contribution each, on top of pushed commits.
const ISSUE_LIKE_EVENTS: [&str; 3] = ["IssuesEvent", "PullRequestEvent", "CreateEvent"];

/// Headline numbers for the "quick stats" strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProfileStats {
    pub experience_years: u64,
    pub projects: u64,
    pub contributions: u64,
    pub followers: u64,
    pub total_commits: u64,
}

impl ProfileStats {
    /// Fixed numbers shown when the profile could not be fetched.
    pub fn fallback() -> Self {
        Self {
            experience_years: 3,
            projects: 50,
            contributions: 100,
            followers: 0,
            total_commits: 500,
        }
    }
}

/// Derive profile stats from a user, their repositories and recent events.
pub fn profile_stats(
    user: &GitHubUser,
    repos: &[Repo],
    events: &[Event],
    now: DateTime<Utc>,
) -> ProfileStats {
    let account_age_days = (now - user.created_at).num_days().max(0) as u64;
    let experience_years = (account_age_days / 365).max(1);

    let original_repos = repos.iter().filter(|r| !r.fork).count() as u64;
    let projects = original_repos.max(user.public_repos + 10);

    let pushed_commits: u64 = events
        .iter()
        .filter(|e| e.kind == "PushEvent")
        .map(|e| e.commit_count() as u64)
        .sum();
    let issue_like = events
        .iter()
        .filter(|e| ISSUE_LIKE_EVENTS.contains(&e.kind.as_str()))
        .count() as u64;
    let contributions = (pushed_commits + issue_like).max(user.public_repos * 10);

    ProfileStats {
        experience_years,
        projects,
        contributions,
        followers: user.followers,
        total_commits: pushed_commits,
    }
}

/// Totals shown above the project cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ProjectStats {
    pub repositories: u64,
    pub stars: u64,
    pub languages: u64,
    pub watchers: u64,
}

/// Totals over every fetched repository, forks included.
pub fn project_stats(repos: &[Repo]) -> ProjectStats {
    let languages: BTreeSet<&str> = repos.iter().filter_map(|r| r.language.as_deref()).collect();
    ProjectStats {
        repositories: repos.len() as u64,
        stars: repos.iter().map(|r| r.stargazers_count).sum(),
        languages: languages.len() as u64,
        watchers: repos.iter().map(|r| r.watchers_count).sum(),
    }
}

/// Totals shown above the article cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArticleStats {
    pub articles: u64,
    pub views: u64,
    pub reactions: u64,
    pub comments: u64,
    pub followers: u64,
}

impl ArticleStats {
    /// Follower count shown when the dev.to profile lookup fails.
    pub const DEFAULT_FOLLOWERS: u64 = 50;
}

pub fn article_stats(articles: &[Article], followers: u64) -> ArticleStats {
    ArticleStats {
        articles: articles.len() as u64,
        views: articles.iter().map(|a| a.page_views_count).sum(),
        reactions: articles.iter().map(|a| a.public_reactions_count).sum(),
        comments: articles.iter().map(|a| a.comments_count).sum(),
        followers,
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use chrono::TimeZone;

    pub fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
    }

    pub fn test_user(created: DateTime<Utc>, public_repos: u64, followers: u64) -> GitHubUser {
        GitHubUser {
            login: "alice".to_string(),
            public_repos,
            followers,
            created_at: created,
        }
    }

    pub fn test_repo(name: &str, language: Option<&str>, stars: u64) -> Repo {
        Repo {
            name: name.to_string(),
            description: None,
            html_url: format!("https://github.com/alice/{name}"),
            homepage: None,
            language: language.map(str::to_string),
            topics: vec![],
            stargazers_count: stars,
            forks_count: 0,
            watchers_count: stars,
            size: 10,
            fork: false,
            created_at: at(2023, 1, 1),
            updated_at: at(2024, 1, 1),
        }
    }

    fn event(kind: &str, commits: usize) -> Event {
        Event {
            kind: kind.to_string(),
            payload: Some(crate::fetch::types::EventPayload {
                commits: vec![serde_json::Value::Null; commits],
            }),
        }
    }

    #[test]
    fn test_experience_is_at_least_one_year() {
        let user = test_user(at(2024, 6, 1), 0, 0);
        let stats = profile_stats(&user, &[], &[], at(2024, 9, 1));
        assert_eq!(stats.experience_years, 1);
    }

    #[test]
    fn test_experience_floors_whole_years() {
        let user = test_user(at(2020, 1, 1), 0, 0);
        let stats = profile_stats(&user, &[], &[], at(2024, 12, 1));
        assert_eq!(stats.experience_years, 4);
    }

    #[test]
    fn test_projects_uses_public_repo_buffer() {
        let user = test_user(at(2020, 1, 1), 5, 0);
        let repos = vec![test_repo("a", None, 0), test_repo("b", None, 0)];
        let stats = profile_stats(&user, &repos, &[], at(2024, 1, 1));
        assert_eq!(stats.projects, 15);
    }

    #[test]
    fn test_projects_excludes_forks() {
        let user = test_user(at(2020, 1, 1), 0, 0);
        let mut repos: Vec<Repo> = (0..14).map(|i| test_repo(&format!("r{i}"), None, 0)).collect();
        repos[0].fork = true;
        repos[1].fork = true;
        let stats = profile_stats(&user, &repos, &[], at(2024, 1, 1));
        assert_eq!(stats.projects, 12);
    }

    #[test]
    fn test_contributions_from_events() {
        let user = test_user(at(2020, 1, 1), 1, 3);
        let events = vec![
            event("PushEvent", 4),
            event("PushEvent", 3),
            event("IssuesEvent", 0),
            event("PullRequestEvent", 0),
            event("CreateEvent", 0),
            event("WatchEvent", 0),
        ];
        let stats = profile_stats(&user, &[], &events, at(2024, 1, 1));
        assert_eq!(stats.contributions, 10);
        assert_eq!(stats.total_commits, 7);
        assert_eq!(stats.followers, 3);
    }

    #[test]
    fn test_contributions_floor_from_public_repos() {
        let user = test_user(at(2020, 1, 1), 8, 0);
        let events = vec![event("PushEvent", 2)];
        let stats = profile_stats(&user, &[], &events, at(2024, 1, 1));
        assert_eq!(stats.contributions, 80);
    }

    #[test]
    fn test_profile_stats_deterministic() {
        let user = test_user(at(2019, 3, 4), 7, 2);
        let repos = vec![test_repo("a", Some("Go"), 1)];
        let events = vec![event("PushEvent", 1)];
        let now = at(2024, 5, 5);
        assert_eq!(
            profile_stats(&user, &repos, &events, now),
            profile_stats(&user, &repos, &events, now)
        );
    }

    #[test]
    fn test_fallback_profile_stats() {
        let stats = ProfileStats::fallback();
        assert_eq!(stats.experience_years, 3);
        assert_eq!(stats.projects, 50);
        assert_eq!(stats.contributions, 100);
        assert_eq!(stats.total_commits, 500);
    }

    #[test]
    fn test_project_stats_totals() {
        let mut forked = test_repo("c", Some("Go"), 1);
        forked.fork = true;
        let repos = vec![
            test_repo("a", Some("Go"), 5),
            test_repo("b", Some("Rust"), 9),
            test_repo("d", None, 0),
            forked,
        ];
        let stats = project_stats(&repos);
        assert_eq!(stats.repositories, 4);
        assert_eq!(stats.stars, 15);
        assert_eq!(stats.languages, 2);
        assert_eq!(stats.watchers, 15);
    }

    #[test]
    fn test_article_stats_totals() {
        let articles = crate::fetch::fallback::demo_articles();
        let stats = article_stats(&articles, 12);
        assert_eq!(stats.articles, 6);
        assert_eq!(stats.reactions, 205);
        assert_eq!(stats.comments, 64);
        assert_eq!(stats.views, 10340);
        assert_eq!(stats.followers, 12);
    }
}
