use chrono::{DateTime, Utc};
use tracing::{info, info_span, Instrument};

use crate::fetch::types::{Article, Repo};
use crate::fetch::{Fetcher, Origin};
use crate::listing::{ListState, Paging};
use crate::render::{self, Page, Section, SectionKind};
use crate::stats::{ArticleStats, ProfileStats, ProjectStats};

/// Everything fetched for one portfolio, owned in one place.
#[derive(Debug, Clone)]
pub struct Portfolio {
    pub owner: String,
    pub profile: ProfileStats,
    pub profile_origin: Origin,
    pub projects: ListState<Repo>,
    pub project_stats: ProjectStats,
    pub projects_origin: Origin,
    pub articles: ListState<Article>,
    pub article_stats: ArticleStats,
    pub articles_origin: Origin,
}

impl Portfolio {
    /// Fetch every section concurrently. Each section recovers from its own
    /// failures, so this never fails.
    pub async fn load(fetcher: &Fetcher, owner: &str, now: DateTime<Utc>) -> Self {
        let articles = async {
            let articles = fetcher.articles().await;
            let stats = fetcher.article_stats(&articles.value).await;
            (articles, stats)
        };

        let (profile, projects, (articles, article_stats)) = tokio::join!(
            fetcher.profile_stats(now).instrument(info_span!("load", section = "stats")),
            fetcher.projects().instrument(info_span!("load", section = "projects")),
            articles.instrument(info_span!("load", section = "articles")),
        );
        info!(
            projects = projects.value.featured.len(),
            articles = articles.value.len(),
            "portfolio loaded"
        );

        Self {
            owner: owner.to_string(),
            profile: profile.value,
            profile_origin: profile.origin,
            projects: ListState::new(projects.value.featured, Paging::PROJECTS),
            project_stats: projects.value.stats,
            projects_origin: projects.origin,
            articles: ListState::new(articles.value, Paging::ARTICLES),
            article_stats,
            articles_origin: articles.origin,
        }
    }

    /// Fetch one section again and reset its list controls.
    pub async fn reload(&mut self, fetcher: &Fetcher, kind: SectionKind) {
        match kind {
            SectionKind::Projects => {
                let projects = fetcher.projects().await;
                self.projects.reload(projects.value.featured);
                self.project_stats = projects.value.stats;
                self.projects_origin = projects.origin;
            }
            SectionKind::Articles => {
                let articles = fetcher.articles().await;
                self.article_stats = fetcher.article_stats(&articles.value).await;
                self.articles.reload(articles.value);
                self.articles_origin = articles.origin;
            }
        }
    }

    pub fn section(&self, kind: SectionKind, now: DateTime<Utc>) -> Section {
        match kind {
            SectionKind::Projects => {
                render::project_section(&self.projects, &self.project_stats, self.projects_origin, now)
            }
            SectionKind::Articles => {
                render::article_section(&self.articles, &self.article_stats, self.articles_origin, now)
            }
        }
    }

    pub fn page(&self, now: DateTime<Utc>) -> Page {
        render::page(
            &self.owner,
            &self.profile,
            self.profile_origin,
            self.section(SectionKind::Projects, now),
            self.section(SectionKind::Articles, now),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::tests::{FakeDevTo, FakeGitHub};
    use crate::stats::tests::{at, test_repo, test_user};

    #[tokio::test]
    async fn test_offline_portfolio_renders_demo_data() {
        let portfolio = Portfolio::load(&Fetcher::offline(), "alice", at(2025, 1, 1)).await;
        assert_eq!(portfolio.profile, ProfileStats::fallback());
        assert_eq!(portfolio.projects_origin, Origin::Fallback);
        assert!(!portfolio.projects.displayed().is_empty());
        assert_eq!(portfolio.articles.displayed().len(), 6);

        let page = portfolio.page(at(2025, 1, 1));
        assert!(!page.projects.cards.is_empty());
    }

    #[tokio::test]
    async fn test_sections_load_independently() {
        let github = FakeGitHub {
            user: Some(test_user(at(2018, 1, 1), 2, 1)),
            repos: Some(vec![test_repo("a", Some("Go"), 5), test_repo("b", Some("Rust"), 9)]),
            events: Some(vec![]),
        };
        let fetcher = Fetcher::new(Box::new(github), Box::new(FakeDevTo::default()), "alice", "alice");
        let portfolio = Portfolio::load(&fetcher, "alice", at(2025, 1, 1)).await;

        assert_eq!(portfolio.profile_origin, Origin::Live);
        assert_eq!(portfolio.projects_origin, Origin::Live);
        assert_eq!(portfolio.projects.full().len(), 2);
        assert_eq!(portfolio.articles_origin, Origin::Fallback);
        assert_eq!(portfolio.article_stats.followers, ArticleStats::DEFAULT_FOLLOWERS);
    }

    #[tokio::test]
    async fn test_reload_resets_section() {
        let fetcher = Fetcher::offline();
        let mut portfolio = Portfolio::load(&fetcher, "alice", at(2025, 1, 1)).await;
        portfolio.projects.filter("python");
        assert_eq!(portfolio.projects.displayed().len(), 1);

        portfolio.reload(&fetcher, SectionKind::Projects).await;
        assert_eq!(portfolio.projects.active_filter(), "all");
        assert_eq!(portfolio.projects.displayed().len(), portfolio.projects.full().len());
    }
}
