pub mod card;
pub mod format;
pub mod types;

pub use card::Card;
pub use types::{Page, Section, SectionKind};

use chrono::{DateTime, Utc};
use colored::Colorize;
use std::io::Write;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, instrument};

use crate::animate::{self, AnimationGuard, Counter};
use crate::fetch::types::{Article, Repo};
use crate::fetch::Origin;
use crate::listing::{ListState, Listable, ALL_TAG};
use crate::stats::{achievements, ArticleStats, ProfileStats, ProjectStats};

const NO_RESULTS: &str = "No results match the current filter or search.";
const NOTHING_YET: &str = "Nothing published here yet.";

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Failed to write output: {0}")]
    Io(#[from] std::io::Error),
}

pub fn quick_stats(stats: &ProfileStats) -> Vec<Counter> {
    vec![
        Counter::new("experience", "years coding", stats.experience_years),
        Counter::new("projects", "projects", stats.projects),
        Counter::new("contributions", "contributions", stats.contributions),
        Counter::new("commits", "recent commits", stats.total_commits),
    ]
}

fn controls<T: Listable>(state: &ListState<T>) -> String {
    let search = match state.active_search() {
        "" => "-",
        term => term,
    };
    format!(
        "filter: {} | search: {} | sort: {}",
        state.active_filter(),
        search,
        state.active_sort()
    )
}

fn empty_message<T: Listable>(state: &ListState<T>) -> &'static str {
    let filter = state.active_filter().trim();
    let unfiltered = filter.is_empty() || filter.eq_ignore_ascii_case(ALL_TAG);
    if !unfiltered || !state.active_search().trim().is_empty() {
        NO_RESULTS
    } else {
        NOTHING_YET
    }
}

fn list_section<T: Listable>(
    kind: SectionKind,
    heading: &'static str,
    state: &ListState<T>,
    counters: Vec<Counter>,
    cards: Vec<Card>,
    origin: Origin,
) -> Section {
    Section {
        kind,
        heading,
        counters,
        empty_message: cards.is_empty().then(|| empty_message(state)),
        cards,
        controls: controls(state),
        shown: state.displayed().len(),
        total: state.full().len(),
        has_more: state.has_more(),
        origin,
    }
}

pub fn project_section(
    state: &ListState<Repo>,
    stats: &ProjectStats,
    origin: Origin,
    now: DateTime<Utc>,
) -> Section {
    let counters = vec![
        Counter::new("total-repos", "repositories", stats.repositories),
        Counter::new("total-stars", "stars", stats.stars),
        Counter::new("total-languages", "languages", stats.languages),
        Counter::new("total-watchers", "watchers", stats.watchers),
    ];
    let cards = state
        .displayed()
        .iter()
        .enumerate()
        .map(|(i, repo)| card::project_card(repo, i, now))
        .collect();
    list_section(SectionKind::Projects, "Projects", state, counters, cards, origin)
}

pub fn article_section(
    state: &ListState<Article>,
    stats: &ArticleStats,
    origin: Origin,
    now: DateTime<Utc>,
) -> Section {
    let counters = vec![
        Counter::new("total-articles", "articles", stats.articles),
        Counter::new("total-views", "views", stats.views),
        Counter::new("total-reactions", "reactions", stats.reactions),
        Counter::new("total-comments", "comments", stats.comments),
        Counter::new("devto-followers", "followers", stats.followers),
    ];
    let cards = state
        .displayed()
        .iter()
        .enumerate()
        .map(|(i, article)| card::article_card(article, i, now))
        .collect();
    list_section(SectionKind::Articles, "Articles", state, counters, cards, origin)
}

pub fn page(
    owner: &str,
    profile: &ProfileStats,
    stats_origin: Origin,
    projects: Section,
    articles: Section,
) -> Page {
    Page {
        owner: owner.to_string(),
        quick_stats: quick_stats(profile),
        achievements: achievements(profile),
        stats_origin,
        projects,
        articles,
    }
}

/// Writes pages and sections to a terminal. Counters animate the first
/// time they are drawn and are printed at their final value afterwards.
pub struct Terminal {
    animation: Option<Duration>,
    clear: bool,
    guard: AnimationGuard,
}

impl Terminal {
    /// `animation` of `None` prints counters without animating; `clear`
    /// wipes the screen before each section redraw.
    pub fn new(animation: Option<Duration>, clear: bool) -> Self {
        Self {
            animation,
            clear,
            guard: AnimationGuard::default(),
        }
    }

    async fn counters<W: Write>(&mut self, counters: &[Counter], out: &mut W) -> Result<(), RenderError> {
        match self.animation {
            Some(duration) => {
                animate::play(counters, duration, &mut self.guard, out).await?;
            }
            None => animate::print_static(counters, out)?,
        }
        Ok(())
    }

    #[instrument(skip_all, fields(owner = %page.owner))]
    pub async fn print_page<W: Write>(&mut self, page: &Page, out: &mut W) -> Result<(), RenderError> {
        debug!("writing page to terminal");
        writeln!(out)?;
        writeln!(out, "{}", format!("{} · developer portfolio", page.owner).bold())?;
        if page.stats_origin == Origin::Fallback {
            writeln!(out, "{}", "(GitHub unavailable, showing default stats)".dimmed())?;
        }
        self.counters(&page.quick_stats, out).await?;
        let badges: Vec<String> = page
            .achievements
            .iter()
            .map(|a| format!("{} {}", a.icon(), a))
            .collect();
        writeln!(out, "{}", badges.join("   ").cyan())?;
        writeln!(out)?;

        self.section_body(&page.projects, out).await?;
        self.section_body(&page.articles, out).await?;
        Ok(())
    }

    /// Redraw a single section from scratch.
    #[instrument(skip_all, fields(section = %section.kind, shown = section.shown))]
    pub async fn print_section<W: Write>(&mut self, section: &Section, out: &mut W) -> Result<(), RenderError> {
        if self.clear {
            write!(out, "\x1B[2J\x1B[H")?;
        }
        self.section_body(section, out).await
    }

    async fn section_body<W: Write>(&mut self, section: &Section, out: &mut W) -> Result<(), RenderError> {
        writeln!(out, "═══ {} ═══", section.heading.bold())?;
        if section.origin == Origin::Fallback {
            writeln!(out, "{}", "(showing demo data)".dimmed())?;
        }
        self.counters(&section.counters, out).await?;
        writeln!(out, "{}", section.controls.dimmed())?;
        writeln!(out)?;

        if let Some(message) = section.empty_message {
            writeln!(out, "  {}", message.yellow())?;
            writeln!(out)?;
        }
        let start = tokio::time::Instant::now();
        for card in &section.cards {
            if self.animation.is_some() {
                tokio::time::sleep_until(start + card.entrance_delay).await;
            }
            print_card(card, out)?;
        }

        writeln!(out, "Showing {} of {}", section.shown, section.total)?;
        if section.has_more {
            writeln!(out, "{}", "Type `more` to load more.".dimmed())?;
        }
        writeln!(out)?;
        Ok(())
    }
}

fn print_card<W: Write>(card: &Card, out: &mut W) -> std::io::Result<()> {
    writeln!(out, "  {} {}", card.title.bold().green(), card.link.dimmed())?;
    if let Some(demo) = &card.demo_link {
        writeln!(out, "  demo: {}", demo.underline())?;
    }
    writeln!(out, "  {}", card.description)?;
    if !card.tags.is_empty() {
        writeln!(out, "  {}", card.tags.join(" ").cyan())?;
    }

    let mut stats: Vec<String> = card
        .badges
        .iter()
        .map(|b| format!("{} {}", b.icon, b.value))
        .collect();
    if let Some(language) = &card.language {
        let dot = match format::hex_rgb(format::language_color(language)) {
            Some((r, g, b)) => "●".truecolor(r, g, b).to_string(),
            None => "●".to_string(),
        };
        stats.push(format!("{dot} {language}"));
    }
    writeln!(out, "  {}", stats.join("  "))?;

    let mut footer = vec![card.age.clone()];
    footer.extend(card.details.iter().cloned());
    writeln!(out, "  {}", footer.join(" · ").dimmed())?;
    writeln!(out)
}

/// Write the page as markdown to `path`.
#[instrument(skip(page), fields(owner = %page.owner))]
pub fn write_markdown(page: &Page, path: &Path) -> Result<(), RenderError> {
    debug!(path = %path.display(), "writing page to file");
    std::fs::write(path, markdown(page))?;
    Ok(())
}

pub fn markdown(page: &Page) -> String {
    let mut md = String::new();
    md.push_str(&format!("# {} · developer portfolio\n\n", page.owner));
    md.push_str(&counter_line(&page.quick_stats));
    md.push_str("\n\n");
    let badges: Vec<String> = page
        .achievements
        .iter()
        .map(|a| format!("{} {}", a.icon(), a))
        .collect();
    md.push_str(&format!("{}\n\n", badges.join(" · ")));

    for section in [&page.projects, &page.articles] {
        markdown_section(section, &mut md);
    }
    md
}

fn counter_line(counters: &[Counter]) -> String {
    counters
        .iter()
        .map(|c| format!("**{}** {}", c.final_text(), c.label))
        .collect::<Vec<_>>()
        .join(" | ")
}

fn markdown_section(section: &Section, md: &mut String) {
    md.push_str(&format!("## {}\n\n", section.heading));
    if section.origin == Origin::Fallback {
        md.push_str("_Showing demo data._\n\n");
    }
    md.push_str(&counter_line(&section.counters));
    md.push_str("\n\n");

    if let Some(message) = section.empty_message {
        md.push_str(&format!("_{message}_\n\n"));
    }
    for card in &section.cards {
        md.push_str(&format!("### [{}]({})\n\n", card.title, card.link));
        if let Some(image) = &card.image {
            md.push_str(&format!("![{}]({image})\n\n", card.title));
        }
        if let Some(demo) = &card.demo_link {
            md.push_str(&format!("[Live demo]({demo})\n\n"));
        }
        md.push_str(&format!("{}\n\n", card.description));
        if !card.tags.is_empty() {
            let tags: Vec<String> = card.tags.iter().map(|t| format!("`{t}`")).collect();
            md.push_str(&format!("{}\n\n", tags.join(" ")));
        }
        let mut stats: Vec<String> = card
            .badges
            .iter()
            .map(|b| format!("{} {} {}", b.icon, b.value, b.label))
            .collect();
        if let Some(language) = &card.language {
            stats.push(language.clone());
        }
        md.push_str(&format!("{}\n\n", stats.join(" · ")));
        let mut footer = vec![card.age.clone()];
        footer.extend(card.details.iter().cloned());
        md.push_str(&format!("_{}_\n\n", footer.join(" · ")));
    }
    md.push_str(&format!("Showing {} of {}\n\n", section.shown, section.total));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::fallback::{demo_articles, demo_repos};
    use crate::listing::Paging;
    use crate::stats::tests::at;
    use crate::stats::{article_stats, project_stats};

    fn sample_page() -> Page {
        let now = at(2025, 2, 1);
        let repos = demo_repos();
        let projects = project_section(
            &ListState::new(repos.clone(), Paging::PROJECTS),
            &project_stats(&repos),
            Origin::Fallback,
            now,
        );
        let articles = demo_articles();
        let articles = article_section(
            &ListState::new(articles.clone(), Paging::ARTICLES),
            &article_stats(&articles, 50),
            Origin::Live,
            now,
        );
        page("alice", &ProfileStats::fallback(), Origin::Fallback, projects, articles)
    }

    #[test]
    fn test_quick_stats_from_fallback() {
        let counters = quick_stats(&ProfileStats::fallback());
        let finals: Vec<String> = counters.iter().map(Counter::final_text).collect();
        assert_eq!(finals, vec!["3", "50", "100", "500"]);
    }

    #[test]
    fn test_fallback_page_has_project_cards() {
        let page = sample_page();
        assert!(!page.projects.cards.is_empty());
        assert!(page.projects.empty_message.is_none());
        assert_eq!(page.projects.shown, page.projects.total);
        assert!(!page.projects.has_more);
        assert_eq!(page.articles.cards.len(), 6);
    }

    #[test]
    fn test_empty_filter_shows_placeholder() {
        let repos = demo_repos();
        let mut state = ListState::new(repos.clone(), Paging::PROJECTS);
        state.filter("cobol");
        let section = project_section(&state, &project_stats(&repos), Origin::Live, at(2025, 1, 1));
        assert!(section.cards.is_empty());
        assert_eq!(section.empty_message, Some(NO_RESULTS));
        assert!(section.controls.contains("filter: cobol"));
    }

    #[test]
    fn test_empty_account_shows_neutral_message() {
        let state: ListState<Repo> = ListState::new(Vec::new(), Paging::PROJECTS);
        let section = project_section(&state, &project_stats(&[]), Origin::Live, at(2025, 1, 1));
        assert_eq!(section.empty_message, Some(NOTHING_YET));

        let mut state = ListState::new(demo_repos(), Paging::PROJECTS);
        state.search("no-such-project");
        let section = project_section(&state, &project_stats(&[]), Origin::Live, at(2025, 1, 1));
        assert_eq!(section.empty_message, Some(NO_RESULTS));
    }

    #[test]
    fn test_markdown_contains_sections() {
        let md = markdown(&sample_page());
        assert!(md.contains("# alice · developer portfolio"));
        assert!(md.contains("**3** years coding"));
        assert!(md.contains("## Projects"));
        assert!(md.contains("_Showing demo data._"));
        assert!(md.contains("### [devfolio](https://github.com/devfolio-demo/devfolio)"));
        assert!(md.contains("## Articles"));
        assert!(md.contains("**10.3K** views"));
        assert!(md.contains("Showing 6 of 6"));
    }

    #[test]
    fn test_write_markdown_file() {
        let path = std::env::temp_dir().join("devfolio_test_page.md");
        write_markdown(&sample_page(), &path).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("Project Master"));
        std::fs::remove_file(&path).ok();
    }

    #[tokio::test]
    async fn test_terminal_page_without_animation() {
        let mut terminal = Terminal::new(None, false);
        let mut out = Vec::new();
        terminal.print_page(&sample_page(), &mut out).await.unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("devfolio"));
        assert!(text.contains("Showing 6 of 6"));
        assert!(text.contains(card::PROJECT_PLACEHOLDER));
    }

    #[tokio::test]
    async fn test_terminal_section_redraw_clears_screen() {
        let page = sample_page();
        let mut terminal = Terminal::new(None, true);
        let mut out = Vec::new();
        terminal.print_section(&page.articles, &mut out).await.unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("\x1B[2J"));
        assert!(text.contains("Published"));
    }
}
