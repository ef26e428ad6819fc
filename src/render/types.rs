use super::card::Card;
use crate::animate::Counter;
use crate::fetch::Origin;
use crate::stats::Achievement;

/// Which list a section shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    Projects,
    Articles,
}

impl std::fmt::Display for SectionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SectionKind::Projects => write!(f, "projects"),
            SectionKind::Articles => write!(f, "articles"),
        }
    }
}

impl std::str::FromStr for SectionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "projects" | "project" | "repos" => Ok(SectionKind::Projects),
            "articles" | "article" | "posts" => Ok(SectionKind::Articles),
            other => Err(format!("unknown section '{other}' (expected projects or articles)")),
        }
    }
}

/// A rendered list section: totals, cards and paging footer.
#[derive(Debug, Clone)]
pub struct Section {
    pub kind: SectionKind,
    pub heading: &'static str,
    pub counters: Vec<Counter>,
    pub cards: Vec<Card>,
    /// Active filter / search / sort, shown under the heading
    pub controls: String,
    pub shown: usize,
    pub total: usize,
    pub has_more: bool,
    /// Shown instead of cards when the displayed set is empty
    pub empty_message: Option<&'static str>,
    pub origin: Origin,
}

/// Everything written for one run.
#[derive(Debug, Clone)]
pub struct Page {
    pub owner: String,
    pub quick_stats: Vec<Counter>,
    pub achievements: [Achievement; 3],
    pub stats_origin: Origin,
    pub projects: Section,
    pub articles: Section,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_kind_parse_and_display() {
        assert_eq!("Articles".parse::<SectionKind>().unwrap(), SectionKind::Articles);
        assert_eq!("repos".parse::<SectionKind>().unwrap(), SectionKind::Projects);
        assert!("skills".parse::<SectionKind>().is_err());
        assert_eq!(SectionKind::Projects.to_string(), "projects");
    }
}
