use std::cmp::Ordering;
use std::str::FromStr;

use super::item::Listable;

/// Orderings offered by the sort selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    #[default]
    Updated,
    Stars,
    Forks,
    Name,
    Created,
}

impl SortKey {
    pub const ALL: [SortKey; 5] = [
        SortKey::Updated,
        SortKey::Stars,
        SortKey::Forks,
        SortKey::Name,
        SortKey::Created,
    ];

    /// Stars and forks descend, name ascends, dates go newest first.
    pub fn compare<T: Listable>(self, a: &T, b: &T) -> Ordering {
        match self {
            SortKey::Stars => b.stars().cmp(&a.stars()),
            SortKey::Forks => b.forks().cmp(&a.forks()),
            SortKey::Name => a
                .name()
                .to_lowercase()
                .cmp(&b.name().to_lowercase())
                .then_with(|| a.name().cmp(b.name())),
            SortKey::Created => b.created().cmp(&a.created()),
            SortKey::Updated => b.updated().cmp(&a.updated()),
        }
    }
}

impl std::fmt::Display for SortKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            SortKey::Updated => "updated",
            SortKey::Stars => "stars",
            SortKey::Forks => "forks",
            SortKey::Name => "name",
            SortKey::Created => "created",
        };
        write!(f, "{name}")
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortKey::ALL
            .into_iter()
            .find(|key| key.to_string().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown sort key '{s}' (expected updated, stars, forks, name or created)"))
    }
}

/// Stable sort of a copy of `items`.
pub fn sorted<T: Listable>(items: &[T], key: SortKey) -> Vec<T> {
    let mut copy = items.to_vec();
    copy.sort_by(|a, b| key.compare(a, b));
    copy
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::fallback::demo_articles;
    use crate::stats::tests::{at, test_repo};

    fn names<T: Listable>(items: &[T]) -> Vec<&str> {
        items.iter().map(|i| i.name()).collect()
    }

    #[test]
    fn test_stars_descending_and_stable() {
        let repos = vec![
            test_repo("a", None, 3),
            test_repo("b", None, 9),
            test_repo("c", None, 3),
        ];
        assert_eq!(names(&sorted(&repos, SortKey::Stars)), vec!["b", "a", "c"]);
    }

    #[test]
    fn test_name_ascending_ignores_case() {
        let repos = vec![
            test_repo("beta", None, 0),
            test_repo("Alpha", None, 0),
            test_repo("gamma", None, 0),
        ];
        assert_eq!(names(&sorted(&repos, SortKey::Name)), vec!["Alpha", "beta", "gamma"]);
    }

    #[test]
    fn test_name_sort_is_idempotent() {
        let repos = vec![
            test_repo("b", None, 0),
            test_repo("B", None, 0),
            test_repo("a", None, 0),
        ];
        let once = sorted(&repos, SortKey::Name);
        let twice = sorted(&once, SortKey::Name);
        assert_eq!(names(&once), names(&twice));
    }

    #[test]
    fn test_dates_newest_first() {
        let mut old = test_repo("old", None, 0);
        old.created_at = at(2020, 1, 1);
        old.updated_at = at(2024, 5, 1);
        let mut new = test_repo("new", None, 0);
        new.created_at = at(2023, 1, 1);
        new.updated_at = at(2023, 6, 1);
        let repos = vec![old, new];
        assert_eq!(names(&sorted(&repos, SortKey::Created)), vec!["new", "old"]);
        assert_eq!(names(&sorted(&repos, SortKey::Updated)), vec!["old", "new"]);
    }

    #[test]
    fn test_articles_sort_by_reactions_comments_and_publish_date() {
        let mut articles = demo_articles();
        articles.reverse();

        let reactions: Vec<u64> = sorted(&articles, SortKey::Stars)
            .iter()
            .map(|a| a.public_reactions_count)
            .collect();
        assert_eq!(reactions, vec![67, 42, 31, 25, 22, 18]);

        let comments: Vec<u64> = sorted(&articles, SortKey::Forks)
            .iter()
            .map(|a| a.comments_count)
            .collect();
        assert_eq!(comments, vec![23, 12, 9, 8, 7, 5]);

        let by_created = sorted(&articles, SortKey::Created);
        assert_eq!(by_created[0].published_at, at(2024, 12, 1) + chrono::Duration::hours(10));
        assert!(by_created
            .windows(2)
            .all(|pair| pair[0].published_at > pair[1].published_at));
        let by_updated = sorted(&articles, SortKey::Updated);
        assert_eq!(names(&by_updated), names(&by_created));
    }

    #[test]
    fn test_parse_sort_key() {
        assert_eq!("Stars".parse::<SortKey>().unwrap(), SortKey::Stars);
        assert_eq!(" created ".parse::<SortKey>().unwrap(), SortKey::Created);
        assert!("size".parse::<SortKey>().is_err());
    }
}
