//! # Derived Views
//!
//! Pure functions computing what each page shows from the current collection.
//! Nothing here mutates or persists; every function borrows from its input.
//!
//! Ordering: "newest first" compares parsed publication dates. Articles whose
//! `date` does not parse sort after every dated article, keeping their relative
//! order (the sort is stable).

use crate::model::Article;
use std::cmp::Ordering;

/// Published articles, newest first.
pub fn published(articles: &[Article]) -> Vec<&Article> {
    let mut result: Vec<&Article> = articles.iter().filter(|a| a.published).collect();
    result.sort_by(|a, b| newest_first_cmp(a, b));
    result
}

/// Every article, newest first (the admin table).
pub fn newest_first(articles: &[Article]) -> Vec<&Article> {
    let mut result: Vec<&Article> = articles.iter().collect();
    result.sort_by(|a, b| newest_first_cmp(a, b));
    result
}

fn newest_first_cmp(a: &Article, b: &Article) -> Ordering {
    match (a.published_at(), b.published_at()) {
        (Some(da), Some(db)) => db.cmp(&da),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Case-insensitive exact match on category. `None` passes everything through.
pub fn by_category<'a>(articles: &[&'a Article], category: Option<&str>) -> Vec<&'a Article> {
    match category {
        Some(wanted) => {
            let wanted = wanted.to_lowercase();
            articles
                .iter()
                .copied()
                .filter(|a| a.category.to_lowercase() == wanted)
                .collect()
        }
        None => articles.to_vec(),
    }
}

/// Case-insensitive substring match on title or any keyword. An empty query matches all.
pub fn search<'a>(articles: &[&'a Article], query: &str) -> Vec<&'a Article> {
    if query.is_empty() {
        return articles.to_vec();
    }
    let query = query.to_lowercase();
    articles
        .iter()
        .copied()
        .filter(|a| {
            a.title.to_lowercase().contains(&query)
                || a.keywords.iter().any(|k| k.to_lowercase().contains(&query))
        })
        .collect()
}

/// What the listing page renders.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Listing<'a> {
    pub featured: Option<&'a Article>,
    pub others: Vec<&'a Article>,
}

impl Listing<'_> {
    pub fn is_empty(&self) -> bool {
        self.featured.is_none() && self.others.is_empty()
    }

    pub fn len(&self) -> usize {
        self.others.len() + usize::from(self.featured.is_some())
    }
}

/// Published articles filtered by category and search query.
///
/// A blank category is no filter. The first result is featured only when no
/// category filter and no query are active; a featured article never appears
/// again in `others`.
pub fn listing<'a>(articles: &'a [Article], category: Option<&str>, query: &str) -> Listing<'a> {
    let category = category.map(str::trim).filter(|c| !c.is_empty());
    let filtered = search(&by_category(&published(articles), category), query);

    if category.is_none() && query.is_empty() {
        let mut rest = filtered.into_iter();
        Listing {
            featured: rest.next(),
            others: rest.collect(),
        }
    } else {
        Listing {
            featured: None,
            others: filtered,
        }
    }
}

pub fn featured<'a>(
    articles: &'a [Article],
    category: Option<&str>,
    query: &str,
) -> Option<&'a Article> {
    listing(articles, category, query).featured
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::fixtures::StorageFixture;

    fn sample() -> Vec<Article> {
        StorageFixture::new()
            .with_published("old", "Old Sedan Review", 1)
            .with_category("Review")
            .with_draft("draft", "Secret Hypercar", 20)
            .with_category("EV")
            .with_published("new", "Electric Hypercar Unveiled", 15)
            .with_category("EV")
            .with_keywords(&["Battery", "Launch"])
            .with_published("mid", "Rally Weekend", 10)
            .with_category("Motorsport")
            .articles
    }

    fn ids(list: &[&Article]) -> Vec<String> {
        list.iter().map(|a| a.id.clone()).collect()
    }

    #[test]
    fn published_filters_and_sorts_descending() {
        let articles = sample();
        let result = published(&articles);

        assert_eq!(ids(&result), vec!["new", "mid", "old"]);
        assert!(result.iter().all(|a| a.published));
        assert!(result
            .windows(2)
            .all(|w| w[0].published_at() >= w[1].published_at()));
    }

    #[test]
    fn unparseable_dates_sort_last() {
        let mut articles = sample();
        articles[0].date = "not a date".into();
        let result = published(&articles);
        assert_eq!(ids(&result), vec!["new", "mid", "old"]);

        articles[2].date = "also bad".into();
        let result = published(&articles);
        assert_eq!(ids(&result), vec!["mid", "old", "new"]);
    }

    #[test]
    fn newest_first_includes_drafts() {
        let articles = sample();
        assert_eq!(
            ids(&newest_first(&articles)),
            vec!["draft", "new", "mid", "old"]
        );
    }

    #[test]
    fn category_match_ignores_case() {
        let articles = sample();
        let all: Vec<&Article> = articles.iter().collect();

        assert_eq!(ids(&by_category(&all, Some("ev"))), vec!["draft", "new"]);
        assert_eq!(by_category(&all, Some("E")).len(), 0);
        assert_eq!(by_category(&all, None).len(), 4);
    }

    #[test]
    fn search_matches_title_or_keywords() {
        let articles = sample();
        let all: Vec<&Article> = articles.iter().collect();

        assert_eq!(ids(&search(&all, "RALLY")), vec!["mid"]);
        assert_eq!(ids(&search(&all, "batt")), vec!["new"]);
        assert_eq!(ids(&search(&all, "hypercar")), vec!["draft", "new"]);
        assert!(search(&all, "nothing-like-this").is_empty());
    }

    #[test]
    fn empty_search_is_identity() {
        let articles = sample();
        let all: Vec<&Article> = articles.iter().collect();
        assert_eq!(search(&all, ""), all);
    }

    #[test]
    fn listing_features_top_article_when_unfiltered() {
        let articles = sample();
        let listing = listing(&articles, None, "");

        assert_eq!(listing.featured.unwrap().id, "new");
        assert_eq!(ids(&listing.others), vec!["mid", "old"]);
        assert_eq!(listing.len(), 3);
    }

    #[test]
    fn listing_has_no_featured_when_filtered() {
        let articles = sample();

        let by_cat = listing(&articles, Some("ev"), "");
        assert!(by_cat.featured.is_none());
        assert_eq!(ids(&by_cat.others), vec!["new"]);

        let by_query = listing(&articles, None, "review");
        assert!(by_query.featured.is_none());
        assert_eq!(ids(&by_query.others), vec!["old"]);

        assert!(featured(&articles, None, "x").is_none());
        assert_eq!(featured(&articles, None, "").unwrap().id, "new");
    }

    #[test]
    fn listing_of_empty_collection() {
        let listing = listing(&[], None, "");
        assert!(listing.is_empty());
        assert_eq!(listing, Listing::default());
    }

    #[test]
    fn dates_without_offset_sort_by_their_instant() {
        let mut articles = StorageFixture::new()
            .with_published("older", "Older", 1)
            .with_published("naive", "Naive", 2)
            .with_published("newer", "Newer", 3)
            .articles;
        articles[1].date = "2024-06-15T10:00:00".into();
        articles[2].date = "2024-07-01".into();

        assert_eq!(ids(&published(&articles)), vec!["newer", "naive", "older"]);
    }

    #[test]
    fn blank_category_is_no_filter() {
        let articles = sample();

        let blank = listing(&articles, Some(""), "");
        assert_eq!(blank, listing(&articles, None, ""));
        assert_eq!(blank.featured.unwrap().id, "new");

        let spaces = listing(&articles, Some("   "), "");
        assert_eq!(spaces.len(), 3);
    }
}
