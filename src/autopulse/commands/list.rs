use crate::commands::helpers::cloned;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::{ArticleStorage, ArticleStore};
use crate::views;

/// The public listing: published articles, optionally filtered by category and query.
pub fn run<S: ArticleStorage>(
    store: &ArticleStore<S>,
    category: Option<&str>,
    query: &str,
) -> Result<CmdResult> {
    let listing = views::listing(store.list(), category, query);
    let mut result = CmdResult::default()
        .with_featured(listing.featured.cloned())
        .with_listed_articles(cloned(listing.others));

    if result.featured.is_none() && result.listed_articles.is_empty() {
        result.add_message(CmdMessage::info("No articles found."));
    }
    Ok(result)
}

/// The admin table: every article including drafts, newest first.
pub fn run_all<S: ArticleStorage>(store: &ArticleStore<S>) -> Result<CmdResult> {
    let mut result =
        CmdResult::default().with_listed_articles(cloned(views::newest_first(store.list())));

    for (slug, ids) in store.duplicate_slugs() {
        result.add_message(CmdMessage::warning(format!(
            "Slug '{}' is shared by {} articles: {}",
            slug,
            ids.len(),
            ids.join(", ")
        )));
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::MessageLevel;
    use crate::store::memory::fixtures::StorageFixture;

    fn store() -> ArticleStore<crate::store::memory::InMemoryStorage> {
        ArticleStore::initialize(
            StorageFixture::new()
                .with_published("a", "Alpha", 1)
                .with_published("b", "Bravo", 2)
                .with_category("EV")
                .with_draft("c", "Charlie", 3)
                .persisted(),
        )
    }

    #[test]
    fn lists_with_featured_pick() {
        let result = run(&store(), None, "").unwrap();
        assert_eq!(result.featured.unwrap().id, "b");
        assert_eq!(result.listed_articles.len(), 1);
        assert_eq!(result.listed_articles[0].id, "a");
    }

    #[test]
    fn filtered_listing_has_no_featured() {
        let result = run(&store(), Some("ev"), "").unwrap();
        assert!(result.featured.is_none());
        assert_eq!(result.listed_articles.len(), 1);

        let result = run(&store(), None, "zzz").unwrap();
        assert!(result.listed_articles.is_empty());
        assert_eq!(result.messages[0].level, MessageLevel::Info);
    }

    #[test]
    fn admin_listing_includes_drafts_and_flags_duplicate_slugs() {
        let result = run_all(&store()).unwrap();
        let ids: Vec<_> = result.listed_articles.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["c", "b", "a"]);
        assert!(result.messages.is_empty());

        let mut fixture = StorageFixture::new()
            .with_published("a", "Same", 1)
            .with_published("b", "Same", 2);
        fixture.articles[0].published = false;
        let store = ArticleStore::initialize(fixture.persisted());
        let result = run_all(&store).unwrap();
        assert_eq!(result.messages.len(), 1);
        assert_eq!(result.messages[0].level, MessageLevel::Warning);
    }
}
