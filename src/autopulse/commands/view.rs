use crate::commands::CmdResult;
use crate::error::{AutopulseError, Result};
use crate::metadata::MetadataInjector;
use crate::store::{ArticleStorage, ArticleStore};

/// The article page for `slug`, with its document head.
///
/// Unpublished articles are still reachable by slug, as the site only hides them
/// from listings.
pub fn run<S: ArticleStorage>(
    store: &ArticleStore<S>,
    injector: &MetadataInjector,
    slug: &str,
) -> Result<CmdResult> {
    let article = store
        .get_by_slug(slug)
        .ok_or_else(|| AutopulseError::ArticleNotFound(slug.to_string()))?;

    let mut head = injector.default_document();
    injector.apply(&mut head, article);

    Ok(CmdResult::default()
        .with_affected_articles(vec![article.clone()])
        .with_head(head))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::{HeadKey, JSON_LD_ID};
    use crate::store::memory::fixtures::StorageFixture;

    fn injector() -> MetadataInjector {
        MetadataInjector::new("AutoPulse News", "https://autopulse.test", "Default")
    }

    #[test]
    fn builds_head_for_article() {
        let store = ArticleStore::initialize(
            StorageFixture::new()
                .with_published("a", "Grand Tour", 1)
                .persisted(),
        );
        let result = run(&store, &injector(), "grand-tour").unwrap();

        let head = result.head.unwrap();
        assert_eq!(head.title, "Grand Tour | AutoPulse News");
        assert!(head.get(&HeadKey::script(JSON_LD_ID)).is_some());
        assert_eq!(result.affected_articles[0].id, "a");
    }

    #[test]
    fn unknown_slug_is_not_found() {
        let store = ArticleStore::initialize(StorageFixture::new().persisted());
        assert!(matches!(
            run(&store, &injector(), "missing"),
            Err(AutopulseError::ArticleNotFound(_))
        ));
    }
}
