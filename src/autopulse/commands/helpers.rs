use crate::error::{AutopulseError, Result};
use crate::model::Article;
use crate::store::{ArticleStorage, ArticleStore};

/// Finds an article by id, falling back to slug.
pub fn find_article<'a, S: ArticleStorage>(
    store: &'a ArticleStore<S>,
    id_or_slug: &str,
) -> Option<&'a Article> {
    store
        .get_by_id(id_or_slug)
        .or_else(|| store.get_by_slug(id_or_slug))
}

pub fn require_article<'a, S: ArticleStorage>(
    store: &'a ArticleStore<S>,
    id_or_slug: &str,
) -> Result<&'a Article> {
    find_article(store, id_or_slug)
        .ok_or_else(|| AutopulseError::ArticleNotFound(id_or_slug.to_string()))
}

pub fn cloned(articles: Vec<&Article>) -> Vec<Article> {
    articles.into_iter().cloned().collect()
}
