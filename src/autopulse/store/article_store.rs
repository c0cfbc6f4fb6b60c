use super::ArticleStorage;
use crate::error::Result;
use crate::model::Article;
use std::collections::BTreeMap;
use tracing::{debug, error, info};

/// Where the collection came from at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadSource {
    Persisted,
    Seed,
    /// Loading failed and the store fell back to an empty collection.
    Empty,
}

/// The single owner of the article collection.
///
/// Every mutation replaces the in-memory snapshot and then persists it in full
/// before returning, so a reload immediately after a mutation observes it.
pub struct ArticleStore<S: ArticleStorage> {
    storage: S,
    articles: Vec<Article>,
    source: LoadSource,
}

impl<S: ArticleStorage> ArticleStore<S> {
    /// Loads the collection: persisted data if present (even empty), otherwise the seed.
    ///
    /// Read or parse failures degrade to an empty collection and are only logged.
    pub fn initialize(mut storage: S) -> Self {
        let (articles, source) = match storage.load_persisted() {
            Ok(Some(articles)) => (articles, LoadSource::Persisted),
            Ok(None) => match storage.load_seed() {
                Ok(seed) => {
                    // Persist right away so the next start reads storage, not the seed.
                    if let Err(e) = storage.persist(&seed) {
                        error!(error = %e, "failed to persist seed articles");
                    }
                    (seed, LoadSource::Seed)
                }
                Err(e) => {
                    error!(error = %e, "failed to load seed articles");
                    (Vec::new(), LoadSource::Empty)
                }
            },
            Err(e) => {
                error!(error = %e, "failed to load articles");
                (Vec::new(), LoadSource::Empty)
            }
        };

        info!(count = articles.len(), source = ?source, "article store initialized");
        Self {
            storage,
            articles,
            source,
        }
    }

    pub fn source(&self) -> LoadSource {
        self.source
    }

    /// The full collection in stored order.
    pub fn list(&self) -> &[Article] {
        &self.articles
    }

    pub fn get_by_id(&self, id: &str) -> Option<&Article> {
        self.articles.iter().find(|a| a.id == id)
    }

    /// First article carrying `slug`.
    pub fn get_by_slug(&self, slug: &str) -> Option<&Article> {
        self.articles.iter().find(|a| a.slug == slug)
    }

    pub fn contains_id(&self, id: &str) -> bool {
        self.get_by_id(id).is_some()
    }

    /// Prepends `article`.
    pub fn add(&mut self, article: Article) -> Result<()> {
        debug!(id = %article.id, "adding article");
        self.articles.insert(0, article);
        self.persist()
    }

    /// Replaces every article with the same id. Returns `false` if there was none.
    pub fn update(&mut self, article: Article) -> Result<bool> {
        let mut found = false;
        for slot in self.articles.iter_mut().filter(|a| a.id == article.id) {
            *slot = article.clone();
            found = true;
        }
        self.persist()?;
        Ok(found)
    }

    /// Removes the article with `id`. Returns `false` if there was none.
    pub fn remove(&mut self, id: &str) -> Result<bool> {
        let before = self.articles.len();
        self.articles.retain(|a| a.id != id);
        let removed = self.articles.len() != before;
        self.persist()?;
        Ok(removed)
    }

    pub fn replace_all(&mut self, articles: Vec<Article>) -> Result<()> {
        info!(count = articles.len(), "replacing article collection");
        self.articles = articles;
        self.persist()
    }

    /// Updates when the id is already stored, otherwise prepends.
    pub fn save(&mut self, article: Article) -> Result<SaveOutcome> {
        if self.contains_id(&article.id) {
            self.update(article)?;
            Ok(SaveOutcome::Updated)
        } else {
            self.add(article)?;
            Ok(SaveOutcome::Created)
        }
    }

    /// Slugs shared by more than one article, with the ids using them.
    pub fn duplicate_slugs(&self) -> BTreeMap<String, Vec<String>> {
        let mut by_slug: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for article in &self.articles {
            by_slug
                .entry(article.slug.clone())
                .or_default()
                .push(article.id.clone());
        }
        by_slug.retain(|_, ids| ids.len() > 1);
        by_slug
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    fn persist(&mut self) -> Result<()> {
        self.storage.persist(&self.articles)?;
        debug!(count = self.articles.len(), "persisted articles");
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    Created,
    Updated,
}
