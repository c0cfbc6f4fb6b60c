use super::ArticleStorage;
use crate::error::{AutopulseError, Result};
use crate::model::Article;

/// In-memory storage for testing and development.
/// Does NOT persist data beyond the value itself.
#[derive(Debug, Default, Clone)]
pub struct InMemoryStorage {
    persisted: Option<Vec<Article>>,
    seed: Vec<Article>,
    fail_reads: bool,
    writes: usize,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage that already holds a persisted collection.
    pub fn with_persisted(articles: Vec<Article>) -> Self {
        Self {
            persisted: Some(articles),
            ..Self::default()
        }
    }

    pub fn with_seed(mut self, seed: Vec<Article>) -> Self {
        self.seed = seed;
        self
    }

    /// Makes every read fail, as a corrupt or unreachable store would.
    pub fn failing_reads(mut self) -> Self {
        self.fail_reads = true;
        self
    }

    pub fn persisted(&self) -> Option<&[Article]> {
        self.persisted.as_deref()
    }

    /// Number of full-collection writes performed so far.
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl ArticleStorage for InMemoryStorage {
    fn load_persisted(&self) -> Result<Option<Vec<Article>>> {
        if self.fail_reads {
            return Err(AutopulseError::Store("simulated read failure".to_string()));
        }
        Ok(self.persisted.clone())
    }

    fn load_seed(&self) -> Result<Vec<Article>> {
        if self.fail_reads {
            return Err(AutopulseError::Store("simulated seed failure".to_string()));
        }
        Ok(self.seed.clone())
    }

    fn persist(&mut self, articles: &[Article]) -> Result<()> {
        self.persisted = Some(articles.to_vec());
        self.writes += 1;
        Ok(())
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::model::Article;

    /// Builds a fully populated article. `day` sets the publication date in January 2024.
    pub fn article(id: &str, title: &str, day: u32, published: bool) -> Article {
        Article {
            id: id.to_string(),
            title: title.to_string(),
            slug: crate::slug::derive_slug(title),
            meta_description: format!("About {}", title),
            keywords: vec!["cars".to_string()],
            category: "News".to_string(),
            author: "Tester".to_string(),
            date: format!("2024-01-{:02}T10:00:00.000Z", day),
            thumbnail: format!("https://img.example/{}.jpg", id),
            content: format!("<p>{}</p>", title),
            published,
        }
    }

    pub struct StorageFixture {
        pub articles: Vec<Article>,
    }

    impl Default for StorageFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StorageFixture {
        pub fn new() -> Self {
            Self {
                articles: Vec::new(),
            }
        }

        pub fn with_published(mut self, id: &str, title: &str, day: u32) -> Self {
            self.articles.push(article(id, title, day, true));
            self
        }

        pub fn with_draft(mut self, id: &str, title: &str, day: u32) -> Self {
            self.articles.push(article(id, title, day, false));
            self
        }

        pub fn with_category(mut self, category: &str) -> Self {
            if let Some(last) = self.articles.last_mut() {
                last.category = category.to_string();
            }
            self
        }

        pub fn with_keywords(mut self, keywords: &[&str]) -> Self {
            if let Some(last) = self.articles.last_mut() {
                last.keywords = keywords.iter().map(|k| k.to_string()).collect();
            }
            self
        }

        /// Storage with the fixture articles already persisted.
        pub fn persisted(self) -> InMemoryStorage {
            InMemoryStorage::with_persisted(self.articles)
        }

        /// Storage with nothing persisted and the fixture articles as seed.
        pub fn seeded(self) -> InMemoryStorage {
            InMemoryStorage::new().with_seed(self.articles)
        }
    }
}
