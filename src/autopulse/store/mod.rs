//! # Storage Layer
//!
//! Articles live in a single JSON document. The [`ArticleStorage`] trait hides where
//! that document is kept so the [`ArticleStore`] can be exercised without touching
//! the filesystem.
//!
//! ## Implementations
//!
//! - [`fs::FileStorage`]: production storage
//!   - The collection is stored as `<data_dir>/<storage_key>.json`
//!   - Writes are atomic (temp file + rename)
//!   - The seed dataset comes from a configured file, or the one bundled in the binary
//!
//! - [`memory::InMemoryStorage`]: in-memory storage for testing
//!
//! ## Storage Format
//!
//! ```text
//! <data_dir>/
//! ├── autopulse_posts.json   # Every article, JSON array, most recent first
//! └── config.json            # Site configuration
//! ```
//!
//! There is no partial persistence: every mutation rewrites the whole array.

use crate::error::Result;
use crate::model::Article;

pub mod article_store;
pub mod fs;
pub mod memory;

pub use article_store::ArticleStore;

/// Abstract interface for the durable article collection.
pub trait ArticleStorage {
    /// Reads the previously persisted collection.
    ///
    /// `Ok(None)` means nothing was ever persisted; an empty array is `Ok(Some(vec![]))`.
    fn load_persisted(&self) -> Result<Option<Vec<Article>>>;

    /// Reads the seed dataset used on first run.
    fn load_seed(&self) -> Result<Vec<Article>>;

    /// Replaces the persisted collection with `articles`.
    fn persist(&mut self, articles: &[Article]) -> Result<()>;
}
