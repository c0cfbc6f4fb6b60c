use super::ArticleStorage;
use crate::error::{AutopulseError, Result};
use crate::model::Article;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;
use uuid::Uuid;

/// Seed dataset shipped with the binary, used when no seed file is configured.
pub const BUNDLED_SEED: &str = include_str!("../../../data/posts.json");

pub const DEFAULT_STORAGE_KEY: &str = "autopulse_posts";

pub struct FileStorage {
    root: PathBuf,
    storage_key: String,
    seed_path: Option<PathBuf>,
}

impl FileStorage {
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            seed_path: None,
        }
    }

    pub fn with_storage_key(mut self, key: &str) -> Self {
        self.storage_key = key.trim_end_matches(".json").to_string();
        self
    }

    pub fn with_seed_path(mut self, path: Option<PathBuf>) -> Self {
        self.seed_path = path;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn data_file(&self) -> PathBuf {
        self.root.join(format!("{}.json", self.storage_key))
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root).map_err(AutopulseError::Io)?;
        }
        Ok(())
    }
}

impl ArticleStorage for FileStorage {
    fn load_persisted(&self) -> Result<Option<Vec<Article>>> {
        let data_file = self.data_file();
        if !data_file.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&data_file).map_err(AutopulseError::Io)?;
        let articles: Vec<Article> =
            serde_json::from_str(&content).map_err(AutopulseError::Serialization)?;
        debug!(path = %data_file.display(), count = articles.len(), "read persisted articles");
        Ok(Some(articles))
    }

    fn load_seed(&self) -> Result<Vec<Article>> {
        let content = match &self.seed_path {
            Some(path) => fs::read_to_string(path).map_err(AutopulseError::Io)?,
            None => BUNDLED_SEED.to_string(),
        };
        let articles: Vec<Article> =
            serde_json::from_str(&content).map_err(AutopulseError::Serialization)?;
        Ok(articles)
    }

    fn persist(&mut self, articles: &[Article]) -> Result<()> {
        self.ensure_dir()?;
        let content =
            serde_json::to_string_pretty(articles).map_err(AutopulseError::Serialization)?;

        // Atomic write
        let tmp_file = self
            .root
            .join(format!(".{}-{}.tmp", self.storage_key, Uuid::new_v4()));
        fs::write(&tmp_file, content).map_err(AutopulseError::Io)?;
        fs::rename(&tmp_file, self.data_file()).map_err(AutopulseError::Io)?;

        Ok(())
    }
}
