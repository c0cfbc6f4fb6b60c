//! # Command Layer
//!
//! Business logic for each workflow. Commands take the store and plain Rust values,
//! and return a [`CmdResult`]; they never print or prompt. Confirmation prompts and
//! output formatting belong to the CLI.

use crate::config::SiteConfig;
use crate::metadata::HeadDocument;
use crate::model::Article;
use std::path::PathBuf;

pub mod config;
pub mod delete;
pub mod export;
pub mod generate;
pub mod helpers;
pub mod import;
pub mod list;
pub mod save;
pub mod sitemap;
pub mod view;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    /// Articles created, updated or removed by the command.
    pub affected_articles: Vec<Article>,
    /// The featured pick of a listing, if any.
    pub featured: Option<Article>,
    /// Articles to show, in display order (excluding `featured`).
    pub listed_articles: Vec<Article>,
    /// Document head for a detail page.
    pub head: Option<HeadDocument>,
    /// Files written by the command.
    pub written_paths: Vec<PathBuf>,
    pub config: Option<SiteConfig>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_affected_articles(mut self, articles: Vec<Article>) -> Self {
        self.affected_articles = articles;
        self
    }

    pub fn with_listed_articles(mut self, articles: Vec<Article>) -> Self {
        self.listed_articles = articles;
        self
    }

    pub fn with_featured(mut self, article: Option<Article>) -> Self {
        self.featured = article;
        self
    }

    pub fn with_head(mut self, head: HeadDocument) -> Self {
        self.head = Some(head);
        self
    }

    pub fn with_written_path(mut self, path: PathBuf) -> Self {
        self.written_paths.push(path);
        self
    }

    pub fn with_config(mut self, config: SiteConfig) -> Self {
        self.config = Some(config);
        self
    }
}
