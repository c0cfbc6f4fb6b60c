use crate::commands::{CmdMessage, CmdResult};
use crate::error::{AutopulseError, Result};
use crate::model::Article;
use crate::store::{ArticleStorage, ArticleStore};
use serde_json::Value;
use std::fmt;
use tracing::{info, warn};

/// Why an import document was refused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportRejection {
    InvalidJson(String),
    NotAnArray,
    InvalidArticle { index: usize, reason: String },
}

impl fmt::Display for ImportRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImportRejection::InvalidJson(e) => write!(f, "Invalid JSON format: {}", e),
            ImportRejection::NotAnArray => write!(f, "Invalid file format: expected an array"),
            ImportRejection::InvalidArticle { index, reason } => {
                write!(f, "Invalid file format: article #{} {}", index + 1, reason)
            }
        }
    }
}

/// Checks an import document. Every element must carry a non-empty `id` and `title`;
/// the first failing element rejects the whole document.
pub fn validate_import(text: &str) -> std::result::Result<Vec<Article>, ImportRejection> {
    let value: Value =
        serde_json::from_str(text).map_err(|e| ImportRejection::InvalidJson(e.to_string()))?;
    let Value::Array(items) = value else {
        return Err(ImportRejection::NotAnArray);
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            let reject = |reason: &str| ImportRejection::InvalidArticle {
                index,
                reason: reason.to_string(),
            };
            if !item.is_object() {
                return Err(reject("is not an object"));
            }
            if !has_text(&item, "id") {
                return Err(reject("is missing an id"));
            }
            if !has_text(&item, "title") {
                return Err(reject("is missing a title"));
            }
            serde_json::from_value::<Article>(item)
                .map_err(|e| ImportRejection::InvalidArticle {
                    index,
                    reason: format!("has an invalid field: {}", e),
                })
        })
        .collect()
}

fn has_text(item: &Value, field: &str) -> bool {
    item.get(field)
        .and_then(Value::as_str)
        .is_some_and(|s| !s.is_empty())
}

/// Replaces the whole collection with the document's articles, or changes nothing.
pub fn run<S: ArticleStorage>(store: &mut ArticleStore<S>, text: &str) -> Result<CmdResult> {
    let articles = validate_import(text).map_err(|rejection| {
        warn!(%rejection, "import rejected");
        AutopulseError::ImportRejected(rejection.to_string())
    })?;

    let count = articles.len();
    store.replace_all(articles)?;
    info!(count, "articles imported");

    let mut result = CmdResult::default().with_affected_articles(store.list().to_vec());
    result.add_message(CmdMessage::success(format!(
        "Articles imported successfully! ({} total)",
        count
    )));
    Ok(result)
}
