use crate::commands::{CmdMessage, CmdResult};
use crate::error::{AutopulseError, Result};
use crate::model::Article;
use crate::store::{ArticleStorage, ArticleStore};
use std::fs;
use std::path::Path;

pub const EXPORT_FILENAME: &str = "posts.json";

/// Pretty-printed JSON array of every article, drafts included.
pub fn render(articles: &[Article]) -> Result<String> {
    serde_json::to_string_pretty(articles).map_err(AutopulseError::Serialization)
}

pub fn run<S: ArticleStorage>(store: &ArticleStore<S>, output: &Path) -> Result<CmdResult> {
    let content = render(store.list())?;
    fs::write(output, content).map_err(AutopulseError::Io)?;

    let mut result = CmdResult::default().with_written_path(output.to_path_buf());
    result.add_message(CmdMessage::success(format!(
        "Exported {} articles to {}",
        store.list().len(),
        output.display()
    )));
    Ok(result)
}
