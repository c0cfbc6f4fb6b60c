use crate::commands::helpers::find_article;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::{ArticleStorage, ArticleStore};

/// Removes the article matching `id_or_slug`. A missing article is not an error.
pub fn run<S: ArticleStorage>(store: &mut ArticleStore<S>, id_or_slug: &str) -> Result<CmdResult> {
    let mut result = CmdResult::default();

    let Some(article) = find_article(store, id_or_slug).cloned() else {
        result.add_message(CmdMessage::info(format!(
            "No article matches {}; nothing deleted.",
            id_or_slug
        )));
        return Ok(result);
    };

    store.remove(&article.id)?;
    result.add_message(CmdMessage::success(format!(
        "Article deleted: {}",
        article.title
    )));
    result.affected_articles.push(article);
    Ok(result)
}
