use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::ArticleForm;
use crate::store::article_store::SaveOutcome;
use crate::store::{ArticleStorage, ArticleStore};
use chrono::{DateTime, Utc};
use tracing::info;

/// Validates the admin form and stores the result: update when the id exists, else create.
pub fn run<S: ArticleStorage>(
    store: &mut ArticleStore<S>,
    form: ArticleForm,
    now: DateTime<Utc>,
) -> Result<CmdResult> {
    let article = form.into_article(now)?;
    let outcome = store.save(article.clone())?;
    info!(id = %article.id, outcome = ?outcome, "article saved");

    let verb = match outcome {
        SaveOutcome::Created => "created",
        SaveOutcome::Updated => "updated",
    };
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Article {}: {}",
        verb, article.title
    )));
    Ok(result.with_affected_articles(vec![article]))
}
