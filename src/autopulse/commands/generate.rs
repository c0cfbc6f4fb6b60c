use crate::commands::{CmdMessage, CmdResult};
use crate::draft::{draft_to_article, DraftGenerator, GenerationGuard};
use crate::error::Result;
use crate::store::{ArticleStorage, ArticleStore};
use chrono::{DateTime, Utc};
use tracing::{error, info};

/// Asks `generator` for a draft and stores it as an unpublished article.
///
/// Nothing is added when generation fails or another generation is in flight.
pub fn run<S: ArticleStorage, G: DraftGenerator + ?Sized>(
    store: &mut ArticleStore<S>,
    guard: &GenerationGuard,
    generator: &mut G,
    now: DateTime<Utc>,
) -> Result<CmdResult> {
    let _in_flight = guard.begin()?;

    let draft = generator.generate().map_err(|e| {
        error!(error = %e, "article generation failed");
        e
    })?;
    let article = draft_to_article(draft, now);
    store.add(article.clone())?;
    info!(id = %article.id, "generated draft article added");

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Draft generated: {} (unpublished)",
        article.title
    )));
    Ok(result.with_affected_articles(vec![article]))
}
