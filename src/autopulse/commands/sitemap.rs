use crate::commands::{CmdMessage, CmdResult};
use crate::error::{AutopulseError, Result};
use crate::sitemap::generate_sitemap;
use crate::store::{ArticleStorage, ArticleStore};
use chrono::NaiveDate;
use std::fs;
use std::path::Path;

pub const SITEMAP_FILENAME: &str = "sitemap.xml";

pub fn run<S: ArticleStorage>(
    store: &ArticleStore<S>,
    origin: &str,
    today: NaiveDate,
    output: &Path,
) -> Result<CmdResult> {
    let xml = generate_sitemap(store.list(), origin, today)?;
    fs::write(output, xml).map_err(AutopulseError::Io)?;

    let published = store.list().iter().filter(|a| a.published).count();
    let mut result = CmdResult::default().with_written_path(output.to_path_buf());
    result.add_message(CmdMessage::success(format!(
        "Sitemap with {} article entries written to {}",
        published,
        output.display()
    )));
    Ok(result)
}
