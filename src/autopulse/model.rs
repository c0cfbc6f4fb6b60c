use crate::error::{AutopulseError, Result};
use crate::slug::{assign_id, derive_slug, resolve_slug};
use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Categories offered by the admin form and the site navigation.
/// The `category` field itself is free-form so imported data may extend it.
pub const CATEGORIES: &[&str] = &["News", "EV", "Review", "Modifikasi", "Motorsport"];

pub const DEFAULT_CATEGORY: &str = "News";
pub const DEFAULT_AUTHOR: &str = "Admin";

/// A single publishable content record.
///
/// Field names match the JSON documents the site persists, exports and imports.
/// Everything except `id` and `title` defaults when absent so that minimal
/// records are accepted on import.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub meta_description: String,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub author: String,
    /// ISO-8601 instant, kept verbatim.
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub thumbnail: String,
    /// HTML markup.
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub published: bool,
}

impl Article {
    /// Parses `date` with [`parse_date`].
    pub fn published_at(&self) -> Option<DateTime<Utc>> {
        parse_date(&self.date)
    }

    /// The date portion (`YYYY-MM-DD`) of `date`.
    ///
    /// Falls back to whatever precedes a `T` in the raw string when it does not parse.
    pub fn date_portion(&self) -> String {
        match self.published_at() {
            Some(dt) => dt.format("%Y-%m-%d").to_string(),
            None => self.date.split('T').next().unwrap_or_default().to_string(),
        }
    }
}

/// Parses an ISO-8601 publication date.
///
/// Accepts RFC 3339 instants, date-times without an offset (read as UTC) and plain
/// dates (midnight UTC).
pub fn parse_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

pub fn format_timestamp(now: DateTime<Utc>) -> String {
    now.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Placeholder image used when no thumbnail is given.
pub fn placeholder_thumbnail(slug: &str) -> String {
    format!("https://picsum.photos/seed/{}/800/600", slug)
}

/// Splits a comma separated keyword list, trimming entries and dropping empty ones.
pub fn parse_keywords(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .map(str::to_string)
        .collect()
}

/// A partially filled article, as produced by the admin form.
///
/// Editing starts from `ArticleForm::from(&article)`; creating starts from
/// `ArticleForm::default()`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArticleForm {
    pub id: Option<String>,
    pub title: Option<String>,
    pub slug: Option<String>,
    pub meta_description: Option<String>,
    pub keywords: Option<Vec<String>>,
    pub category: Option<String>,
    pub author: Option<String>,
    pub date: Option<String>,
    pub thumbnail: Option<String>,
    pub content: Option<String>,
    pub published: Option<bool>,
}

impl ArticleForm {
    /// Validates the form and fills unset fields with their defaults.
    pub fn into_article(self, now: DateTime<Utc>) -> Result<Article> {
        let title = non_empty(self.title);
        let content = non_empty(self.content);
        let (title, content) = match (title, content) {
            (Some(t), Some(c)) => (t, c),
            _ => {
                return Err(AutopulseError::Validation(
                    "Title and Content are required.".to_string(),
                ))
            }
        };

        let date = non_empty(self.date);
        if let Some(raw) = &date {
            if parse_date(raw).is_none() {
                return Err(AutopulseError::Validation(format!(
                    "Invalid date: {} (expected an ISO-8601 date)",
                    raw
                )));
            }
        }

        let derived = derive_slug(&title);
        let slug = resolve_slug(self.slug.as_deref(), &title);

        Ok(Article {
            id: assign_id(self.id.as_deref()),
            slug,
            meta_description: self.meta_description.unwrap_or_default(),
            keywords: self.keywords.unwrap_or_default(),
            category: non_empty(self.category).unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
            author: non_empty(self.author).unwrap_or_else(|| DEFAULT_AUTHOR.to_string()),
            date: date.unwrap_or_else(|| format_timestamp(now)),
            thumbnail: non_empty(self.thumbnail).unwrap_or_else(|| placeholder_thumbnail(&derived)),
            content,
            published: self.published.unwrap_or(true),
            title,
        })
    }
}

impl From<&Article> for ArticleForm {
    fn from(article: &Article) -> Self {
        Self {
            id: Some(article.id.clone()),
            title: Some(article.title.clone()),
            slug: Some(article.slug.clone()),
            meta_description: Some(article.meta_description.clone()),
            keywords: Some(article.keywords.clone()),
            category: Some(article.category.clone()),
            author: Some(article.author.clone()),
            date: Some(article.date.clone()),
            thumbnail: Some(article.thumbnail.clone()),
            content: Some(article.content.clone()),
            published: Some(article.published),
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
