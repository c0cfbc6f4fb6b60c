//! Sitemap generation: the home page plus one entry per published article.

use crate::error::Result;
use crate::model::Article;
use crate::templates;
use chrono::NaiveDate;
use serde::Serialize;

pub const HOME_CHANGEFREQ: &str = "weekly";
pub const HOME_PRIORITY: &str = "1.0";
pub const ARTICLE_CHANGEFREQ: &str = "monthly";
pub const ARTICLE_PRIORITY: &str = "0.8";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SitemapUrl {
    pub loc: String,
    pub lastmod: String,
    pub changefreq: &'static str,
    pub priority: &'static str,
}

/// Entries in output order. Articles keep collection order; drafts are skipped.
pub fn sitemap_urls(articles: &[Article], origin: &str, today: NaiveDate) -> Vec<SitemapUrl> {
    let origin = origin.trim_end_matches('/');
    let home = SitemapUrl {
        loc: format!("{}/#/", origin),
        lastmod: today.format("%Y-%m-%d").to_string(),
        changefreq: HOME_CHANGEFREQ,
        priority: HOME_PRIORITY,
    };

    std::iter::once(home)
        .chain(articles.iter().filter(|a| a.published).map(|a| SitemapUrl {
            loc: format!("{}/#/post/{}", origin, a.slug),
            lastmod: a.date_portion(),
            changefreq: ARTICLE_CHANGEFREQ,
            priority: ARTICLE_PRIORITY,
        }))
        .collect()
}

pub fn generate_sitemap(articles: &[Article], origin: &str, today: NaiveDate) -> Result<String> {
    #[derive(Serialize)]
    struct SitemapData {
        urls: Vec<SitemapUrl>,
    }

    templates::render(
        templates::SITEMAP_TEMPLATE,
        &SitemapData {
            urls: sitemap_urls(articles, origin, today),
        },
    )
}
