//! # Page Metadata
//!
//! The article page keeps the document head (title, meta tags, canonical link and a
//! schema.org JSON-LD block) in sync with the article being shown, and restores the
//! site defaults when the page goes away.
//!
//! The head is modelled as a [`HeadDocument`]: a title plus an insertion-ordered map
//! of [`HeadKey`] to value. Every write is an upsert by key, so applying metadata
//! twice never duplicates an entry. [`HeadDocument::render_html`] turns it into
//! markup for static export.

use crate::error::Result;
use crate::model::Article;
use crate::templates;
use serde::Serialize;
use serde_json::json;

/// Identifier of the JSON-LD block describing the current article.
pub const JSON_LD_ID: &str = "json-ld-article";

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum HeadKey {
    /// `<meta name="...">`
    Meta(String),
    /// `<meta property="...">` (Open Graph)
    Property(String),
    /// `<link rel="...">`
    Link(String),
    /// `<script id="..." type="application/ld+json">`
    Script(String),
}

impl HeadKey {
    pub fn meta(name: &str) -> Self {
        HeadKey::Meta(name.to_string())
    }

    pub fn property(name: &str) -> Self {
        HeadKey::Property(name.to_string())
    }

    pub fn link(rel: &str) -> Self {
        HeadKey::Link(rel.to_string())
    }

    pub fn script(id: &str) -> Self {
        HeadKey::Script(id.to_string())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeadDocument {
    pub title: String,
    entries: Vec<(HeadKey, String)>,
}

impl HeadDocument {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            entries: Vec::new(),
        }
    }

    /// Updates the entry for `key`, or appends it.
    pub fn upsert(&mut self, key: HeadKey, value: impl Into<String>) {
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &HeadKey) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Removes the entry for `key`, returning its value if it was present.
    pub fn remove(&mut self, key: &HeadKey) -> Option<String> {
        let pos = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(pos).1)
    }

    pub fn entries(&self) -> impl Iterator<Item = (&HeadKey, &str)> {
        self.entries.iter().map(|(k, v)| (k, v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn render_html(&self) -> Result<String> {
        #[derive(Serialize)]
        struct Tag<'a> {
            kind: &'static str,
            key: &'a str,
            value: &'a str,
        }

        #[derive(Serialize)]
        struct HeadData<'a> {
            title: &'a str,
            tags: Vec<Tag<'a>>,
        }

        let tags = self
            .entries
            .iter()
            .map(|(key, value)| {
                let (kind, key) = match key {
                    HeadKey::Meta(name) => ("meta", name.as_str()),
                    HeadKey::Property(name) => ("property", name.as_str()),
                    HeadKey::Link(rel) => ("link", rel.as_str()),
                    HeadKey::Script(id) => ("script", id.as_str()),
                };
                Tag { kind, key, value }
            })
            .collect();

        templates::render(
            templates::HEAD_TEMPLATE,
            &HeadData {
                title: &self.title,
                tags,
            },
        )
    }
}

/// Applies article metadata to a [`HeadDocument`] and reverts it.
#[derive(Debug, Clone)]
pub struct MetadataInjector {
    pub site_name: String,
    pub origin: String,
    pub default_description: String,
}

impl MetadataInjector {
    pub fn new(
        site_name: impl Into<String>,
        origin: impl Into<String>,
        default_description: impl Into<String>,
    ) -> Self {
        Self {
            site_name: site_name.into(),
            origin: origin.into().trim_end_matches('/').to_string(),
            default_description: default_description.into(),
        }
    }

    /// `<origin>/#/post/<slug>`
    pub fn canonical_url(&self, slug: &str) -> String {
        format!("{}/#/post/{}", self.origin, slug)
    }

    /// A head in its default, no-article state.
    pub fn default_document(&self) -> HeadDocument {
        let mut doc = HeadDocument::new(self.site_name.clone());
        doc.upsert(HeadKey::meta("description"), self.default_description.clone());
        doc
    }

    pub fn apply(&self, doc: &mut HeadDocument, article: &Article) {
        doc.title = format!("{} | {}", article.title, self.site_name);

        doc.upsert(HeadKey::meta("description"), article.meta_description.clone());
        doc.upsert(HeadKey::meta("keywords"), article.keywords.join(", "));
        doc.upsert(HeadKey::meta("author"), article.author.clone());

        let canonical = self.canonical_url(&article.slug);
        doc.upsert(HeadKey::property("og:title"), article.title.clone());
        doc.upsert(
            HeadKey::property("og:description"),
            article.meta_description.clone(),
        );
        doc.upsert(HeadKey::property("og:type"), "article");
        doc.upsert(HeadKey::property("og:url"), canonical.clone());
        doc.upsert(HeadKey::property("og:image"), article.thumbnail.clone());
        doc.upsert(HeadKey::property("og:site_name"), self.site_name.clone());

        doc.upsert(HeadKey::link("canonical"), canonical.clone());

        let structured = json!({
            "@context": "https://schema.org",
            "@type": "Article",
            "mainEntityOfPage": {
                "@type": "WebPage",
                "@id": canonical,
            },
            "headline": article.title,
            "image": article.thumbnail,
            "datePublished": article.date,
            "author": {
                "@type": "Person",
                "name": article.author,
            },
            "publisher": {
                "@type": "Organization",
                "name": self.site_name,
                "logo": {
                    "@type": "ImageObject",
                    "url": format!("{}/assets/favicon.ico", self.origin),
                },
            },
            "description": article.meta_description,
        });
        doc.upsert(HeadKey::script(JSON_LD_ID), structured.to_string());
    }

    /// Restores the default title and description and drops the JSON-LD block.
    /// Safe to call when nothing was applied.
    pub fn revert(&self, doc: &mut HeadDocument) {
        doc.title = self.site_name.clone();
        doc.upsert(HeadKey::meta("description"), self.default_description.clone());
        doc.remove(&HeadKey::script(JSON_LD_ID));
    }

    /// Applies `article` for as long as the returned guard lives.
    pub fn mount<'d>(&'d self, doc: &'d mut HeadDocument, article: &Article) -> MountedArticle<'d> {
        self.apply(doc, article);
        MountedArticle {
            injector: self,
            doc,
        }
    }
}

/// An article page that is currently shown. Dropping it reverts the head.
pub struct MountedArticle<'d> {
    injector: &'d MetadataInjector,
    doc: &'d mut HeadDocument,
}

impl MountedArticle<'_> {
    pub fn document(&self) -> &HeadDocument {
        &*self.doc
    }
}

impl Drop for MountedArticle<'_> {
    fn drop(&mut self) {
        self.injector.revert(self.doc);
    }
}
