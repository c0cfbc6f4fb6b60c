//! # AI Drafts
//!
//! Article drafts come from a generative-AI provider that is treated as an opaque
//! producer: something implementing [`DraftGenerator`]. This module owns the parts
//! that are ours:
//!
//! - the request contract ([`DRAFT_INSTRUCTION`], [`draft_response_schema`]),
//! - validation of the response shape ([`parse_draft`]),
//! - the in-flight flag preventing concurrent generations ([`GenerationGuard`]),
//! - turning a draft into an unpublished [`Article`] ([`draft_to_article`]).

use crate::error::{AutopulseError, Result};
use crate::model::{format_timestamp, placeholder_thumbnail, Article};
use crate::slug::{assign_id, derive_slug};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::cell::Cell;
use std::io::Read;
use std::path::PathBuf;

pub const DRAFT_AUTHOR: &str = "AI Assistant";
pub const DRAFT_CATEGORY: &str = "EV";

pub const DRAFT_INSTRUCTION: &str = "Generate a new, original automotive news article about a \
fictional, newly announced electric hypercar. The article should be exciting and detailed. \
Make up a plausible name for the car and manufacturer. Follow the provided JSON schema.";

/// A generated, not yet persisted article payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleDraft {
    pub title: String,
    pub meta_description: String,
    pub keywords: Vec<String>,
    pub content: String,
}

/// The response shape requested from the provider.
pub fn draft_response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "title": {
                "type": "STRING",
                "description": "A catchy, SEO-friendly title for the automotive article, around 60-70 characters."
            },
            "meta_description": {
                "type": "STRING",
                "description": "A compelling meta description for SEO, around 150-160 characters."
            },
            "keywords": {
                "type": "ARRAY",
                "items": { "type": "STRING" },
                "description": "An array of 4-5 relevant keywords for the article."
            },
            "content": {
                "type": "STRING",
                "description": "The full article content as a single HTML string, at least 300 words, structured with <h2>/<h3> headings, <p> paragraphs and optionally <ul>/<li> lists."
            }
        },
        "required": ["title", "meta_description", "keywords", "content"]
    })
}

/// The complete request document: instruction plus response contract.
pub fn draft_request() -> Value {
    json!({
        "contents": DRAFT_INSTRUCTION,
        "config": {
            "responseMimeType": "application/json",
            "responseSchema": draft_response_schema(),
        }
    })
}

/// Validates a provider response against the draft shape.
pub fn parse_draft(text: &str) -> Result<ArticleDraft> {
    let draft: ArticleDraft = serde_json::from_str(text.trim())
        .map_err(|e| AutopulseError::AiGeneration(format!("malformed response: {}", e)))?;

    if draft.title.trim().is_empty() {
        return Err(AutopulseError::AiGeneration(
            "response has an empty title".to_string(),
        ));
    }
    if draft.content.trim().is_empty() {
        return Err(AutopulseError::AiGeneration(
            "response has empty content".to_string(),
        ));
    }
    Ok(draft)
}

/// Builds an unpublished article from a draft.
pub fn draft_to_article(draft: ArticleDraft, now: DateTime<Utc>) -> Article {
    let slug = derive_slug(&draft.title);
    Article {
        id: assign_id(None),
        thumbnail: placeholder_thumbnail(&slug),
        slug,
        author: DRAFT_AUTHOR.to_string(),
        date: format_timestamp(now),
        published: false,
        category: DRAFT_CATEGORY.to_string(),
        title: draft.title,
        meta_description: draft.meta_description,
        keywords: draft.keywords,
        content: draft.content,
    }
}

/// Something that produces article drafts.
pub trait DraftGenerator {
    fn generate(&mut self) -> Result<ArticleDraft>;
}

/// Where a provider response document is read from.
#[derive(Debug, Clone)]
pub enum ResponseInput {
    File(PathBuf),
    Stdin,
    Text(String),
}

/// Draft generator backed by a provider response captured elsewhere
/// (a file written by the provider client, or piped on stdin).
#[derive(Debug, Clone)]
pub struct ResponseDraftSource {
    input: ResponseInput,
}

impl ResponseDraftSource {
    pub fn new(input: ResponseInput) -> Self {
        Self { input }
    }

    fn read(&self) -> Result<String> {
        match &self.input {
            ResponseInput::File(path) => std::fs::read_to_string(path).map_err(AutopulseError::Io),
            ResponseInput::Stdin => {
                let mut buffer = String::new();
                std::io::stdin()
                    .read_to_string(&mut buffer)
                    .map_err(AutopulseError::Io)?;
                Ok(buffer)
            }
            ResponseInput::Text(text) => Ok(text.clone()),
        }
    }
}

impl DraftGenerator for ResponseDraftSource {
    fn generate(&mut self) -> Result<ArticleDraft> {
        let text = self.read()?;
        if text.trim().is_empty() {
            return Err(AutopulseError::AiGeneration(
                "no response received from the provider".to_string(),
            ));
        }
        parse_draft(&text)
    }
}

/// In-flight flag for draft generation. Only one generation may run at a time.
#[derive(Debug, Default)]
pub struct GenerationGuard {
    in_flight: Cell<bool>,
}

impl GenerationGuard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_generating(&self) -> bool {
        self.in_flight.get()
    }

    /// Marks a generation as running until the returned token is dropped.
    pub fn begin(&self) -> Result<InFlight<'_>> {
        if self.in_flight.replace(true) {
            return Err(AutopulseError::AiGeneration(
                "a generation is already in progress".to_string(),
            ));
        }
        Ok(InFlight { guard: self })
    }
}

pub struct InFlight<'g> {
    guard: &'g GenerationGuard,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.guard.in_flight.set(false);
    }
}
