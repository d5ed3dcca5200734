//! Content module - entity models, block classifier, renderer, and loader

pub mod blocks;
pub mod loader;
pub mod render;

pub use blocks::{classify, paragraphs, split_list_line, Block, BlockKind, ListLine};
pub use loader::ContentDir;
pub use render::{render, DisplayNode};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A quotation, randomly sampled for the rotating display
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub id: i64,
    pub text: String,
    pub source: String,
    pub year: String,
}

/// Seed-file form of a quote; ids are assigned by the store
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteData {
    pub text: String,
    pub source: String,
    pub year: String,
}

/// A published essay or book
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Essay {
    pub id: i64,
    pub title: String,
    pub year: String,
    pub publisher: String,
    pub description: String,
    pub cover_image: Option<String>,
    pub link: Option<String>,
    /// Paragraph-only block text for the detail view
    pub body: Option<String>,
}

/// Seed-file form of an essay
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EssayData {
    pub title: String,
    pub year: String,
    pub publisher: String,
    pub description: String,
    #[serde(default)]
    pub cover_image: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub body: Option<String>,
}

/// One discography entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct MusicRelease {
    pub id: i64,
    pub title: String,
    pub artist: String,
    pub year: String,
    pub label: String,
    pub format: String,
}

/// Seed-file form of a discography entry
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MusicReleaseData {
    pub title: String,
    pub artist: String,
    pub year: String,
    pub label: String,
    pub format: String,
}

/// A slug-addressed unit of free-text content (biography, contact blurb).
///
/// `content` is the classifier's input: blocks separated by a blank line.
/// A null content renders nothing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    pub id: i64,
    pub slug: String,
    pub title: String,
    pub content: Option<String>,
    pub sort_order: Option<i64>,
}

/// Seed-file form of a section
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionData {
    pub slug: String,
    pub title: String,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub sort_order: Option<i64>,
}

/// A message submitted through the public contact endpoint.
///
/// The one record not derived from the content files: written by the
/// server, never cleared by sync.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ContactMessage {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

/// Incoming form of a contact message.
///
/// Fields default to empty so a missing field reports the same
/// fill-in-all-fields error as a blank one.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ContactMessageData {
    pub name: String,
    pub email: String,
    pub message: String,
}
