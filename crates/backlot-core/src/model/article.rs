// ── News article domain types ──

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::EntityId;

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ArticleStatus {
    Draft,
    Published,
    Archived,
    Unknown,
}

/// A news/blog entry, possibly one of several locale variants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub id: EntityId,
    pub title: String,
    pub slug: String,
    pub status: ArticleStatus,
    pub locale: Option<String>,
    pub body: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
}

impl Article {
    /// Whether the article is visible on the public site.
    pub fn is_live(&self) -> bool {
        self.status == ArticleStatus::Published
    }
}
