use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::status::ItemStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

/// A saved article and its processing/reading state.
///
/// Everything past `url`/`status`/`saved_at` is produced asynchronously by
/// the backend and stays absent until `status` reaches `ready`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: String,
    pub url: String,
    pub status: ItemStatus,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub word_count: Option<u32>,
    #[serde(default)]
    pub reading_time_minutes: Option<u32>,
    #[serde(default)]
    pub difficulty: Option<Difficulty>,
    #[serde(default)]
    pub summary: Option<Vec<String>>,
    #[serde(default)]
    pub content: Option<String>,
    pub saved_at: DateTime<Utc>,
    #[serde(default)]
    pub is_completed: Option<bool>,
    #[serde(default)]
    pub is_skimmed: Option<bool>,
}

/// The creation endpoint returns a bare `{id, status}` payload; the full
/// item only exists once processing has started.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatedItem {
    pub id: String,
    pub status: ItemStatus,
}

impl Item {
    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or("(Untitled)")
    }

    /// Reading time in minutes. Prefers the backend estimate; otherwise
    /// derives one from the word count at 200 wpm, never below one minute.
    pub fn reading_time(&self) -> Option<u32> {
        self.reading_time_minutes
            .or_else(|| self.word_count.map(|words| words.div_ceil(200).max(1)))
    }

    /// Skim time is half the reading time, rounded, never below one minute.
    pub fn skim_time(&self) -> Option<u32> {
        self.reading_time().map(|mins| ((mins + 1) / 2).max(1))
    }

    pub fn is_done(&self) -> bool {
        self.is_completed.unwrap_or(false) || self.is_skimmed.unwrap_or(false)
    }
}
