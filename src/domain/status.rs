use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Lifecycle of a saved item, as reported by the backend.
///
/// The client never transitions this locally; it only observes new values by
/// re-fetching. `Read` is a post-terminal marker applied after `Ready` when
/// the user finishes the article, so it never shows up mid-processing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemStatus {
    Created,
    Processing,
    Ready,
    Failed,
    Read,
}

impl ItemStatus {
    /// Polling stops permanently once a terminal status is observed.
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            ItemStatus::Ready | ItemStatus::Failed | ItemStatus::Read
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ItemStatus::Created => "created",
            ItemStatus::Processing => "processing",
            ItemStatus::Ready => "ready",
            ItemStatus::Failed => "failed",
            ItemStatus::Read => "read",
        }
    }
}

impl fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ItemStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "created" => Ok(ItemStatus::Created),
            "processing" => Ok(ItemStatus::Processing),
            "ready" => Ok(ItemStatus::Ready),
            "failed" => Ok(ItemStatus::Failed),
            "read" => Ok(ItemStatus::Read),
            other => Err(format!("unknown item status: {}", other)),
        }
    }
}
