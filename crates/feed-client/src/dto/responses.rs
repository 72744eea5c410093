//! Response envelopes and summaries

use feed_core::{Activity, Reaction, ReactionKind};
use serde::{Deserialize, Serialize};

/// One page of a feed read
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedResponse<T> {
    pub results: Vec<T>,
    /// Path of the next page; the service sends `""` on the last page
    #[serde(default)]
    pub next: Option<String>,
    /// Server-side processing time, e.g. "12.34ms"
    #[serde(default)]
    pub duration: Option<String>,
}

impl<T> FeedResponse<T> {
    /// Path of the next page, if there is one
    pub fn next_page(&self) -> Option<&str> {
        self.next.as_deref().filter(|next| !next.is_empty())
    }

    pub fn has_more(&self) -> bool {
        self.next_page().is_some()
    }
}

/// One page of a reaction listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReactionsResponse {
    pub results: Vec<Reaction>,
    #[serde(default)]
    pub next: Option<String>,
    /// The activity the reactions belong to, when requested
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activity: Option<Activity>,
    #[serde(default)]
    pub duration: Option<String>,
}

impl ReactionsResponse {
    pub fn next_page(&self) -> Option<&str> {
        self.next.as_deref().filter(|next| !next.is_empty())
    }
}

/// Per-kind reaction summary for rendering a record
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReactionSummary {
    pub kind: ReactionKind,
    pub count: u32,
    /// Whether the current user has reacted with this kind
    pub own: bool,
}
