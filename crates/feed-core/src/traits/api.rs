//! API traits (ports) - what the SDK needs from the feed service
//!
//! The domain layer defines the calls it makes; a transport layer provides
//! the implementation. Implementations resolve a call only once the service
//! has answered, so callers can apply local reaction updates on success.

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::entities::{Activity, Reaction};
use crate::error::DomainError;
use crate::value_objects::{ActivityId, FeedId, ReactionId, ReactionKind};

/// Result type for API operations
pub type ApiResult<T> = Result<T, DomainError>;

// ============================================================================
// Reactions API
// ============================================================================

/// A reaction to be created by the service
#[derive(Debug, Clone, PartialEq)]
pub struct NewReaction {
    pub kind: ReactionKind,
    pub activity_id: ActivityId,
    pub user_id: String,
    /// Set for child reactions
    pub parent_id: Option<ReactionId>,
    pub data: Map<String, Value>,
    /// Feeds that should also receive a notification activity
    pub target_feeds: Vec<FeedId>,
}

impl NewReaction {
    pub fn new(kind: ReactionKind, activity_id: ActivityId, user_id: impl Into<String>) -> Self {
        Self {
            kind,
            activity_id,
            user_id: user_id.into(),
            parent_id: None,
            data: Map::new(),
            target_feeds: Vec::new(),
        }
    }

    /// A child reaction on `parent`
    pub fn child(kind: ReactionKind, parent: &Reaction, user_id: impl Into<String>) -> Self {
        let mut new = Self::new(kind, parent.activity_id.clone(), user_id);
        new.parent_id = Some(parent.id.clone());
        new
    }

    pub fn with_data(mut self, data: Map<String, Value>) -> Self {
        self.data = data;
        self
    }

    pub fn with_target_feeds(mut self, feeds: Vec<FeedId>) -> Self {
        self.target_feeds = feeds;
        self
    }
}

#[async_trait]
pub trait ReactionsApi: Send + Sync {
    /// Create a reaction; resolves to the reaction as stored by the service
    async fn add(&self, reaction: NewReaction) -> ApiResult<Reaction>;

    /// Fetch a reaction by ID
    async fn get(&self, id: &ReactionId) -> ApiResult<Reaction>;

    /// Replace a reaction's payload
    async fn update(&self, id: &ReactionId, data: Map<String, Value>) -> ApiResult<Reaction>;

    /// Delete a reaction
    async fn delete(&self, id: &ReactionId) -> ApiResult<()>;
}

// ============================================================================
// Feed API
// ============================================================================

/// Options for reading a feed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedQuery {
    pub limit: u32,
    pub offset: u32,
    /// Only activities older than this one
    pub id_lt: Option<ActivityId>,
    /// Only activities newer than this one
    pub id_gt: Option<ActivityId>,
    /// Include the current user's reactions on each activity
    pub with_own_reactions: bool,
    pub with_recent_reactions: bool,
    /// Cap on latest reactions returned per kind; `None` uses the service default
    pub recent_reactions_limit: Option<u32>,
    pub with_reaction_counts: bool,
}

impl FeedQuery {
    pub const DEFAULT_LIMIT: u32 = 25;

    /// Enriched read with all three reaction views
    pub fn enriched() -> Self {
        Self {
            with_own_reactions: true,
            with_recent_reactions: true,
            with_reaction_counts: true,
            ..Self::default()
        }
    }
}

impl Default for FeedQuery {
    fn default() -> Self {
        Self {
            limit: Self::DEFAULT_LIMIT,
            offset: 0,
            id_lt: None,
            id_gt: None,
            with_own_reactions: false,
            with_recent_reactions: false,
            recent_reactions_limit: None,
            with_reaction_counts: false,
        }
    }
}

#[async_trait]
pub trait FeedApi: Send + Sync {
    /// Read one page of a feed
    async fn activities(&self, feed: &FeedId, query: &FeedQuery) -> ApiResult<Vec<Activity>>;

    /// Fetch single activities by ID
    async fn activities_by_id(&self, ids: &[ActivityId]) -> ApiResult<Vec<Activity>>;
}
