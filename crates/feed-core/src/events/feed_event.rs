//! Feed events - emitted after a local reaction update or feed refresh
//!
//! UI layers subscribe to these to re-render the affected activity without
//! polling the records they hold.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entities::Reaction;
use crate::value_objects::{ActivityId, FeedId, ReactionId, ReactionKind};

/// All possible feed events
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FeedEvent {
    ReactionAdded(ReactionAddedEvent),
    ReactionUpdated(ReactionUpdatedEvent),
    ReactionRemoved(ReactionRemovedEvent),
    FeedRefreshed(FeedRefreshedEvent),
}

impl FeedEvent {
    /// Get the event type name
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::ReactionAdded(_) => "REACTION_ADDED",
            Self::ReactionUpdated(_) => "REACTION_UPDATED",
            Self::ReactionRemoved(_) => "REACTION_REMOVED",
            Self::FeedRefreshed(_) => "FEED_REFRESHED",
        }
    }

    /// The activity whose reaction views changed, if any
    pub fn activity_id(&self) -> Option<&ActivityId> {
        match self {
            Self::ReactionAdded(e) => Some(&e.reaction.activity_id),
            Self::ReactionUpdated(e) => Some(&e.reaction.activity_id),
            Self::ReactionRemoved(e) => Some(&e.activity_id),
            Self::FeedRefreshed(_) => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReactionAddedEvent {
    pub reaction: Reaction,
    /// Record the views were updated on (the original for reposts)
    pub record_id: String,
    pub timestamp: DateTime<Utc>,
}

impl ReactionAddedEvent {
    pub fn new(reaction: Reaction, record_id: impl Into<String>) -> Self {
        Self {
            reaction,
            record_id: record_id.into(),
            timestamp: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReactionUpdatedEvent {
    pub reaction: Reaction,
    pub timestamp: DateTime<Utc>,
}

impl ReactionUpdatedEvent {
    pub fn new(reaction: Reaction) -> Self {
        Self {
            reaction,
            timestamp: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReactionRemovedEvent {
    pub reaction_id: ReactionId,
    pub kind: ReactionKind,
    pub activity_id: ActivityId,
    /// Whether the record's local views held the reaction
    pub tracked_locally: bool,
    pub timestamp: DateTime<Utc>,
}

impl ReactionRemovedEvent {
    pub fn new(reaction: &Reaction, tracked_locally: bool) -> Self {
        Self {
            reaction_id: reaction.id.clone(),
            kind: reaction.kind.clone(),
            activity_id: reaction.activity_id.clone(),
            tracked_locally,
            timestamp: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedRefreshedEvent {
    pub feed: FeedId,
    pub activity_count: usize,
    pub timestamp: DateTime<Utc>,
}

impl FeedRefreshedEvent {
    pub fn new(feed: FeedId, activity_count: usize) -> Self {
        Self {
            feed,
            activity_count,
            timestamp: Utc::now(),
        }
    }
}
